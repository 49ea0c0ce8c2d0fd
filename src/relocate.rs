//! Relocation of trip-folder image assets into the flat asset directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use same_file::is_same_file;
use tracing::{debug, info, warn};

use crate::models::{Collision, MovedAsset, RelocationReport};
use crate::naming::{date_prefix, is_image_file};
use crate::project::JournalLayout;

/// Move every image asset found under the documents subtree into the flat
/// asset directory, renaming each with the date prefix of its trip folder.
///
/// Each file's move is an independent unit: a failure is logged and the walk
/// continues. Name collisions are never resolved automatically; the source
/// file stays in place and the conflict is reported. Only a missing
/// documents subtree is fatal.
pub fn relocate_assets(layout: &JournalLayout, tree_root: &Path) -> Result<RelocationReport> {
    let documents_root = layout.documents_root(tree_root);
    ensure!(
        documents_root.is_dir(),
        "documents subtree not found at {}",
        documents_root.display()
    );

    let asset_root = layout.asset_root(tree_root);
    if !asset_root.exists() {
        fs::create_dir_all(&asset_root).with_context(|| {
            format!("failed to create asset directory {}", asset_root.display())
        })?;
    }

    let mut report = RelocationReport::default();
    relocate_in_dir(&documents_root, &documents_root, &asset_root, &mut report);
    Ok(report)
}

fn relocate_in_dir(
    dir: &Path,
    documents_root: &Path,
    asset_root: &Path,
    report: &mut RelocationReport,
) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("skipping unreadable directory {}: {err}", dir.display());
            return;
        }
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .map(|name| !name.to_string_lossy().starts_with('.'))
                .unwrap_or(true)
        })
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            relocate_in_dir(&path, documents_root, asset_root, report);
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_image_file)
        {
            relocate_file(&path, documents_root, asset_root, report);
        }
    }
}

fn relocate_file(
    source: &Path,
    documents_root: &Path,
    asset_root: &Path,
    report: &mut RelocationReport,
) {
    let relative = source
        .strip_prefix(documents_root)
        .unwrap_or(source)
        .to_path_buf();
    let Some(file_name) = source.file_name().and_then(|name| name.to_str()) else {
        warn!("skipping {} (unrepresentable file name)", source.display());
        return;
    };
    let parent_name = source
        .parent()
        .and_then(|parent| parent.file_name())
        .and_then(|name| name.to_str());

    let Some(prefix) = parent_name.and_then(date_prefix) else {
        warn!(
            "skipping {} (no date prefix in folder name)",
            relative.display()
        );
        report.skipped_no_prefix.push(relative);
        return;
    };

    let new_name = format!("{prefix}_{file_name}");
    let target = asset_root.join(&new_name);

    if target.exists() {
        if is_same_file(source, &target).unwrap_or(false) {
            debug!("{new_name} already present in the asset directory");
        } else {
            warn!(
                "collision: {new_name} already exists, leaving {} in place",
                relative.display()
            );
            report.collisions.push(Collision {
                source: relative,
                target_name: new_name,
            });
        }
        return;
    }

    match move_file(source, &target) {
        Ok(()) => {
            info!("moved {} -> {new_name}", relative.display());
            report.moved.push(MovedAsset {
                source: relative,
                new_name,
            });
        }
        Err(err) => warn!("failed to move {}: {err}", relative.display()),
    }
}

fn move_file(source: &Path, target: &Path) -> std::io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        // rename cannot cross filesystems; fall back to copy-and-delete
        Err(_) => {
            fs::copy(source, target)?;
            fs::remove_file(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_file(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn moves_and_renames_assets_by_date_prefix() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("files/2025/250617_zuoz/panorama.png"), "png");
        write_file(&root.join("files/2025/250617_zuoz/tour.ipynb"), "{}");

        let layout = JournalLayout::default();
        let report = relocate_assets(&layout, root).unwrap();

        assert_eq!(report.moved.len(), 1);
        assert_eq!(report.moved[0].new_name, "250617_panorama.png");
        assert_eq!(
            report.moved[0].source,
            Path::new("2025/250617_zuoz/panorama.png")
        );
        assert!(root.join("images/250617_panorama.png").exists());
        assert!(!root.join("files/2025/250617_zuoz/panorama.png").exists());
        // documents are not assets and stay where they are
        assert!(root.join("files/2025/250617_zuoz/tour.ipynb").exists());
    }

    #[test]
    fn skips_files_whose_folder_lacks_a_date_prefix() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("files/drafts/sketch.png"), "png");

        let layout = JournalLayout::default();
        let report = relocate_assets(&layout, root).unwrap();

        assert!(report.moved.is_empty());
        assert_eq!(
            report.skipped_no_prefix,
            vec![Path::new("drafts/sketch.png").to_path_buf()]
        );
        assert!(root.join("files/drafts/sketch.png").exists());
    }

    #[test]
    fn reports_collisions_and_preserves_the_source() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("files/2024/250617_first/pano.png"), "first");
        write_file(&root.join("files/2025/250617_second/pano.png"), "second");

        let layout = JournalLayout::default();
        let report = relocate_assets(&layout, root).unwrap();

        assert_eq!(report.moved.len(), 1);
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].target_name, "250617_pano.png");
        // the earlier file won; the later one stays put untouched
        assert_eq!(
            fs::read_to_string(root.join("images/250617_pano.png")).unwrap(),
            "first"
        );
        assert!(root.join("files/2025/250617_second/pano.png").exists());
    }

    #[test]
    fn second_run_finds_nothing_left_to_move() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_file(&root.join("files/2025/250617_zuoz/panorama.png"), "png");

        let layout = JournalLayout::default();
        relocate_assets(&layout, root).unwrap();
        let second = relocate_assets(&layout, root).unwrap();

        assert!(second.moved.is_empty());
        assert!(second.collisions.is_empty());
    }

    #[test]
    fn fails_without_a_documents_subtree() {
        let dir = tempdir().unwrap();
        let layout = JournalLayout::default();
        assert!(relocate_assets(&layout, dir.path()).is_err());
    }
}
