use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Structured notebook document with ordered cells (`.ipynb`).
    Notebook,
    /// Flat markup document (`.md`, `.qmd`).
    Markup,
}

/// One document discovered while walking the tree.
#[derive(Debug, Clone)]
pub struct DocumentEntry {
    /// Absolute path of the document.
    pub path: PathBuf,
    /// Detected format.
    pub kind: DocumentKind,
}

/// Detect the document format from the file extension.
pub fn document_kind(path: &Path) -> Option<DocumentKind> {
    match path.extension().and_then(|extension| extension.to_str())? {
        "ipynb" => Some(DocumentKind::Notebook),
        "md" | "qmd" => Some(DocumentKind::Markup),
        _ => None,
    }
}

/// Walk the documents subtree collecting every supported document.
///
/// Entries are visited in name order so reports are deterministic. Hidden
/// entries (checkpoint directories and the like) are skipped. A directory
/// that cannot be read is logged and skipped; the walk continues.
pub fn collect_documents(root: &Path) -> Vec<DocumentEntry> {
    let mut documents = Vec::new();
    collect_into(root, &mut documents);
    documents
}

fn collect_into(dir: &Path, documents: &mut Vec<DocumentEntry>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("skipping unreadable directory {}: {err}", dir.display());
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries
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
            collect_into(&path, documents);
        } else if let Some(kind) = document_kind(&path) {
            documents.push(DocumentEntry { path, kind });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn detects_formats_by_extension() {
        assert_eq!(
            document_kind(Path::new("tour.ipynb")),
            Some(DocumentKind::Notebook)
        );
        assert_eq!(
            document_kind(Path::new("notes.md")),
            Some(DocumentKind::Markup)
        );
        assert_eq!(
            document_kind(Path::new("page.qmd")),
            Some(DocumentKind::Markup)
        );
        assert_eq!(document_kind(Path::new("photo.png")), None);
    }

    #[test]
    fn collects_documents_recursively_in_name_order() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("2025/250617_zuoz")).unwrap();
        fs::write(root.join("2025/250617_zuoz/tour.ipynb"), "{}").unwrap();
        fs::write(root.join("2025/250617_zuoz/notes.md"), "").unwrap();
        fs::write(root.join("2025/250617_zuoz/photo.png"), "png").unwrap();
        fs::write(root.join("2025/2025.qmd"), "").unwrap();

        let documents = collect_documents(root);
        let names: Vec<_> = documents
            .iter()
            .map(|entry| entry.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["2025.qmd", "notes.md", "tour.ipynb"]);
    }

    #[test]
    fn skips_hidden_checkpoint_directories() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".ipynb_checkpoints")).unwrap();
        fs::write(
            root.join(".ipynb_checkpoints/tour-checkpoint.ipynb"),
            "{}",
        )
        .unwrap();
        fs::write(root.join("tour.ipynb"), "{}").unwrap();

        let documents = collect_documents(root);
        assert_eq!(documents.len(), 1);
        assert!(documents[0].path.ends_with("tour.ipynb"));
    }
}
