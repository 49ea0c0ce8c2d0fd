//! Verification that every extracted reference resolves on disk.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Result, ensure};
use tracing::warn;

use crate::documents::{DocumentKind, collect_documents, notebook};
use crate::models::{BrokenReference, VerifyReport};
use crate::project::JournalLayout;
use crate::references::{
    MarkdownGrammar, ReferenceGrammar, ReferenceKind, ReferenceMatch, grammar_for,
};

/// Re-extract every image reference under the documents subtree and resolve
/// it against the filesystem.
///
/// This pass shares its extraction grammars with the rewrite pass and
/// performs no writes. External references are ignored, absolute references
/// are checked for direct existence, and everything else resolves relative
/// to its owning document's directory.
pub fn verify_references(layout: &JournalLayout, tree_root: &Path) -> Result<VerifyReport> {
    let documents_root = layout.documents_root(tree_root);
    ensure!(
        documents_root.is_dir(),
        "documents subtree not found at {}",
        documents_root.display()
    );

    let mut report = VerifyReport::default();
    for entry in collect_documents(&documents_root) {
        report.documents_checked += 1;

        let references = match entry.kind {
            DocumentKind::Notebook => match notebook::load(&entry.path) {
                Ok(document) => {
                    let mut collected = Vec::new();
                    notebook::visit_cells(&document, |region, line| {
                        collected.extend(grammar_for(region).extract(line, &layout.asset_dir));
                    });
                    collected
                }
                Err(err) => {
                    warn!("skipping {}: {err:#}", entry.path.display());
                    continue;
                }
            },
            DocumentKind::Markup => match fs::read_to_string(&entry.path) {
                Ok(content) => MarkdownGrammar.extract(&content, &layout.asset_dir),
                Err(err) => {
                    warn!("skipping {}: {err}", entry.path.display());
                    continue;
                }
            },
        };

        let document_dir = entry.path.parent().unwrap_or(Path::new(""));
        for reference in references {
            if !resolves(&reference, document_dir) {
                report.broken.push(BrokenReference {
                    document: entry.path.clone(),
                    reference: reference.path,
                });
            }
        }
    }
    Ok(report)
}

/// Whether one reference resolves. External references always do, by
/// definition of the pass ignoring them.
fn resolves(reference: &ReferenceMatch, document_dir: &Path) -> bool {
    match reference.kind {
        ReferenceKind::External => true,
        ReferenceKind::Absolute => Path::new(&reference.path).exists(),
        ReferenceKind::Relocated | ReferenceKind::LocalAsset => {
            normalize(&document_dir.join(&reference.path)).exists()
        }
    }
}

/// Lexically resolve `.` and `..` components without touching the
/// filesystem, so a dangling target still yields a checkable path.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
