//! Directory layout description for a journal tree.

use std::path::{Path, PathBuf};

/// Names of the directories every pass agrees on.
///
/// The tree root contains the documents subtree and the flat asset directory
/// side by side; all relative traversal prefixes are computed against that
/// root.
#[derive(Debug, Clone)]
pub struct JournalLayout {
    /// Directory under the tree root holding the per-trip documents.
    pub documents_dir: String,
    /// Flat directory under the tree root holding all relocated assets.
    pub asset_dir: String,
}

impl Default for JournalLayout {
    fn default() -> Self {
        Self {
            documents_dir: "files".into(),
            asset_dir: "images".into(),
        }
    }
}

impl JournalLayout {
    /// Absolute path of the documents subtree.
    pub fn documents_root(&self, tree_root: &Path) -> PathBuf {
        tree_root.join(&self.documents_dir)
    }

    /// Absolute path of the flat asset directory.
    pub fn asset_root(&self, tree_root: &Path) -> PathBuf {
        tree_root.join(&self.asset_dir)
    }

    /// Number of directory levels between `directory` and the tree root.
    ///
    /// Returns `None` when `directory` does not live under the root.
    pub fn tree_depth(&self, tree_root: &Path, directory: &Path) -> Option<usize> {
        directory
            .strip_prefix(tree_root)
            .ok()
            .map(|relative| relative.components().count())
    }

    /// Relative prefix reaching the asset directory from `depth` levels down.
    pub fn traversal_prefix(&self, depth: usize) -> String {
        format!("{}{}", "../".repeat(depth), self.asset_dir)
    }
}
