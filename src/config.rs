//! Project configuration loader for describing the journal tree layout.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::project::JournalLayout;

const DEFAULT_CONFIG_FILE: &str = "journal.yaml";

/// Discoverable project configuration naming the managed directories.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory under the tree root containing per-trip documents.
    pub documents_dir: String,
    /// Flat directory under the tree root receiving relocated assets.
    pub asset_dir: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            documents_dir: "files".into(),
            asset_dir: "images".into(),
        }
    }
}

impl ProjectConfig {
    /// Attempt to load configuration from the provided tree root.
    ///
    /// When the configuration file does not exist or fails to parse we fall
    /// back to default values so downstream callers can continue operating
    /// with sensible assumptions.
    pub fn discover(tree_root: &Path) -> Self {
        let candidate = tree_root.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific YAML file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_yaml::from_str(&content).ok()
    }

    /// Convert the configuration into an owned layout description.
    pub fn into_layout(self) -> JournalLayout {
        JournalLayout {
            documents_dir: self.documents_dir,
            asset_dir: self.asset_dir,
        }
    }
}
