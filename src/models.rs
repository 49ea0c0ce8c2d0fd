//! Report types produced by the pipeline passes.

use std::path::PathBuf;

/// A single asset moved by the relocation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedAsset {
    /// Path of the source file relative to the documents subtree.
    pub source: PathBuf,
    /// Date-prefixed file name the asset received in the asset directory.
    pub new_name: String,
}

/// A relocation that was refused because the target name already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Path of the source file relative to the documents subtree.
    pub source: PathBuf,
    /// Target name that was already taken.
    pub target_name: String,
}

/// Outcome of one relocation pass.
#[derive(Debug, Clone, Default)]
pub struct RelocationReport {
    /// Assets actually moved, in walk order, for downstream auditing.
    pub moved: Vec<MovedAsset>,
    /// Image files skipped because their folder carries no date prefix.
    pub skipped_no_prefix: Vec<PathBuf>,
    /// Relocations refused because of a target name collision.
    pub collisions: Vec<Collision>,
}

/// Outcome of one rewrite pass.
#[derive(Debug, Clone, Default)]
pub struct RewriteReport {
    /// Documents visited by the walk, including ones left untouched.
    pub documents_seen: usize,
    /// Documents persisted back to disk because a reference changed.
    pub documents_updated: Vec<PathBuf>,
    /// Total number of references rewritten across all documents.
    pub references_rewritten: usize,
}

/// A reference that failed to resolve against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenReference {
    /// Document containing the reference.
    pub document: PathBuf,
    /// Raw reference text as it appears in the document.
    pub reference: String,
}

/// Outcome of one verification pass.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Number of documents scanned.
    pub documents_checked: usize,
    /// References that did not resolve, in walk order.
    pub broken: Vec<BrokenReference>,
}

impl VerifyReport {
    /// Whether every extracted reference resolved.
    pub fn is_clean(&self) -> bool {
        self.broken.is_empty()
    }
}
