//! Sequential orchestration of the three passes.

use std::path::Path;

use anyhow::Result;

use crate::models::{RelocationReport, RewriteReport, VerifyReport};
use crate::project::JournalLayout;
use crate::relocate::relocate_assets;
use crate::rewrite::rewrite_references;
use crate::verify::verify_references;

/// Combined outcome of a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Outcome of the relocation pass.
    pub relocation: RelocationReport,
    /// Outcome of the rewrite pass.
    pub rewrite: RewriteReport,
    /// Outcome of the verification pass.
    pub verify: VerifyReport,
}

/// Run relocate, rewrite and verify in dependency order over one tree.
///
/// The passes communicate only through the filesystem; each re-walks the
/// tree so the sequencing here is the only coupling between them. There is
/// no locking: concurrent invocations over the same tree race and are the
/// caller's responsibility to avoid.
pub fn run_pipeline(layout: &JournalLayout, tree_root: &Path) -> Result<PipelineReport> {
    let relocation = relocate_assets(layout, tree_root)?;
    let rewrite = rewrite_references(layout, tree_root)?;
    let verify = verify_references(layout, tree_root)?;
    Ok(PipelineReport {
        relocation,
        rewrite,
        verify,
    })
}
