//! Rewriting of local image references to the relocated asset layout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use tracing::{debug, info, warn};

use crate::documents::{DocumentKind, collect_documents, notebook};
use crate::models::RewriteReport;
use crate::naming::date_prefix;
use crate::project::JournalLayout;
use crate::references::{MarkdownGrammar, ReferenceGrammar, RewriteRule, grammar_for};

/// Rewrite every local-asset reference under the documents subtree to point
/// into the flat asset directory.
///
/// A document is only eligible when its own folder carries a date prefix,
/// mirroring the renaming rule of the relocation pass; other folders are
/// skipped entirely so a document is never partially rewritten with a
/// guessed prefix. Documents are persisted only when at least one reference
/// changed, keeping untouched files byte-for-byte identical.
pub fn rewrite_references(layout: &JournalLayout, tree_root: &Path) -> Result<RewriteReport> {
    let documents_root = layout.documents_root(tree_root);
    ensure!(
        documents_root.is_dir(),
        "documents subtree not found at {}",
        documents_root.display()
    );

    let mut report = RewriteReport::default();
    for entry in collect_documents(&documents_root) {
        report.documents_seen += 1;

        let Some(folder) = entry.path.parent() else {
            continue;
        };
        let Some(prefix) = folder
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(date_prefix)
        else {
            debug!(
                "skipping {} (no date prefix in folder name)",
                entry.path.display()
            );
            continue;
        };
        let Some(depth) = layout.tree_depth(tree_root, folder) else {
            continue;
        };

        let traversal = layout.traversal_prefix(depth);
        let rule = RewriteRule {
            traversal_prefix: &traversal,
            date_prefix: prefix,
        };

        let outcome = match entry.kind {
            DocumentKind::Notebook => rewrite_notebook(&entry.path, layout, &rule),
            DocumentKind::Markup => rewrite_markup(&entry.path, layout, &rule),
        };
        match outcome {
            Ok(0) => {}
            Ok(count) => {
                info!("updated {} ({count} references)", entry.path.display());
                report.references_rewritten += count;
                report.documents_updated.push(entry.path.clone());
            }
            Err(err) => warn!("skipping {}: {err:#}", entry.path.display()),
        }
    }
    Ok(report)
}

fn rewrite_notebook(path: &Path, layout: &JournalLayout, rule: &RewriteRule<'_>) -> Result<usize> {
    let mut document = notebook::load(path)?;
    let mut rewritten = 0;
    let changed = notebook::edit_cells(&mut document, |region, line| {
        let (updated, count) = grammar_for(region).rewrite(line, &layout.asset_dir, rule);
        rewritten += count;
        updated
    });
    if changed {
        notebook::save(path, &document)?;
    }
    Ok(rewritten)
}

fn rewrite_markup(path: &Path, layout: &JournalLayout, rule: &RewriteRule<'_>) -> Result<usize> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (updated, count) = MarkdownGrammar.rewrite(&content, &layout.asset_dir, rule);
    if count > 0 && updated != content {
        fs::write(path, &updated).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(count)
}
