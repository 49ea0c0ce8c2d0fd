use std::sync::OnceLock;

use regex::Regex;

/// How a reference path relates to the managed asset directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Points at a network resource; never rewritten and never resolved.
    External,
    /// Begins with an absolute path marker; checked for direct existence only.
    Absolute,
    /// Already contains the asset directory name; protected from a second rewrite.
    Relocated,
    /// Relative path into a trip folder, the only class subject to rewriting.
    LocalAsset,
}

fn external_reference_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS
        .get_or_init(|| {
            vec![
                Regex::new(r"(?i)^https?://").expect("invalid http(s) regex"),
                Regex::new(r"(?i)^data:").expect("invalid data URI regex"),
            ]
        })
        .as_slice()
}

/// Classify a reference path against the asset directory name.
///
/// Classification happens before any rewrite decision: external and absolute
/// references pass through untouched, and a path that already mentions the
/// asset directory must never be prefixed a second time.
pub fn classify_reference(path: &str, asset_dir: &str) -> ReferenceKind {
    if external_reference_patterns()
        .iter()
        .any(|pattern| pattern.is_match(path))
    {
        ReferenceKind::External
    } else if path.starts_with('/') || path.starts_with('\\') {
        ReferenceKind::Absolute
    } else if path.contains(asset_dir) {
        ReferenceKind::Relocated
    } else {
        ReferenceKind::LocalAsset
    }
}
