use std::ops::Range;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::references::classify::{ReferenceKind, classify_reference};

/// Content region a grammar is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRegion {
    /// Markdown text: notebook cells tagged `markdown` and whole markup documents.
    Markdown,
    /// Code text: notebook cells tagged `code`.
    Code,
}

/// One image reference located inside a piece of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    /// Byte span of the path inside the scanned text.
    pub span: Range<usize>,
    /// The referenced path, exactly as written.
    pub path: String,
    /// Classification of the path against the asset directory.
    pub kind: ReferenceKind,
}

/// Replacement parameters derived from one document's location.
#[derive(Debug, Clone, Copy)]
pub struct RewriteRule<'a> {
    /// Relative prefix reaching the asset directory, e.g. `../../images`.
    pub traversal_prefix: &'a str,
    /// Date prefix of the document's trip folder, e.g. `250617`.
    pub date_prefix: &'a str,
}

impl RewriteRule<'_> {
    /// Relocated form of a reference: the traversal prefix, then the date
    /// prefix applied to the file name. Folder components of the original
    /// reference are dropped, mirroring how the relocation pass flattens
    /// trip folders into the asset directory.
    fn relocated_path(&self, original: &str) -> String {
        let file_name = original
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(original);
        format!("{}/{}_{}", self.traversal_prefix, self.date_prefix, file_name)
    }
}

/// Extraction and rewrite strategy for one content region.
pub trait ReferenceGrammar {
    /// Locate every image reference in `text`, classified against `asset_dir`.
    fn extract(&self, text: &str, asset_dir: &str) -> Vec<ReferenceMatch>;

    /// Rewrite every local-asset reference in `text` according to `rule`.
    ///
    /// Returns the rewritten text and the number of references changed. All
    /// non-reference content, and every reference that is not a local asset,
    /// is preserved verbatim.
    fn rewrite(&self, text: &str, asset_dir: &str, rule: &RewriteRule<'_>) -> (String, usize);
}

/// Pick the grammar for a content region.
pub fn grammar_for(region: ContentRegion) -> &'static dyn ReferenceGrammar {
    match region {
        ContentRegion::Markdown => &MarkdownGrammar,
        ContentRegion::Code => &CodeLiteralGrammar,
    }
}

fn markdown_embed_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"!\[([^\]]*)\]\(([^)]+\.(?:png|jpg|jpeg|gif|webp))\)")
            .expect("invalid markdown embed regex")
    })
}

fn quoted_literal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(['"])([^'"]+\.(?:png|jpg|jpeg|gif|webp))(['"])"#)
            .expect("invalid quoted literal regex")
    })
}

/// Grammar matching markdown image embeds, `![alt](path)`.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownGrammar;

impl ReferenceGrammar for MarkdownGrammar {
    fn extract(&self, text: &str, asset_dir: &str) -> Vec<ReferenceMatch> {
        markdown_embed_pattern()
            .captures_iter(text)
            .filter_map(|captures| reference_from_group(&captures, 2, asset_dir))
            .collect()
    }

    fn rewrite(&self, text: &str, asset_dir: &str, rule: &RewriteRule<'_>) -> (String, usize) {
        let mut rewritten = 0;
        let updated = markdown_embed_pattern().replace_all(text, |captures: &Captures<'_>| {
            let path = &captures[2];
            if classify_reference(path, asset_dir) == ReferenceKind::LocalAsset {
                rewritten += 1;
                format!("![{}]({})", &captures[1], rule.relocated_path(path))
            } else {
                captures[0].to_string()
            }
        });
        (updated.into_owned(), rewritten)
    }
}

/// Grammar matching quoted string literals in code, `'path'` or `"path"`.
///
/// The opening and closing quote must be the same character; a mismatched
/// pair is not a literal and is left untouched.
#[derive(Debug, Clone, Copy)]
pub struct CodeLiteralGrammar;

impl ReferenceGrammar for CodeLiteralGrammar {
    fn extract(&self, text: &str, asset_dir: &str) -> Vec<ReferenceMatch> {
        quoted_literal_pattern()
            .captures_iter(text)
            .filter(|captures| captures[1] == captures[3])
            .filter_map(|captures| reference_from_group(&captures, 2, asset_dir))
            .collect()
    }

    fn rewrite(&self, text: &str, asset_dir: &str, rule: &RewriteRule<'_>) -> (String, usize) {
        let mut rewritten = 0;
        let updated = quoted_literal_pattern().replace_all(text, |captures: &Captures<'_>| {
            let path = &captures[2];
            if captures[1] == captures[3]
                && classify_reference(path, asset_dir) == ReferenceKind::LocalAsset
            {
                rewritten += 1;
                format!("{}{}{}", &captures[1], rule.relocated_path(path), &captures[3])
            } else {
                captures[0].to_string()
            }
        });
        (updated.into_owned(), rewritten)
    }
}

fn reference_from_group(
    captures: &Captures<'_>,
    group: usize,
    asset_dir: &str,
) -> Option<ReferenceMatch> {
    let matched = captures.get(group)?;
    Some(ReferenceMatch {
        span: matched.range(),
        path: matched.as_str().to_string(),
        kind: classify_reference(matched.as_str(), asset_dir),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> RewriteRule<'static> {
        RewriteRule {
            traversal_prefix: "../../images",
            date_prefix: "250617",
        }
    }

    #[test]
    fn rewrites_folder_qualified_references_to_the_flat_name() {
        let (updated, count) = MarkdownGrammar.rewrite(
            "see ![x](250617_zuoz/panorama.png) here",
            "images",
            &rule(),
        );
        assert_eq!(count, 1);
        assert_eq!(updated, "see ![x](../../images/250617_panorama.png) here");
    }

    #[test]
    fn rewrites_bare_filenames_per_the_worked_example() {
        let (updated, count) =
            MarkdownGrammar.rewrite("![x](panorama.png)", "images", &rule());
        assert_eq!(count, 1);
        assert_eq!(updated, "![x](../../images/250617_panorama.png)");
    }

    #[test]
    fn never_prefixes_a_relocated_reference_twice() {
        let text = "![x](../../images/250617_panorama.png)";
        let (updated, count) = MarkdownGrammar.rewrite(text, "images", &rule());
        assert_eq!(count, 0);
        assert_eq!(updated, text);
    }

    #[test]
    fn leaves_external_and_absolute_references_untouched() {
        let text = "![a](https://example.com/a.png) ![b](/srv/b.png)";
        let (updated, count) = MarkdownGrammar.rewrite(text, "images", &rule());
        assert_eq!(count, 0);
        assert_eq!(updated, text);
    }

    #[test]
    fn extracts_spans_and_classifications() {
        let text = "![a](pic.png) and ![b](images/250617_pic.png)";
        let matches = MarkdownGrammar.extract(text, "images");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].path, "pic.png");
        assert_eq!(matches[0].kind, ReferenceKind::LocalAsset);
        assert_eq!(&text[matches[0].span.clone()], "pic.png");
        assert_eq!(matches[1].kind, ReferenceKind::Relocated);
    }

    #[test]
    fn rewrites_quoted_literals_in_code() {
        let (updated, count) =
            CodeLiteralGrammar.rewrite("show('elevation.png')", "images", &rule());
        assert_eq!(count, 1);
        assert_eq!(updated, "show('../../images/250617_elevation.png')");

        let (updated, count) =
            CodeLiteralGrammar.rewrite(r#"show("elevation.png")"#, "images", &rule());
        assert_eq!(count, 1);
        assert_eq!(updated, r#"show("../../images/250617_elevation.png")"#);
    }

    #[test]
    fn ignores_mismatched_quote_pairs() {
        let text = r#"broken('pic.png")"#;
        let (updated, count) = CodeLiteralGrammar.rewrite(text, "images", &rule());
        assert_eq!(count, 0);
        assert_eq!(updated, text);
        assert!(CodeLiteralGrammar.extract(text, "images").is_empty());
    }

    #[test]
    fn ignores_literals_without_an_image_extension() {
        let text = "open('track.gpx')";
        let (updated, count) = CodeLiteralGrammar.rewrite(text, "images", &rule());
        assert_eq!(count, 0);
        assert_eq!(updated, text);
    }
}
