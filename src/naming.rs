//! Folder and file naming conventions shared by the relocation and rewrite passes.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// File extensions treated as relocatable image assets.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

fn date_prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{6})_").expect("invalid date prefix regex"))
}

/// Extract the six-digit date prefix from a trip folder name.
///
/// Trip folders are named `NNNNNN_slug` (`250617_oberengadin`). Folders that do
/// not follow the convention yield `None` and are excluded from relocation and
/// rewriting alike, so both passes must call this same function.
pub fn date_prefix(folder_name: &str) -> Option<&str> {
    date_prefix_pattern()
        .captures(folder_name)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str())
}

/// Whether a file name carries one of the managed image extensions.
pub fn is_image_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| extension.eq_ignore_ascii_case(allowed))
        })
}
