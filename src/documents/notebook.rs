//! Loading, editing and saving structured notebook documents.
//!
//! Notebooks are handled as raw JSON values so that every field the toolkit
//! does not understand survives a rewrite byte-for-byte. Key order is
//! preserved by `serde_json`'s `preserve_order` feature, and files are saved
//! with the conventional one-space indentation of the notebook format.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::references::ContentRegion;

/// Load a notebook document as a JSON value, preserving key order.
pub fn load(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse notebook {}", path.display()))
}

/// Persist a notebook document with one-space indentation.
pub fn save(path: &Path, notebook: &Value) -> Result<()> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    notebook
        .serialize(&mut serializer)
        .with_context(|| format!("failed to serialise notebook {}", path.display()))?;
    buffer.push(b'\n');
    fs::write(path, buffer).with_context(|| format!("failed to write {}", path.display()))
}

/// Map a notebook cell type onto the content region grammars are selected by.
pub fn cell_region(cell_type: &str) -> Option<ContentRegion> {
    match cell_type {
        "markdown" => Some(ContentRegion::Markdown),
        "code" => Some(ContentRegion::Code),
        _ => None,
    }
}

/// Apply `edit` to every source line of every markdown and code cell.
///
/// Cell order, cell types and every field other than the edited source lines
/// are preserved verbatim. Cells whose `source` is not a list of strings are
/// left untouched. Returns whether any line changed.
pub fn edit_cells(
    notebook: &mut Value,
    mut edit: impl FnMut(ContentRegion, &str) -> String,
) -> bool {
    let Some(cells) = notebook.get_mut("cells").and_then(Value::as_array_mut) else {
        return false;
    };

    let mut changed = false;
    for cell in cells.iter_mut() {
        let Some(region) = cell
            .get("cell_type")
            .and_then(Value::as_str)
            .and_then(cell_region)
        else {
            continue;
        };
        let Some(lines) = cell.get_mut("source").and_then(Value::as_array_mut) else {
            continue;
        };
        for line in lines.iter_mut() {
            let Some(text) = line.as_str() else { continue };
            let updated = edit(region, text);
            if updated != text {
                *line = Value::String(updated);
                changed = true;
            }
        }
    }
    changed
}

/// Visit every source line of every markdown and code cell.
pub fn visit_cells(notebook: &Value, mut visit: impl FnMut(ContentRegion, &str)) {
    let Some(cells) = notebook.get("cells").and_then(Value::as_array) else {
        return;
    };
    for cell in cells {
        let Some(region) = cell
            .get("cell_type")
            .and_then(Value::as_str)
            .and_then(cell_region)
        else {
            continue;
        };
        let Some(lines) = cell.get("source").and_then(Value::as_array) else {
            continue;
        };
        for line in lines {
            if let Some(text) = line.as_str() {
                visit(region, text);
            }
        }
    }
}
