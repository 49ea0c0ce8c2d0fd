//! Document discovery and format handling for the journal tree.

pub mod notebook;
mod scan;

pub use scan::{DocumentEntry, DocumentKind, collect_documents, document_kind};
