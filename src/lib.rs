#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod documents;
pub mod links;
pub mod models;
pub mod naming;
pub mod pipeline;
pub mod project;
pub mod references;
pub mod relocate;
pub mod rewrite;
pub mod verify;

pub use config::ProjectConfig;
pub use pipeline::{PipelineReport, run_pipeline};
pub use project::JournalLayout;
pub use relocate::relocate_assets;
pub use rewrite::rewrite_references;
pub use verify::verify_references;
