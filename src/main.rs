//! Command-line interface for the journal asset pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trip_asset_pipeline::models::{RelocationReport, RewriteReport, VerifyReport};
use trip_asset_pipeline::{
    ProjectConfig, links, relocate_assets, rewrite_references, run_pipeline, verify_references,
};

#[derive(Parser)]
#[command(
    name = "trip-assets",
    version,
    about = "Relocate journal image assets and keep document references consistent"
)]
struct Cli {
    /// Journal tree root; defaults to the current directory.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move trip-folder images into the flat asset directory.
    Relocate,
    /// Rewrite local image references to the relocated layout.
    Rewrite,
    /// Check that every image reference resolves on disk.
    Verify,
    /// Run relocate, rewrite and verify in order.
    Run,
    /// Print Swisstopo web and app links for a published GPX track.
    Link {
        /// Map centre latitude.
        #[arg(long)]
        lat: f64,
        /// Map centre longitude.
        #[arg(long)]
        lon: f64,
        /// Public URL of the GPX track.
        #[arg(long)]
        track_url: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let tree_root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let layout = ProjectConfig::discover(&tree_root).into_layout();

    match cli.command {
        Commands::Relocate => {
            let report = relocate_assets(&layout, &tree_root)?;
            print_relocation(&report);
        }
        Commands::Rewrite => {
            let report = rewrite_references(&layout, &tree_root)?;
            print_rewrite(&report);
        }
        Commands::Verify => {
            let report = verify_references(&layout, &tree_root)?;
            print_verify(&report);
            if !report.is_clean() {
                std::process::exit(1);
            }
        }
        Commands::Run => {
            let report = run_pipeline(&layout, &tree_root)?;
            print_relocation(&report.relocation);
            print_rewrite(&report.rewrite);
            print_verify(&report.verify);
            if !report.verify.is_clean() {
                std::process::exit(1);
            }
        }
        Commands::Link {
            lat,
            lon,
            track_url,
        } => {
            println!("{}", links::map_url((lat, lon), &track_url));
            println!("{}", links::app_link(&track_url));
        }
    }
    Ok(())
}

fn print_relocation(report: &RelocationReport) {
    println!(
        "Moved {} images ({} collisions, {} skipped).",
        report.moved.len(),
        report.collisions.len(),
        report.skipped_no_prefix.len()
    );
}

fn print_rewrite(report: &RewriteReport) {
    println!(
        "Rewrote {} references in {} of {} documents.",
        report.references_rewritten,
        report.documents_updated.len(),
        report.documents_seen
    );
}

fn print_verify(report: &VerifyReport) {
    println!("Checked {} documents.", report.documents_checked);
    if report.is_clean() {
        println!("No broken references found.");
    } else {
        println!("Found {} broken references:", report.broken.len());
        for broken in &report.broken {
            println!("  in {}: {}", broken.document.display(), broken.reference);
        }
    }
}
