//! mathanno CLI
//!
//! Command-line tooling around the annotation data layer:
//! - `agreement`: inter-annotator agreement between two annotation sets
//! - `analyze`: descriptive statistics for a paper's data files
//! - `sog`: grounding-span analysis, optionally listing the cited text
//! - `migrate`: batch schema migration of a data directory (v0.2 → v1.0)

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod agreement;
mod analyze;
mod migrate;
mod paths;
mod sog;

#[derive(Parser)]
#[command(name = "mathanno")]
#[command(author, version, about = "Annotation tooling for mathematical identifiers")]
struct Cli {
    /// Show debug messages
    #[arg(short, long, global = true)]
    debug: bool,

    /// Show less messages
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Agreement between a reference and a target annotation set for one paper.
    Agreement {
        /// Paper id (e.g. 1808.05415)
        paper_id: String,

        /// Dir for the reference data
        #[arg(short, long, default_value = "./data")]
        reference: PathBuf,

        /// Dir for the target data
        #[arg(short, long)]
        target: PathBuf,

        /// Dir for preprocessed HTML
        #[arg(long, default_value = "./sources")]
        sources: PathBuf,

        /// Show mismatch details
        #[arg(short, long)]
        show_mismatch: bool,
    },

    /// Descriptive statistics for a paper's dictionary and annotation progress.
    Analyze {
        /// Paper id
        paper_id: String,

        /// Dir for the gold data
        #[arg(long, default_value = "./data")]
        data: PathBuf,

        /// Dir for preprocessed HTML
        #[arg(long, default_value = "./sources")]
        sources: PathBuf,
    },

    /// Grounding-span statistics, optionally with the cited text.
    Sog {
        /// Paper id
        paper_id: String,

        /// Dir for the gold data
        #[arg(long, default_value = "./data")]
        data: PathBuf,

        /// Dir for preprocessed HTML
        #[arg(long, default_value = "./sources")]
        sources: PathBuf,

        /// Show actual SoG by concept
        #[arg(short, long)]
        show_sog: bool,
    },

    /// Migrate a data directory from schema v0.2 to v1.0.
    Migrate {
        /// Dir with the original data files
        src: PathBuf,

        /// Dir to create for the migrated files
        dst: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Agreement {
            paper_id,
            reference,
            target,
            sources,
            show_mismatch,
        } => agreement::run(&paper_id, &reference, &target, &sources, show_mismatch),
        Commands::Analyze {
            paper_id,
            data,
            sources,
        } => analyze::run(&paper_id, &data, &sources),
        Commands::Sog {
            paper_id,
            data,
            sources,
            show_sog,
        } => sog::run(&paper_id, &data, &sources, show_sog),
        Commands::Migrate { src, dst } => migrate::run(&src, &dst),
    }
}
