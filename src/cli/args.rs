// src/cli/args.rs
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codesweep", version, about = "Dead code detector and codebase hygiene tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the codebase for dead code and hygiene issues
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Scan only one language: python, js, docs, css, config
        #[arg(long)]
        only: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,
    },
    /// Fix actionable issues found by a fresh scan
    Clean {
        /// Directory to clean
        #[arg(default_value = ".")]
        dir: PathBuf,
        /// Preview changes without modifying files
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the last cached scan report
    Report {
        /// Project directory
        #[arg(default_value = ".")]
        dir: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,
        /// Drill into one category: dead-files, unused-exports, stale-refs,
        /// unused-deps, doc-drift, modularity
        #[arg(long)]
        detail: Option<String>,
    },
    /// Write a starter codesweep.toml
    Init {
        /// Project directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}
