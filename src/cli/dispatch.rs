// src/cli/dispatch.rs
use crate::clean::{self, CleanOptions};
use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::config::{default_config_toml, Config, CONFIG_FILE};
use crate::progress::{ConsoleProgress, Progress, SilentProgress};
use crate::reporting::{cache, console, json};
use crate::scan::ScanOrchestrator;
use crate::types::{Category, ScanReport};
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Runs the parsed command and returns the process exit code.
///
/// # Errors
/// Returns error on unrecoverable failures (discovery, rendering, cache
/// writes requested by the command).
pub fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Scan { dir, only, format } => run_scan(&dir, only.as_deref(), format),
        Commands::Clean { dir, dry_run } => run_clean(&dir, dry_run),
        Commands::Report { dir, format, detail } => run_report(&dir, format, detail.as_deref()),
        Commands::Init { dir } => run_init(&dir),
    }
}

fn scan(dir: &Path, only: Option<&str>, progress: &dyn Progress) -> Result<ScanReport> {
    let config = Config::load(dir);
    let mut orchestrator = ScanOrchestrator::new(&config);
    Ok(orchestrator.scan(&config, only, progress)?)
}

fn run_scan(dir: &Path, only: Option<&str>, format: OutputFormat) -> Result<i32> {
    // JSON mode keeps stdout machine-readable.
    let report = match format {
        OutputFormat::Console => scan(dir, only, &ConsoleProgress)?,
        OutputFormat::Json => scan(dir, only, &SilentProgress)?,
    };

    if let Err(e) = cache::save(&report) {
        eprintln!("WARN: could not cache report: {e}");
    }

    render(&report, format)?;
    Ok(i32::from(report.has_errors()))
}

fn run_clean(dir: &Path, dry_run: bool) -> Result<i32> {
    let progress = ConsoleProgress;
    let report = scan(dir, None, &progress)?;
    let summary = clean::run(&report, &CleanOptions { dry_run }, &progress)?;
    Ok(i32::from(summary.failed > 0))
}

fn run_report(dir: &Path, format: OutputFormat, detail: Option<&str>) -> Result<i32> {
    let root = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    let report = match cache::load(&root) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("WARN: {e}");
            return Ok(1);
        }
    };

    if let Some(detail) = detail {
        let Some(category) = parse_category(detail) else {
            eprintln!("WARN: unknown category '{detail}'");
            return Ok(1);
        };
        console::print_category(&report, category);
        return Ok(0);
    }

    render(&report, format)?;
    Ok(0)
}

fn run_init(dir: &Path) -> Result<i32> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        eprintln!("WARN: {CONFIG_FILE} already exists, leaving it alone");
        return Ok(1);
    }
    fs::write(&path, default_config_toml())?;
    println!("Wrote {}", path.display());
    Ok(0)
}

fn render(report: &ScanReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Console => console::print_report(report),
        OutputFormat::Json => println!("{}", json::render(report)?),
    }
    Ok(())
}

fn parse_category(name: &str) -> Option<Category> {
    match name {
        "dead-files" | "dead-file" => Some(Category::DeadFile),
        "stale-refs" | "stale-reference" => Some(Category::StaleReference),
        "unused-deps" | "unused-dependency" => Some(Category::UnusedDependency),
        "unused-exports" | "unused-export" => Some(Category::UnusedExport),
        "doc-drift" => Some(Category::DocDrift),
        "modularity" => Some(Category::Modularity),
        _ => None,
    }
}
