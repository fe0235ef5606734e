// src/reporting/cache.rs
//! Last-scan report cache, so `codesweep report` can re-render without
//! rescanning.

use crate::error::{Result, SweepError};
use crate::types::ScanReport;
use std::fs;
use std::path::Path;

pub const CACHE_FILE: &str = ".codesweep-report.json";

/// Saves the report next to the scanned root.
///
/// # Errors
/// Returns error if the report cannot be serialized or written.
pub fn save(report: &ScanReport) -> Result<()> {
    let path = report.root_dir.join(CACHE_FILE);
    let content = serde_json::to_string_pretty(report)?;
    fs::write(&path, content).map_err(|source| SweepError::Io {
        source,
        path: path.clone(),
    })
}

/// Loads the cached report for a root directory.
///
/// # Errors
/// Returns error if no cache exists or it cannot be parsed.
pub fn load(root_dir: &Path) -> Result<ScanReport> {
    let path = root_dir.join(CACHE_FILE);
    let content = fs::read_to_string(&path).map_err(|_| {
        SweepError::Report("no cached report found; run `codesweep scan` first".to_string())
    })?;
    serde_json::from_str(&content)
        .map_err(|e| SweepError::Report(format!("failed to read cached report: {e}")))
}
