// src/reporting/json.rs
use crate::error::Result;
use crate::types::ScanReport;

/// Renders the full report as pretty-printed JSON for machine consumers.
///
/// # Errors
/// Returns error if serialization fails.
pub fn render(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
