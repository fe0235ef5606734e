// src/scanners/mod.rs
//! Per-language scanner plugins. The set is closed and registered at build
//! time; each plugin is stateless and never mutates its inputs.

pub mod config;
pub mod css;
pub mod javascript;
pub mod markdown;
pub mod python;

use crate::config::Config as SweepConfig;
use crate::types::ScanResult;
use std::path::PathBuf;

/// The capability every language scanner implements.
///
/// `files` is the slice of the discovered set matching this scanner's
/// extensions; `all_files` is the full discovered set (needed for
/// resolution and cross-language checks). A plugin skips unreadable or
/// malformed files silently; per-file failures are never scan failures.
pub trait ScannerPlugin: Sync {
    fn name(&self) -> &'static str;

    /// File-name suffixes this scanner claims.
    fn extensions(&self) -> &'static [&'static str];

    fn scan(&self, files: &[PathBuf], all_files: &[PathBuf], config: &SweepConfig) -> ScanResult;
}

/// Builds the enabled plugin list in fixed registration order.
#[must_use]
pub fn enabled_plugins(config: &SweepConfig) -> Vec<Box<dyn ScannerPlugin>> {
    let mut plugins: Vec<Box<dyn ScannerPlugin>> = Vec::new();
    if config.scanners.python {
        plugins.push(Box::new(python::PythonScanner));
    }
    if config.scanners.javascript {
        plugins.push(Box::new(javascript::JavaScriptScanner));
    }
    if config.scanners.markdown {
        plugins.push(Box::new(markdown::MarkdownScanner));
    }
    if config.scanners.config {
        plugins.push(Box::new(config::ConfigScanner));
    }
    if config.scanners.css {
        plugins.push(Box::new(css::CssScanner));
    }
    plugins
}

/// 1-based line number of a byte offset, by counting preceding newlines.
#[must_use]
pub(crate) fn line_number(content: &str, offset: usize) -> usize {
    content.as_bytes()[..offset.min(content.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_number_is_one_based() {
        let content = "a\nb\nc";
        assert_eq!(line_number(content, 0), 1);
        assert_eq!(line_number(content, 2), 2);
        assert_eq!(line_number(content, 4), 3);
    }
}
