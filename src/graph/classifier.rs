// src/graph/classifier.rs
//! Confidence classification for unused-export candidates.
//!
//! Rules are evaluated in order and the first match wins. Rule order is
//! load-bearing: a barrel file's sole type export must classify as a barrel,
//! not as a type export or a sole export.

use crate::types::{Confidence, ExportedSymbol, Severity, SymbolKind};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Re-export barrels: unused exports are usually intentional API surface.
static BARREL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^index\.[jt]sx?$").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Test naming conventions: `foo.test.ts`, `foo.spec.jsx`.
static TEST_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(test|spec)\.[jt]sx?$").unwrap_or_else(|_| panic!("Invalid Regex"))
});

#[derive(Debug, Clone)]
pub struct Classification {
    pub confidence: Confidence,
    pub reason: String,
}

/// Assigns a confidence level and human-readable reason to one unused-export
/// candidate.
#[must_use]
pub fn classify(file_path: &Path, symbol: &ExportedSymbol, total_exports: usize) -> Classification {
    let basename = file_path.file_name().map_or("", |n| n.to_str().unwrap_or(""));

    if BARREL_RE.is_match(basename) {
        return Classification {
            confidence: Confidence::Low,
            reason: "Barrel file - re-exports are intentional API surface".to_string(),
        };
    }

    if TEST_FILE_RE.is_match(basename) || in_test_directory(file_path) {
        return Classification {
            confidence: Confidence::Low,
            reason: "Test helper - not expected to be imported by production code".to_string(),
        };
    }

    if symbol.kind == SymbolKind::Type {
        return Classification {
            confidence: Confidence::Medium,
            reason: format!(
                "Type export '{}' may be consumed via declaration merging or inference",
                symbol.name
            ),
        };
    }

    if total_exports == 1 {
        return Classification {
            confidence: Confidence::High,
            reason: "Only export in this file - the entire file may be dead code".to_string(),
        };
    }

    Classification {
        confidence: Confidence::High,
        reason: format!(
            "Export '{}' is not imported by any other file in the project",
            symbol.name
        ),
    }
}

fn in_test_directory(file_path: &Path) -> bool {
    file_path.components().any(|c| {
        matches!(
            c.as_os_str().to_str(),
            Some("__tests__" | "tests" | "test")
        )
    })
}

/// High-confidence findings surface as warnings; the rest are informational.
#[must_use]
pub fn severity_for(confidence: Confidence) -> Severity {
    match confidence {
        Confidence::High => Severity::Warning,
        Confidence::Medium | Confidence::Low => Severity::Info,
    }
}
