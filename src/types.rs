// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// How severe a finding is. Drives console coloring and the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    DeadFile,
    StaleReference,
    UnusedDependency,
    UnusedExport,
    DocDrift,
    Modularity,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::DeadFile => "dead-file",
            Category::StaleReference => "stale-reference",
            Category::UnusedDependency => "unused-dependency",
            Category::UnusedExport => "unused-export",
            Category::DocDrift => "doc-drift",
            Category::Modularity => "modularity",
        };
        write!(f, "{s}")
    }
}

/// How trustworthy an unused-export finding is. High-confidence findings are
/// safe to act on automatically; low-confidence ones are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        write!(f, "{s}")
    }
}

/// What the cleanup workflow may do with an issue. `Skip` issues are
/// advisory-only and never touched by `clean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Delete,
    Update,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FixKind {
    RemoveImport,
    RemoveLink,
    RemoveDependency,
}

/// A mechanical remediation attached to an `Update` issue. The target string
/// is sufficient to locate what to remove without re-parsing the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fix {
    #[serde(rename = "type")]
    pub kind: FixKind,
    pub target: String,
}

/// A single hygiene finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub category: Category,
    pub severity: Severity,
    pub file_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// How this file connects to an entry point, for diagnostic display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<PathBuf>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Function,
    Class,
    Variable,
    Type,
    Default,
    Module,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SymbolKind::Function => "function",
            SymbolKind::Class => "class",
            SymbolKind::Variable => "variable",
            SymbolKind::Type => "type",
            SymbolKind::Default => "default",
            SymbolKind::Module => "module",
        };
        write!(f, "{s}")
    }
}

/// A symbol a file declares for consumption by other files.
#[derive(Debug, Clone)]
pub struct ExportedSymbol {
    pub name: String,
    pub file_path: PathBuf,
    pub line: Option<usize>,
    pub kind: SymbolKind,
}

/// Where an import specifier ended up after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The specifier names a file inside the project.
    Local(PathBuf),
    /// Verified non-local: a package, stdlib module, or URL. Never reported
    /// as broken.
    External,
}

/// One import (or doc link) record extracted from a file.
///
/// `resolved` is `None` only when the specifier looked local and resolution
/// failed. Bare/package specifiers must be recorded as
/// `Some(Resolution::External)`.
#[derive(Debug, Clone)]
pub struct ImportedSymbol {
    pub name: String,
    pub from_module: String,
    pub file_path: PathBuf,
    pub line: Option<usize>,
    pub resolved: Option<Resolution>,
}

impl ImportedSymbol {
    /// The local file this import resolves to, if any.
    #[must_use]
    pub fn local_target(&self) -> Option<&PathBuf> {
        match &self.resolved {
            Some(Resolution::Local(path)) => Some(path),
            _ => None,
        }
    }
}

/// Output of one scanner plugin over its slice of the file set.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub exports: Vec<ExportedSymbol>,
    pub imports: Vec<ImportedSymbol>,
    pub issues: Vec<Issue>,
}

impl ScanResult {
    /// Folds another result into this one, preserving per-file ordering.
    pub fn merge(&mut self, other: ScanResult) {
        self.files.extend(other.files);
        self.exports.extend(other.exports);
        self.imports.extend(other.imports);
        self.issues.extend(other.issues);
    }
}

/// Aggregate per-category counts for a finished scan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub dead_files: usize,
    pub stale_refs: usize,
    pub unused_deps: usize,
    pub unused_exports: usize,
    pub doc_drift: usize,
    pub modularity_issues: usize,
}

/// Immutable snapshot of one scan. Consumers filter copies, never mutate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Unix timestamp (seconds) at scan start.
    pub timestamp: u64,
    pub root_dir: PathBuf,
    pub duration_ms: u128,
    pub scanners: Vec<String>,
    pub issues: Vec<Issue>,
    pub stats: ScanStats,
}

impl ScanReport {
    #[must_use]
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    #[must_use]
    pub fn count_by_category(&self, category: Category) -> usize {
        self.issues.iter().filter(|i| i.category == category).count()
    }

    /// Returns true if any error-severity issue was found.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.count_by_severity(Severity::Error) > 0
    }
}

/// File names treated as always-reachable roots when seen anywhere in the
/// project, in addition to user-configured entry points.
pub const KNOWN_ENTRY_POINTS: &[&str] = &[
    // Python
    "main.py", "app.py", "server.py", "wsgi.py", "asgi.py",
    "manage.py", "cli.py", "__main__.py", "setup.py",
    // JavaScript/TypeScript
    "index.js", "index.ts", "index.tsx", "main.js", "main.ts",
    "app.js", "app.ts", "server.js", "server.ts",
    "cli.js", "cli.ts",
];
