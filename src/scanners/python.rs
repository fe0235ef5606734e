// src/scanners/python.rs
//! Python scanner: top-level `def`/`class` exports, `import`/`from` imports
//! resolved against the project tree, `__all__` drift in `__init__.py`, and
//! unused `requirements.txt` entries.

use crate::config::Config;
use crate::discovery::filter_by_extensions;
use crate::graph::resolver::resolve_python_import;
use crate::scanners::{line_number, ScannerPlugin};
use crate::types::{
    Action, Category, ExportedSymbol, Fix, FixKind, ImportedSymbol, Issue, Resolution, ScanResult,
    Severity, SymbolKind,
};
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^import\s+([\w.]+)").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static FROM_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^from\s+([\w.]+)\s+import\s+(.+)").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(def|class)\s+(\w+)").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static ALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)__all__\s*=\s*\[([^\]]*)\]").unwrap_or_else(|_| panic!("Invalid Regex"))
});

pub struct PythonScanner;

impl ScannerPlugin for PythonScanner {
    fn name(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".py"]
    }

    fn scan(&self, files: &[PathBuf], all_files: &[PathBuf], config: &Config) -> ScanResult {
        let all_file_set: HashSet<PathBuf> = all_files.iter().cloned().collect();

        let fragments: Vec<FileFragment> = files
            .par_iter()
            .filter_map(|file| scan_file(file, &all_file_set, config))
            .collect();

        let mut result = ScanResult {
            files: files.to_vec(),
            ..ScanResult::default()
        };
        let mut top_level_modules: HashSet<String> = HashSet::new();
        for frag in fragments {
            result.exports.extend(frag.exports);
            result.imports.extend(frag.imports);
            result.issues.extend(frag.issues);
            top_level_modules.extend(frag.top_level_modules);
        }

        check_requirements(all_files, &top_level_modules, &mut result.issues);

        result
    }
}

#[derive(Default)]
struct FileFragment {
    exports: Vec<ExportedSymbol>,
    imports: Vec<ImportedSymbol>,
    issues: Vec<Issue>,
    /// First segments of every imported module, for the requirements check.
    top_level_modules: HashSet<String>,
}

fn scan_file(file: &Path, all_files: &HashSet<PathBuf>, config: &Config) -> Option<FileFragment> {
    let content = fs::read_to_string(file).ok()?;
    let mut frag = FileFragment::default();

    for caps in DEF_RE.captures_iter(&content) {
        let keyword = caps.get(1).map_or("", |m| m.as_str());
        let name = caps.get(2).map_or("", |m| m.as_str());
        frag.exports.push(ExportedSymbol {
            name: name.to_string(),
            file_path: file.to_path_buf(),
            line: caps.get(0).map(|m| line_number(&content, m.start())),
            kind: if keyword == "class" {
                SymbolKind::Class
            } else {
                SymbolKind::Function
            },
        });
    }

    for caps in IMPORT_RE.captures_iter(&content) {
        let module_path = caps.get(1).map_or("", |m| m.as_str());
        let line = caps.get(0).map(|m| line_number(&content, m.start()));
        record_top_level(&mut frag.top_level_modules, module_path);
        frag.imports.push(ImportedSymbol {
            name: module_path.rsplit('.').next().unwrap_or(module_path).to_string(),
            from_module: module_path.to_string(),
            file_path: file.to_path_buf(),
            line,
            resolved: Some(resolve_module(module_path, config, all_files)),
        });
    }

    for caps in FROM_IMPORT_RE.captures_iter(&content) {
        let module_path = caps.get(1).map_or("", |m| m.as_str());
        let names = caps.get(2).map_or("", |m| m.as_str());
        let line = caps.get(0).map(|m| line_number(&content, m.start()));
        record_top_level(&mut frag.top_level_modules, module_path);
        let resolved = resolve_module(module_path, config, all_files);

        for raw in names.split(',') {
            let name = raw.trim().split(" as ").next().unwrap_or("").trim();
            if name.is_empty() || name == "(" || name == ")" || name == "\\" {
                continue;
            }
            frag.imports.push(ImportedSymbol {
                name: name.to_string(),
                from_module: module_path.to_string(),
                file_path: file.to_path_buf(),
                line,
                resolved: Some(resolved.clone()),
            });
        }
    }

    if file.file_name().is_some_and(|n| n == "__init__.py") {
        check_init_all(file, &content, all_files, &mut frag.issues);
    }

    let line_count = content.lines().count();
    if line_count > config.thresholds.max_file_lines {
        frag.issues.push(Issue {
            category: Category::Modularity,
            severity: Severity::Info,
            file_path: file.to_path_buf(),
            line: None,
            message: format!(
                "File has {line_count} lines (threshold: {})",
                config.thresholds.max_file_lines
            ),
            action: Action::Skip,
            fix: None,
            confidence: None,
            reason: None,
            trace: None,
        });
    }

    Some(frag)
}

/// A module that does not resolve locally is a stdlib or pip package, not a
/// broken reference: without an installed environment the two are
/// indistinguishable.
fn resolve_module(module_path: &str, config: &Config, all_files: &HashSet<PathBuf>) -> Resolution {
    resolve_python_import(module_path, &config.root_dir, all_files)
        .map_or(Resolution::External, Resolution::Local)
}

fn record_top_level(modules: &mut HashSet<String>, module_path: &str) {
    if let Some(first) = module_path.split('.').next() {
        if !first.is_empty() {
            modules.insert(first.to_string());
        }
    }
}

/// `__all__` entries in `__init__.py` that name a missing sibling module.
fn check_init_all(
    file: &Path,
    content: &str,
    all_files: &HashSet<PathBuf>,
    issues: &mut Vec<Issue>,
) {
    let Some(caps) = ALL_RE.captures(content) else {
        return;
    };
    let Some(dir) = file.parent() else {
        return;
    };

    let listing = caps.get(1).map_or("", |m| m.as_str());
    for raw in listing.split(',') {
        let name = raw.trim().trim_matches(|c| c == '\'' || c == '"');
        if name.is_empty() {
            continue;
        }
        let expected = dir.join(format!("{name}.py"));
        if !all_files.contains(&expected) {
            issues.push(Issue {
                category: Category::StaleReference,
                severity: Severity::Error,
                file_path: file.to_path_buf(),
                line: None,
                message: format!(
                    "__all__ exports '{name}' but {name}.py does not exist in {}",
                    dir.display()
                ),
                action: Action::Update,
                fix: Some(Fix {
                    kind: FixKind::RemoveImport,
                    target: name.to_string(),
                }),
                confidence: None,
                reason: None,
                trace: None,
            });
        }
    }
}

/// Flags `requirements.txt` entries whose normalized name never appears as an
/// imported top-level module in any scanned Python file.
fn check_requirements(
    all_files: &[PathBuf],
    imported_modules: &HashSet<String>,
    issues: &mut Vec<Issue>,
) {
    let requirement_files = filter_by_extensions(all_files, &["requirements.txt"]);

    for req_file in requirement_files {
        let Ok(content) = fs::read_to_string(&req_file) else {
            continue;
        };

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
                continue;
            }
            let display = trimmed
                .split(['>', '<', '=', '!', '~', '['])
                .next()
                .unwrap_or("")
                .trim();
            let normalized = display.replace('-', "_").to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            let squashed = normalized.replace('_', "");
            if !imported_modules.contains(&normalized) && !imported_modules.contains(&squashed) {
                issues.push(Issue {
                    category: Category::UnusedDependency,
                    severity: Severity::Warning,
                    file_path: req_file.clone(),
                    line: None,
                    message: format!(
                        "Package '{display}' in requirements.txt is not imported in any Python file"
                    ),
                    action: Action::Skip,
                    fix: None,
                    confidence: None,
                    reason: None,
                    trace: None,
                });
            }
        }
    }
}
