// src/scanners/javascript.rs
//! JavaScript/TypeScript scanner: declaration-keyword export extraction,
//! ESM/CommonJS/dynamic import extraction, relative-import resolution, and
//! `package.json` dependency auditing.

use crate::config::Config;
use crate::graph::resolver::resolve_js_import;
use crate::scanners::{line_number, ScannerPlugin};
use crate::types::{
    Action, Category, ExportedSymbol, ImportedSymbol, Issue, Resolution, ScanResult, Severity,
    SymbolKind,
};
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ESM_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+(?:type\s+)?(?:(?:\{[^}]*\}|[\w*]+)\s+from\s+)?["']([^"']+)["']"#)
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap_or_else(|_| panic!("Invalid Regex"))
});
static DYNAMIC_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap_or_else(|_| panic!("Invalid Regex"))
});
static EXPORT_NAMED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(const|let|var|function|class|type|interface|enum)\s+(\w+)")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static EXPORT_DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+(?:function|class)?\s*(\w+)?")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Build/tooling packages invoked via CLI or config rather than imported.
const DEV_TOOLS: &[&str] = &[
    "typescript",
    "tsup",
    "vitest",
    "jest",
    "mocha",
    "eslint",
    "prettier",
    "husky",
    "lint-staged",
    "ts-node",
    "nodemon",
    "concurrently",
];

pub struct JavaScriptScanner;

impl ScannerPlugin for JavaScriptScanner {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"]
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
        let mut imported_packages: HashSet<String> = HashSet::new();
        for frag in fragments {
            result.exports.extend(frag.exports);
            result.imports.extend(frag.imports);
            result.issues.extend(frag.issues);
            imported_packages.extend(frag.packages);
        }

        check_package_json(all_files, &imported_packages, &mut result.issues);

        result
    }
}

#[derive(Default)]
struct FileFragment {
    exports: Vec<ExportedSymbol>,
    imports: Vec<ImportedSymbol>,
    issues: Vec<Issue>,
    /// npm package names referenced by this file (scoped-aware).
    packages: HashSet<String>,
}

fn scan_file(file: &Path, all_files: &HashSet<PathBuf>, config: &Config) -> Option<FileFragment> {
    let content = fs::read_to_string(file).ok()?;
    let mut frag = FileFragment::default();

    for caps in EXPORT_NAMED_RE.captures_iter(&content) {
        let keyword = caps.get(1).map_or("", |m| m.as_str());
        let name = caps.get(2).map_or("", |m| m.as_str());
        frag.exports.push(ExportedSymbol {
            name: name.to_string(),
            file_path: file.to_path_buf(),
            line: caps.get(0).map(|m| line_number(&content, m.start())),
            kind: match keyword {
                "function" => SymbolKind::Function,
                "class" => SymbolKind::Class,
                "type" | "interface" => SymbolKind::Type,
                _ => SymbolKind::Variable,
            },
        });
    }

    for caps in EXPORT_DEFAULT_RE.captures_iter(&content) {
        let name = caps.get(1).map_or("default", |m| m.as_str());
        frag.exports.push(ExportedSymbol {
            name: if name.is_empty() { "default" } else { name }.to_string(),
            file_path: file.to_path_buf(),
            line: caps.get(0).map(|m| line_number(&content, m.start())),
            kind: SymbolKind::Default,
        });
    }

    for re in [&*ESM_IMPORT_RE, &*REQUIRE_RE, &*DYNAMIC_IMPORT_RE] {
        for caps in re.captures_iter(&content) {
            let specifier = caps.get(1).map_or("", |m| m.as_str());
            let line = caps.get(0).map(|m| line_number(&content, m.start()));

            if let Some(pkg) = extract_package_name(specifier) {
                frag.packages.insert(pkg);
            }

            // Bare specifiers (npm packages, node builtins) are external, never
            // broken. Only a relative specifier that fails resolution is.
            let resolved = if is_bare_import(specifier) {
                Some(Resolution::External)
            } else {
                resolve_js_import(specifier, file, all_files).map(Resolution::Local)
            };

            frag.imports.push(ImportedSymbol {
                name: specifier.to_string(),
                from_module: specifier.to_string(),
                file_path: file.to_path_buf(),
                line,
                resolved,
            });
        }
    }

    let line_count = content.lines().count();
    if line_count > config.thresholds.max_file_lines {
        frag.issues.push(modularity_issue(
            file,
            format!(
                "File has {line_count} lines (threshold: {})",
                config.thresholds.max_file_lines
            ),
        ));
    }

    if frag.exports.len() > config.thresholds.max_exports {
        frag.issues.push(modularity_issue(
            file,
            format!(
                "File has {} exports (threshold: {})",
                frag.exports.len(),
                config.thresholds.max_exports
            ),
        ));
    }

    Some(frag)
}

fn modularity_issue(file: &Path, message: String) -> Issue {
    Issue {
        category: Category::Modularity,
        severity: Severity::Info,
        file_path: file.to_path_buf(),
        line: None,
        message,
        action: Action::Skip,
        fix: None,
        confidence: None,
        reason: None,
        trace: None,
    }
}

/// Flags `package.json` dependencies never referenced by any import,
/// excluding CLI-invoked tooling.
fn check_package_json(
    all_files: &[PathBuf],
    imported_packages: &HashSet<String>,
    issues: &mut Vec<Issue>,
) {
    let package_files = all_files.iter().filter(|f| {
        f.file_name().is_some_and(|n| n == "package.json")
            && !f.to_string_lossy().contains("node_modules")
    });

    for pkg_file in package_files {
        let Ok(content) = fs::read_to_string(pkg_file) else {
            continue;
        };
        // Malformed package.json is an extraction failure: skip it.
        let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&content) else {
            continue;
        };

        let mut deps: Vec<String> = Vec::new();
        for section in ["dependencies", "devDependencies"] {
            if let Some(map) = parsed.get(section).and_then(|v| v.as_object()) {
                deps.extend(map.keys().cloned());
            }
        }

        for dep in deps {
            if is_dev_tool(&dep) {
                continue;
            }
            if !imported_packages.contains(&dep) {
                issues.push(Issue {
                    category: Category::UnusedDependency,
                    severity: Severity::Warning,
                    file_path: pkg_file.clone(),
                    line: None,
                    message: format!(
                        "Package '{dep}' in package.json is not imported in any JS/TS file"
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

/// npm package name of a specifier, counting `@scope/name` as one unit.
fn extract_package_name(specifier: &str) -> Option<String> {
    if specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }
    if let Some(rest) = specifier.strip_prefix('@') {
        let mut parts = rest.splitn(2, '/');
        let scope = parts.next()?;
        let name = parts.next()?.split('/').next()?;
        return Some(format!("@{scope}/{name}"));
    }
    specifier.split('/').next().map(str::to_string)
}

fn is_bare_import(specifier: &str) -> bool {
    !specifier.starts_with('.') && !specifier.starts_with('/')
}

fn is_dev_tool(dep: &str) -> bool {
    DEV_TOOLS.contains(&dep) || dep.starts_with("@types/")
}
