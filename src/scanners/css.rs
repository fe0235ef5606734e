// src/scanners/css.rs
//! CSS scanner: class selectors defined in stylesheets vs class names
//! referenced from JS/JSX/TSX/HTML. Advisory only.

use crate::config::Config;
use crate::scanners::ScannerPlugin;
use crate::types::{
    Action, Category, ExportedSymbol, Issue, ScanResult, Severity, SymbolKind,
};
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `.class-name {` and friends (`,` lists, `:hover`, descendant selectors).
static CSS_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.([a-zA-Z_][\w-]*)\s*[\{,:\s]").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static CLASSNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"className\s*=\s*[\{"]([^\}"]+)"#).unwrap_or_else(|_| panic!("Invalid Regex"))
});
static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class\s*=\s*["']([^"']+)"#).unwrap_or_else(|_| panic!("Invalid Regex"))
});

pub struct CssScanner;

impl ScannerPlugin for CssScanner {
    fn name(&self) -> &'static str {
        "css"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".css"]
    }

    fn scan(&self, files: &[PathBuf], all_files: &[PathBuf], _config: &Config) -> ScanResult {
        let used_classes = collect_used_classes(all_files);

        let mut result = ScanResult {
            files: files.to_vec(),
            ..ScanResult::default()
        };

        for file in files {
            let Ok(content) = fs::read_to_string(file) else {
                continue;
            };

            // First-seen order, deduplicated.
            let mut seen: HashSet<&str> = HashSet::new();
            for caps in CSS_CLASS_RE.captures_iter(&content) {
                let Some(class) = caps.get(1).map(|m| m.as_str()) else {
                    continue;
                };
                if !seen.insert(class) {
                    continue;
                }

                result.exports.push(ExportedSymbol {
                    name: class.to_string(),
                    file_path: file.clone(),
                    line: None,
                    kind: SymbolKind::Variable,
                });

                if !used_classes.contains(class) {
                    result.issues.push(Issue {
                        category: Category::DeadFile,
                        severity: Severity::Info,
                        file_path: file.clone(),
                        line: None,
                        message: format!(
                            "CSS class '.{class}' is defined but never referenced in any JS/HTML file"
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

        result
    }
}

/// Class names referenced via `className=` or `class=` attributes anywhere in
/// the project's JS/JSX/TSX/HTML files.
fn collect_used_classes(all_files: &[PathBuf]) -> HashSet<String> {
    let markup_files: Vec<&PathBuf> = all_files
        .iter()
        .filter(|f| {
            let name = f.file_name().map_or("", |n| n.to_str().unwrap_or(""));
            name.ends_with(".js")
                || name.ends_with(".jsx")
                || name.ends_with(".tsx")
                || name.ends_with(".html")
        })
        .collect();

    markup_files
        .par_iter()
        .filter_map(|file| used_classes_in(file))
        .reduce(HashSet::new, |mut acc, set| {
            acc.extend(set);
            acc
        })
}

fn used_classes_in(file: &Path) -> Option<HashSet<String>> {
    let content = fs::read_to_string(file).ok()?;
    let mut used = HashSet::new();
    for re in [&*CLASSNAME_RE, &*CLASS_ATTR_RE] {
        for caps in re.captures_iter(&content) {
            let value = caps.get(1).map_or("", |m| m.as_str());
            for class in value.split_whitespace() {
                if !class.is_empty() {
                    used.insert(class.to_string());
                }
            }
        }
    }
    Some(used)
}
