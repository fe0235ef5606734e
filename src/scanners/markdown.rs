// src/scanners/markdown.rs
//! Markdown scanner: link targets become import records; local links that do
//! not resolve on disk are doc drift.

use crate::config::Config;
use crate::graph::resolver::resolve_relative_link;
use crate::scanners::{line_number, ScannerPlugin};
use crate::types::{
    Action, Category, Fix, FixKind, ImportedSymbol, Issue, Resolution, ScanResult, Severity,
};
use rayon::prelude::*;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `[text](path)` links. URLs, anchors, and mailto are skipped at match time.
static MD_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").unwrap_or_else(|_| panic!("Invalid Regex"))
});

pub struct MarkdownScanner;

impl ScannerPlugin for MarkdownScanner {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".md", ".mdx"]
    }

    fn scan(&self, files: &[PathBuf], _all_files: &[PathBuf], _config: &Config) -> ScanResult {
        let fragments: Vec<(Vec<ImportedSymbol>, Vec<Issue>)> = files
            .par_iter()
            .filter_map(|file| scan_file(file))
            .collect();

        let mut result = ScanResult {
            files: files.to_vec(),
            ..ScanResult::default()
        };
        for (imports, issues) in fragments {
            result.imports.extend(imports);
            result.issues.extend(issues);
        }
        result
    }
}

fn scan_file(file: &Path) -> Option<(Vec<ImportedSymbol>, Vec<Issue>)> {
    let content = fs::read_to_string(file).ok()?;
    let mut imports = Vec::new();
    let mut issues = Vec::new();

    for caps in MD_LINK_RE.captures_iter(&content) {
        let full = caps.get(0).map_or("", |m| m.as_str());
        let link_text = caps.get(1).map_or("", |m| m.as_str());
        let link_path = caps.get(2).map_or("", |m| m.as_str());

        if link_path.starts_with("http://")
            || link_path.starts_with("https://")
            || link_path.starts_with('#')
            || link_path.starts_with("mailto:")
        {
            continue;
        }

        // "file.md#section" -> "file.md"
        let clean_path = link_path.split('#').next().unwrap_or("");
        if clean_path.is_empty() {
            continue;
        }

        let resolved = resolve_relative_link(clean_path, file);
        let line = caps.get(0).map(|m| line_number(&content, m.start()));

        imports.push(ImportedSymbol {
            name: link_text.to_string(),
            from_module: clean_path.to_string(),
            file_path: file.to_path_buf(),
            line,
            resolved: resolved.clone().map(Resolution::Local),
        });

        if resolved.is_none() {
            issues.push(Issue {
                category: Category::DocDrift,
                severity: Severity::Error,
                file_path: file.to_path_buf(),
                line,
                message: format!("Link [{link_text}]({link_path}) points to non-existent file"),
                action: Action::Update,
                fix: Some(Fix {
                    kind: FixKind::RemoveLink,
                    // The full original markup, so the cleaner can do an exact
                    // first-occurrence replacement.
                    target: full.to_string(),
                }),
                confidence: None,
                reason: None,
                trace: None,
            });
        }
    }

    Some((imports, issues))
}
