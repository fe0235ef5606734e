// src/scan.rs
//! Scan orchestration: discovery, plugin runs, graph merge, entry-point
//! detection, analysis passes, report assembly. Strictly sequential phases;
//! the graph is exclusively owned here during merge and analysis.

use crate::config::Config;
use crate::discovery::{discover, filter_by_extensions};
use crate::error::Result;
use crate::graph::classifier::{classify, severity_for};
use crate::graph::resolver::normalize;
use crate::graph::DependencyGraph;
use crate::progress::Progress;
use crate::scanners::{enabled_plugins, ScannerPlugin};
use crate::types::{
    Action, Category, Issue, ScanReport, ScanStats, Severity, KNOWN_ENTRY_POINTS,
};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Extensions eligible for dead-file reporting. Docs and config files are
/// never "dead" just because nothing imports them.
const CODE_EXTENSIONS: &[&str] = &[".py", ".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"];

pub struct ScanOrchestrator {
    plugins: Vec<Box<dyn ScannerPlugin>>,
    graph: DependencyGraph,
}

impl ScanOrchestrator {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            plugins: enabled_plugins(config),
            graph: DependencyGraph::new(),
        }
    }

    /// Runs a full scan and assembles the report. A failure inside one file
    /// or one plugin never aborts the scan; the report is always complete
    /// with respect to what could be extracted.
    ///
    /// # Errors
    /// Returns error only if file discovery itself fails.
    pub fn scan(
        &mut self,
        config: &Config,
        only: Option<&str>,
        progress: &dyn Progress,
    ) -> Result<ScanReport> {
        let start = Instant::now();
        let timestamp = unix_timestamp();

        progress.start("Discovering files...");
        let all_files = discover(config)?;
        progress.succeed(&format!("Found {} files", all_files.len()));

        let names = only.map(plugin_names_for);
        let active: Vec<&dyn ScannerPlugin> = self
            .plugins
            .iter()
            .filter(|p| names.as_ref().map_or(true, |n| n.contains(&p.name())))
            .map(AsRef::as_ref)
            .collect();

        let mut issues: Vec<Issue> = Vec::new();

        for plugin in &active {
            progress.start(&format!("Scanning {} files...", plugin.name()));
            let plugin_files = filter_by_extensions(&all_files, plugin.extensions());
            if plugin_files.is_empty() {
                progress.succeed(&format!("No {} files found", plugin.name()));
                continue;
            }

            let result = plugin.scan(&plugin_files, &all_files, config);

            for file in &result.files {
                self.graph.add_file(file);
            }
            for exp in result.exports {
                let path = exp.file_path.clone();
                self.graph.add_export(&path, exp);
            }
            for imp in result.imports {
                let path = imp.file_path.clone();
                let edge_target = imp.local_target().cloned();
                self.graph.add_import(&path, imp);
                if let Some(target) = edge_target {
                    self.graph.add_edge(&path, &target);
                }
            }
            issues.extend(result.issues);

            progress.succeed(&format!(
                "Scanned {} {} files",
                plugin_files.len(),
                plugin.name()
            ));
        }

        progress.start("Analyzing dependency graph...");
        detect_entry_points(&mut self.graph, config, &all_files);

        // Dead files: unreachable code files, never docs or config.
        for file in self.graph.orphaned_files() {
            if !has_code_extension(&file) {
                continue;
            }
            issues.push(Issue {
                category: Category::DeadFile,
                severity: Severity::Warning,
                file_path: file,
                line: None,
                message: "File is not imported by any other file and not an entry point"
                    .to_string(),
                action: Action::Delete,
                fix: None,
                confidence: None,
                reason: None,
                trace: None,
            });
        }

        issues.extend(self.graph.broken_imports());

        // All unused exports are reported, tagged with confidence; severity
        // filtering happens at render time.
        for candidate in self.graph.unused_exports() {
            let classification =
                classify(&candidate.file_path, &candidate.symbol, candidate.total_exports);
            let trace = self.graph.trace_route(&candidate.file_path);
            issues.push(Issue {
                category: Category::UnusedExport,
                severity: severity_for(classification.confidence),
                file_path: candidate.file_path,
                line: candidate.symbol.line,
                message: format!(
                    "Export '{}' ({}) is never imported",
                    candidate.symbol.name, candidate.symbol.kind
                ),
                action: Action::Skip,
                fix: None,
                confidence: Some(classification.confidence),
                reason: Some(classification.reason),
                trace: if trace.is_empty() { None } else { Some(trace) },
            });
        }

        let graph_stats = self.graph.stats();
        progress.succeed(&format!(
            "Graph: {} files, {} edges, {} entry points",
            graph_stats.total_files, graph_stats.total_edges, graph_stats.entry_points
        ));

        let stats = ScanStats {
            files_scanned: all_files.len(),
            dead_files: count(&issues, Category::DeadFile),
            stale_refs: count(&issues, Category::StaleReference),
            unused_deps: count(&issues, Category::UnusedDependency),
            unused_exports: count(&issues, Category::UnusedExport),
            doc_drift: count(&issues, Category::DocDrift),
            modularity_issues: count(&issues, Category::Modularity),
        };

        Ok(ScanReport {
            timestamp,
            root_dir: config.root_dir.clone(),
            duration_ms: start.elapsed().as_millis(),
            scanners: active.iter().map(|p| p.name().to_string()).collect(),
            issues,
            stats,
        })
    }

    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }
}

/// Runs once after all plugins, so every discovered file is considered
/// regardless of which language claimed it.
fn detect_entry_points(graph: &mut DependencyGraph, config: &Config, all_files: &[PathBuf]) {
    for file in all_files {
        let name = file.file_name().map_or("", |n| n.to_str().unwrap_or(""));
        if KNOWN_ENTRY_POINTS.contains(&name) {
            graph.mark_entry_point(file);
        }
    }
    for ep in &config.entry_points {
        let resolved = normalize(&config.root_dir.join(ep));
        graph.mark_entry_point(&resolved);
    }
}

fn has_code_extension(file: &Path) -> bool {
    let name = file.file_name().map_or("", |n| n.to_str().unwrap_or(""));
    CODE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

fn count(issues: &[Issue], category: Category) -> usize {
    issues.iter().filter(|i| i.category == category).count()
}

/// Maps an `--only` filter value to plugin names. Unknown values pass
/// through so an exact plugin name always works.
fn plugin_names_for(only: &str) -> Vec<&str> {
    match only {
        "python" | "py" => vec!["python"],
        "javascript" | "js" | "ts" => vec!["javascript"],
        "docs" | "markdown" | "md" => vec!["markdown"],
        "css" => vec!["css"],
        "config" => vec!["config"],
        other => vec![other],
    }
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
