// src/graph/mod.rs
//! Cross-language dependency graph. Every scanner's output is merged here;
//! the analysis passes (orphans, broken imports, unused exports) run over
//! the complete merged graph.

pub mod classifier;
pub mod resolver;

use crate::types::{
    Action, Category, ExportedSymbol, Fix, FixKind, ImportedSymbol, Issue, Severity,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Per-file node. Exports and imports keep insertion order; line-accurate
/// reporting and the sole-export heuristic depend on it.
#[derive(Debug, Default)]
pub struct FileNode {
    pub exports: Vec<ExportedSymbol>,
    pub imports: Vec<ImportedSymbol>,
    pub depends_on: BTreeSet<PathBuf>,
    pub depended_by: BTreeSet<PathBuf>,
}

/// An unused-export candidate handed to the classifier.
#[derive(Debug, Clone)]
pub struct UnusedExport {
    pub file_path: PathBuf,
    pub symbol: ExportedSymbol,
    pub total_exports: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct GraphStats {
    pub total_files: usize,
    pub total_edges: usize,
    pub entry_points: usize,
}

/// The shared structure every plugin's output lands in. Single-writer: the
/// orchestrator owns it exclusively during the merge and analysis phases.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: BTreeMap<PathBuf, FileNode>,
    entry_points: BTreeSet<PathBuf>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the node if missing. Repeated calls never reset existing
    /// export/import lists.
    pub fn add_file(&mut self, file_path: &Path) {
        if !self.nodes.contains_key(file_path) {
            self.nodes.insert(file_path.to_path_buf(), FileNode::default());
        }
    }

    pub fn add_export(&mut self, file_path: &Path, symbol: ExportedSymbol) {
        self.add_file(file_path);
        if let Some(node) = self.nodes.get_mut(file_path) {
            node.exports.push(symbol);
        }
    }

    pub fn add_import(&mut self, file_path: &Path, symbol: ImportedSymbol) {
        self.add_file(file_path);
        if let Some(node) = self.nodes.get_mut(file_path) {
            node.imports.push(symbol);
        }
    }

    pub fn add_edge(&mut self, from_file: &Path, to_file: &Path) {
        self.add_file(from_file);
        self.add_file(to_file);
        if let Some(node) = self.nodes.get_mut(from_file) {
            node.depends_on.insert(to_file.to_path_buf());
        }
        if let Some(node) = self.nodes.get_mut(to_file) {
            node.depended_by.insert(from_file.to_path_buf());
        }
    }

    pub fn mark_entry_point(&mut self, file_path: &Path) {
        self.add_file(file_path);
        self.entry_points.insert(file_path.to_path_buf());
    }

    #[must_use]
    pub fn is_entry_point(&self, file_path: &Path) -> bool {
        self.entry_points.contains(file_path)
    }

    #[must_use]
    pub fn node(&self, file_path: &Path) -> Option<&FileNode> {
        self.nodes.get(file_path)
    }

    /// BFS flood-fill from every entry point along `depends_on` edges.
    /// Anything in the graph that was never visited is orphaned.
    #[must_use]
    pub fn orphaned_files(&self) -> Vec<PathBuf> {
        let mut visited: HashSet<&Path> = HashSet::new();
        let mut queue: VecDeque<&Path> =
            self.entry_points.iter().map(PathBuf::as_path).collect();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            for dep in &node.depends_on {
                if !visited.contains(dep.as_path()) {
                    queue.push_back(dep);
                }
            }
        }

        self.nodes
            .keys()
            .filter(|p| !visited.contains(p.as_path()))
            .cloned()
            .collect()
    }

    /// DFS from each entry point in turn; the first entry point that reaches
    /// the target wins. Returns the ordered path from entry to target, or
    /// empty if unreachable. Diagnostic only.
    #[must_use]
    pub fn trace_route(&self, target: &Path) -> Vec<PathBuf> {
        for entry in &self.entry_points {
            let mut visited = HashSet::new();
            let route = self.dfs_trace(entry, target, &mut visited);
            if !route.is_empty() {
                return route;
            }
        }
        Vec::new()
    }

    fn dfs_trace(
        &self,
        current: &Path,
        target: &Path,
        visited: &mut HashSet<PathBuf>,
    ) -> Vec<PathBuf> {
        if current == target {
            return vec![current.to_path_buf()];
        }
        if !visited.insert(current.to_path_buf()) {
            return Vec::new();
        }

        let Some(node) = self.nodes.get(current) else {
            return Vec::new();
        };

        for dep in &node.depends_on {
            let route = self.dfs_trace(dep, target, visited);
            if !route.is_empty() {
                let mut path = vec![current.to_path_buf()];
                path.extend(route);
                return path;
            }
        }
        Vec::new()
    }

    /// Every import record whose `resolved` state is absent looked local and
    /// failed resolution. External imports never show up here.
    #[must_use]
    pub fn broken_imports(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        for (file_path, node) in &self.nodes {
            for imp in &node.imports {
                if imp.resolved.is_none() {
                    issues.push(Issue {
                        category: Category::StaleReference,
                        severity: Severity::Error,
                        file_path: file_path.clone(),
                        line: imp.line,
                        message: format!(
                            "Import '{}' from '{}' cannot be resolved",
                            imp.name, imp.from_module
                        ),
                        action: Action::Update,
                        fix: Some(Fix {
                            kind: FixKind::RemoveImport,
                            target: imp.from_module.clone(),
                        }),
                        confidence: None,
                        reason: None,
                        trace: None,
                    });
                }
            }
        }
        issues
    }

    /// Unused-export candidates for the classifier. Entry-point files are
    /// exempt: their exports are the program's public surface.
    ///
    /// A symbol is used iff some other file's import list contains a record
    /// resolved to this file whose name equals the symbol's name or `*`.
    /// Computed via a reverse index (resolved target to imported names)
    /// instead of rescanning every node per candidate.
    #[must_use]
    pub fn unused_exports(&self) -> Vec<UnusedExport> {
        // target file -> set of names imported from it by *other* files
        let mut imported_names: HashMap<&Path, HashSet<(&Path, &str)>> = HashMap::new();
        for (file_path, node) in &self.nodes {
            for imp in &node.imports {
                if let Some(target) = imp.local_target() {
                    imported_names
                        .entry(target.as_path())
                        .or_default()
                        .insert((file_path.as_path(), imp.name.as_str()));
                }
            }
        }

        let is_used = |file_path: &Path, export_name: &str| -> bool {
            imported_names.get(file_path).is_some_and(|names| {
                names
                    .iter()
                    .any(|(from, name)| *from != file_path && (*name == export_name || *name == "*"))
            })
        };

        let mut results = Vec::new();
        for (file_path, node) in &self.nodes {
            if self.entry_points.contains(file_path) {
                continue;
            }
            for exp in &node.exports {
                if !is_used(file_path, &exp.name) {
                    results.push(UnusedExport {
                        file_path: file_path.clone(),
                        symbol: exp.clone(),
                        total_exports: node.exports.len(),
                    });
                }
            }
        }
        results
    }

    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let total_edges = self.nodes.values().map(|n| n.depends_on.len()).sum();
        GraphStats {
            total_files: self.nodes.len(),
            total_edges,
            entry_points: self.entry_points.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Resolution, SymbolKind};

    fn export(name: &str, file: &str) -> ExportedSymbol {
        ExportedSymbol {
            name: name.to_string(),
            file_path: PathBuf::from(file),
            line: None,
            kind: SymbolKind::Function,
        }
    }

    fn import_to(name: &str, from_file: &str, target: &str) -> ImportedSymbol {
        ImportedSymbol {
            name: name.to_string(),
            from_module: target.to_string(),
            file_path: PathBuf::from(from_file),
            line: None,
            resolved: Some(Resolution::Local(PathBuf::from(target))),
        }
    }

    #[test]
    fn test_add_file_idempotent() {
        let mut g = DependencyGraph::new();
        g.add_file(Path::new("/p/a.py"));
        g.add_export(Path::new("/p/a.py"), export("f", "/p/a.py"));
        g.add_file(Path::new("/p/a.py"));

        assert_eq!(g.stats().total_files, 1);
        let node = g.node(Path::new("/p/a.py")).unwrap();
        assert_eq!(node.exports.len(), 1, "re-adding must not reset exports");
    }

    #[test]
    fn test_orphan_detection_with_cycle() {
        let mut g = DependencyGraph::new();
        g.mark_entry_point(Path::new("/p/main.py"));
        g.add_edge(Path::new("/p/main.py"), Path::new("/p/a.py"));
        // a <-> b cycle, both reachable
        g.add_edge(Path::new("/p/a.py"), Path::new("/p/b.py"));
        g.add_edge(Path::new("/p/b.py"), Path::new("/p/a.py"));
        g.add_file(Path::new("/p/dead.py"));

        let orphans = g.orphaned_files();
        assert_eq!(orphans, vec![PathBuf::from("/p/dead.py")]);
    }

    #[test]
    fn test_trace_route_chain() {
        let mut g = DependencyGraph::new();
        g.mark_entry_point(Path::new("/p/main.py"));
        g.add_edge(Path::new("/p/main.py"), Path::new("/p/auth.py"));
        g.add_edge(Path::new("/p/auth.py"), Path::new("/p/db.py"));

        let route = g.trace_route(Path::new("/p/db.py"));
        assert_eq!(
            route,
            vec![
                PathBuf::from("/p/main.py"),
                PathBuf::from("/p/auth.py"),
                PathBuf::from("/p/db.py"),
            ]
        );
    }

    #[test]
    fn test_trace_route_unreachable() {
        let mut g = DependencyGraph::new();
        g.mark_entry_point(Path::new("/p/main.py"));
        g.add_file(Path::new("/p/island.py"));
        assert!(g.trace_route(Path::new("/p/island.py")).is_empty());
    }

    #[test]
    fn test_unused_export_wildcard_counts_as_use() {
        let mut g = DependencyGraph::new();
        g.add_export(Path::new("/p/lib.py"), export("helper", "/p/lib.py"));
        g.add_import(Path::new("/p/main.py"), import_to("*", "/p/main.py", "/p/lib.py"));

        assert!(g.unused_exports().is_empty());
    }

    #[test]
    fn test_self_import_does_not_count_as_use() {
        let mut g = DependencyGraph::new();
        g.add_export(Path::new("/p/lib.py"), export("helper", "/p/lib.py"));
        g.add_import(Path::new("/p/lib.py"), import_to("helper", "/p/lib.py", "/p/lib.py"));

        let unused = g.unused_exports();
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].symbol.name, "helper");
    }

    #[test]
    fn test_entry_point_exports_exempt() {
        let mut g = DependencyGraph::new();
        g.mark_entry_point(Path::new("/p/main.py"));
        g.add_export(Path::new("/p/main.py"), export("main", "/p/main.py"));

        assert!(g.unused_exports().is_empty());
    }
}
