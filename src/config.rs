// src/config.rs
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-language scanner enable flags. All scanners run by default.
#[derive(Debug, Clone, Copy)]
pub struct ScannerToggles {
    pub python: bool,
    pub javascript: bool,
    pub markdown: bool,
    pub config: bool,
    pub css: bool,
}

impl Default for ScannerToggles {
    fn default() -> Self {
        Self {
            python: true,
            javascript: true,
            markdown: true,
            config: true,
            css: true,
        }
    }
}

/// Modularity thresholds.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub max_file_lines: usize,
    pub max_exports: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_file_lines: 500,
            max_exports: 10,
        }
    }
}

/// Resolved configuration bundle handed to the orchestrator. Always
/// structurally valid: malformed user input degrades to defaults with a
/// warning, never an error.
#[derive(Debug, Clone)]
pub struct Config {
    pub root_dir: PathBuf,
    /// Regex patterns a path must match to be scanned. Empty = everything.
    pub include: Vec<String>,
    /// Regex patterns that remove paths from the scan.
    pub exclude: Vec<String>,
    /// User-declared entry points, relative to `root_dir`.
    pub entry_points: Vec<String>,
    pub scanners: ScannerToggles,
    pub thresholds: Thresholds,
}

impl Config {
    #[must_use]
    pub fn new(root_dir: PathBuf) -> Self {
        Self {
            root_dir,
            include: Vec::new(),
            exclude: Vec::new(),
            entry_points: Vec::new(),
            scanners: ScannerToggles::default(),
            thresholds: Thresholds::default(),
        }
    }

    /// Loads `codesweep.toml` from the root if present and merges it over
    /// the defaults, then appends `.codesweepignore` patterns to the
    /// exclusion list. Never fails: a malformed file or field produces a
    /// warning and the default value.
    #[must_use]
    pub fn load(root_dir: &Path) -> Self {
        let root = root_dir
            .canonicalize()
            .unwrap_or_else(|_| root_dir.to_path_buf());
        let mut config = Self::new(root.clone());

        let path = root.join(CONFIG_FILE);
        if let Ok(raw) = fs::read_to_string(&path) {
            match toml::from_str::<ConfigFile>(&raw) {
                Ok(file) => config.apply(file),
                Err(e) => {
                    eprintln!("WARN: invalid {CONFIG_FILE}: {e}");
                    eprintln!("WARN: falling back to default config");
                }
            }
        }

        config.exclude.extend(load_ignore_patterns(&root));

        config
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(include) = file.include {
            self.include = include;
        }
        if let Some(exclude) = file.exclude {
            self.exclude = exclude;
        }
        if let Some(entry_points) = file.entry_points {
            self.entry_points = entry_points;
        }
        if let Some(s) = file.scanners {
            let d = ScannerToggles::default();
            self.scanners = ScannerToggles {
                python: s.python.unwrap_or(d.python),
                javascript: s.javascript.unwrap_or(d.javascript),
                markdown: s.markdown.unwrap_or(d.markdown),
                config: s.config.unwrap_or(d.config),
                css: s.css.unwrap_or(d.css),
            };
        }
        if let Some(t) = file.thresholds {
            let d = Thresholds::default();
            self.thresholds = Thresholds {
                max_file_lines: positive_or(t.max_file_lines, "max_file_lines", d.max_file_lines),
                max_exports: positive_or(t.max_exports, "max_exports", d.max_exports),
            };
        }
    }
}

fn positive_or(value: Option<usize>, name: &str, default: usize) -> usize {
    match value {
        Some(0) => {
            eprintln!("WARN: thresholds.{name} must be positive, using {default}");
            default
        }
        Some(v) => v,
        None => default,
    }
}

pub const CONFIG_FILE: &str = "codesweep.toml";
pub const IGNORE_FILE: &str = ".codesweepignore";

/// Reads `.codesweepignore` at the root: one exclusion pattern per line,
/// blank lines and `#` comments skipped. Missing file means no patterns.
fn load_ignore_patterns(root_dir: &Path) -> Vec<String> {
    let Ok(content) = fs::read_to_string(root_dir.join(IGNORE_FILE)) else {
        return Vec::new();
    };
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Raw shape of `codesweep.toml`. Every field is optional so partial files
/// merge cleanly over the defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    entry_points: Option<Vec<String>>,
    scanners: Option<ScannerTogglesFile>,
    thresholds: Option<ThresholdsFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScannerTogglesFile {
    python: Option<bool>,
    javascript: Option<bool>,
    markdown: Option<bool>,
    config: Option<bool>,
    css: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThresholdsFile {
    max_file_lines: Option<usize>,
    max_exports: Option<usize>,
}

/// Commented starter config written by `codesweep init`.
#[must_use]
pub fn default_config_toml() -> String {
    let toggles = ScannerToggles::default();
    let thresholds = Thresholds::default();
    format!(
        r#"# codesweep configuration

# Regex patterns a path must match to be scanned (empty = everything)
include = []

# Regex patterns that remove paths from the scan
exclude = []

# Entry points in addition to the auto-detected ones (main.py, index.ts, ...)
entry_points = []

[scanners]
python = {python}
javascript = {javascript}
markdown = {markdown}
config = {config}
css = {css}

[thresholds]
max_file_lines = {max_file_lines}
max_exports = {max_exports}
"#,
        python = toggles.python,
        javascript = toggles.javascript,
        markdown = toggles.markdown,
        config = toggles.config,
        css = toggles.css,
        max_file_lines = thresholds.max_file_lines,
        max_exports = thresholds.max_exports,
    )
}
