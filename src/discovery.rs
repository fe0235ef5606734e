// src/discovery.rs
use crate::config::Config;
use crate::error::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Directories never descended into.
pub const PRUNE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    ".venv",
    "venv",
    "__pycache__",
    "dist",
    "build",
    "coverage",
    "target",
    ".codesweep-backup",
];

/// Generated artifacts skipped even when their directory survives pruning.
const SKIP_FILE_PATTERN: &str = r"(?i)(\.min\.js|\.map)$";

static SKIP_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SKIP_FILE_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));

#[must_use]
pub fn should_prune(name: &str) -> bool {
    PRUNE_DIRS.contains(&name)
}

/// Walks the configured root and returns the sorted absolute paths of every
/// scannable file.
///
/// # Errors
/// Returns error if the filesystem walk cannot start.
pub fn discover(config: &Config) -> Result<Vec<PathBuf>> {
    let raw = walk_filesystem(&config.root_dir);
    let mut files = filter_patterns(raw, config);
    files.sort();
    Ok(files)
}

fn walk_filesystem(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && should_prune(&e.file_name().to_string_lossy())));

    let mut paths = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy();
                if SKIP_FILE_RE.is_match(&name) {
                    continue;
                }
                paths.push(entry.into_path());
            }
            Err(_) => errors += 1,
        }
    }
    if errors > 0 {
        eprintln!("WARN: Encountered {errors} errors during file walk");
    }
    paths
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                eprintln!("WARN: ignoring invalid pattern '{p}': {e}");
                None
            }
        })
        .collect()
}

fn filter_patterns(mut paths: Vec<PathBuf>, config: &Config) -> Vec<PathBuf> {
    let include = compile_patterns(&config.include);
    let exclude = compile_patterns(&config.exclude);

    if !include.is_empty() {
        paths.retain(|p| {
            let s = normalize_path(p);
            include.iter().any(|re| re.is_match(&s))
        });
    }

    if !exclude.is_empty() {
        paths.retain(|p| {
            let s = normalize_path(p);
            !exclude.iter().any(|re| re.is_match(&s))
        });
    }

    paths
}

/// Slices the discovered file set down to one scanner's extensions.
/// Matching is by file-name suffix so multi-dot names like `.env.example`
/// can be claimed via their final suffix.
#[must_use]
pub fn filter_by_extensions(files: &[PathBuf], extensions: &[&str]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|f| {
            let name = f.file_name().map_or("", |n| n.to_str().unwrap_or(""));
            extensions.iter().any(|ext| name.ends_with(ext))
        })
        .cloned()
        .collect()
}
