// src/clean/imports.rs
//! Precise import-statement removal. Matching is exact-module, so targeting
//! `util` never removes an import of `utilHelper`.

use crate::error::{Result, SweepError};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Removes every import statement of `target_module` from the file.
/// Returns true if the file changed.
///
/// # Errors
/// Returns error if the file cannot be read or written.
pub fn remove_import_line(file_path: &Path, target_module: &str) -> Result<bool> {
    let content = read(file_path)?;
    let escaped = regex::escape(target_module);

    let python_from = Regex::new(&format!(r"^\s*from\s+{escaped}\s+import\b"))?;
    let python_import = Regex::new(&format!(
        r"^\s*import\s+{escaped}\s*$|^\s*import\s+{escaped}\s*,|^\s*import\s+{escaped}\s+as\b"
    ))?;
    let js_quoted = Regex::new(&format!(r#"["']{escaped}["']"#))?;

    let filtered: Vec<&str> = content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if python_from.is_match(trimmed) || python_import.is_match(trimmed) {
                return false;
            }
            // JS/TS: only drop lines where the module is the exact quoted string
            if js_quoted.is_match(trimmed)
                && (trimmed.starts_with("import ") || trimmed.contains("require("))
            {
                return false;
            }
            true
        })
        .collect();

    write_if_changed(file_path, &content, filtered)
}

/// Removes a declared dependency line (requirements.txt style: the package
/// name optionally followed by a version specifier). Returns true if the
/// file changed.
///
/// # Errors
/// Returns error if the file cannot be read or written.
pub fn remove_dependency_line(file_path: &Path, package: &str) -> Result<bool> {
    let content = read(file_path)?;
    let escaped = regex::escape(package);
    let dep_line = Regex::new(&format!(r"(?i)^\s*{escaped}\s*([><=!~\[].*)?$"))?;

    let filtered: Vec<&str> = content.lines().filter(|l| !dep_line.is_match(l)).collect();
    write_if_changed(file_path, &content, filtered)
}

fn read(file_path: &Path) -> Result<String> {
    fs::read_to_string(file_path).map_err(|source| SweepError::Io {
        source,
        path: file_path.to_path_buf(),
    })
}

fn write_if_changed(file_path: &Path, original: &str, lines: Vec<&str>) -> Result<bool> {
    if lines.len() == original.lines().count() {
        return Ok(false);
    }
    let mut updated = lines.join("\n");
    if original.ends_with('\n') {
        updated.push('\n');
    }
    fs::write(file_path, updated).map_err(|source| SweepError::Io {
        source,
        path: file_path.to_path_buf(),
    })?;
    Ok(true)
}
