// src/clean/links.rs
use crate::error::{Result, SweepError};
use std::fs;
use std::path::Path;

/// Replaces a broken markdown link with its display text. Only the FIRST
/// occurrence is touched, so duplicate links elsewhere in the file survive.
/// Returns true if the file changed.
///
/// # Errors
/// Returns error if the file cannot be read or written.
pub fn remove_broken_link(file_path: &Path, link_markup: &str) -> Result<bool> {
    let content = fs::read_to_string(file_path).map_err(|source| SweepError::Io {
        source,
        path: file_path.to_path_buf(),
    })?;

    let Some(idx) = content.find(link_markup) else {
        return Ok(false);
    };

    // [text](path) -> text
    let replacement = link_markup
        .strip_prefix('[')
        .and_then(|rest| rest.split(']').next())
        .unwrap_or("");

    let mut updated = String::with_capacity(content.len());
    updated.push_str(&content[..idx]);
    updated.push_str(replacement);
    updated.push_str(&content[idx + link_markup.len()..]);

    fs::write(file_path, updated).map_err(|source| SweepError::Io {
        source,
        path: file_path.to_path_buf(),
    })?;
    Ok(true)
}
