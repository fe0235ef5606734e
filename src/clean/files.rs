// src/clean/files.rs
use crate::error::{Result, SweepError};
use std::fs;
use std::path::Path;

/// Deletes a dead file.
///
/// # Errors
/// Returns error if the file cannot be removed.
pub fn delete_file(file_path: &Path) -> Result<()> {
    fs::remove_file(file_path).map_err(|source| SweepError::Io {
        source,
        path: file_path.to_path_buf(),
    })
}
