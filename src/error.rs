// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SweepError>;

// Allow `?` on std::io::Error by converting to SweepError::Io with unknown path.
impl From<std::io::Error> for SweepError {
    fn from(source: std::io::Error) -> Self {
        SweepError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// Gracefully convert WalkDir errors
impl From<walkdir::Error> for SweepError {
    fn from(e: walkdir::Error) -> Self {
        SweepError::Other(e.to_string())
    }
}

impl From<serde_json::Error> for SweepError {
    fn from(e: serde_json::Error) -> Self {
        SweepError::Report(e.to_string())
    }
}
