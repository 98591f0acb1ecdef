//! Error types for chart generation.
//!
//! Every failure is fatal to the run: handlers propagate a `ChartError` up to
//! `main`, which reports it and exits with a non-zero status.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors that can occur while loading tasks, rendering or writing charts.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A CSV record could not be decoded into a task.
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// The CSV header row lacks a required column.
    #[error("Missing required column '{0}' in CSV header")]
    MissingColumn(String),

    /// A board JSON document could not be decoded.
    #[error("Invalid board JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A batch configuration file could not be decoded.
    #[error("Invalid batch config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The destination directory for epic stories does not exist.
    #[error("Epic directory doesn't exist: {}", .0.display())]
    MissingEpicDir(PathBuf),

    /// The region marker pattern failed to compile.
    #[error("Invalid embed pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ChartError {
    /// Create a malformed-record error for the given 1-based line.
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
