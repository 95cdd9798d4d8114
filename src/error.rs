use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving configuration or loading the claims dataset.
///
/// Every variant is fatal at startup; nothing in the pipeline retries.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed dataset: {0}")]
    Malformed(String),
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: column '{column}' holds '{value}', expected a non-negative amount")]
    InvalidAmount {
        row: usize,
        column: String,
        value: String,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
