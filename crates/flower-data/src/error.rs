//! Pipeline error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Dataset file not found")]
    NotFound { path: PathBuf },

    /// Malformed CSV, ragged rows or invalid UTF-8.
    #[error("Error loading dataset: {0}")]
    Load(#[from] csv::Error),

    #[error("Error processing dataset: missing column '{0}'")]
    Process(String),

    #[error("Error splitting dataset: {0}")]
    Split(String),
}
