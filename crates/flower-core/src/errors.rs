//! Cross-cutting error types for flower.
//!
//! Component errors (`StoreError`, `PipelineError`, `ModelError`,
//! `RemoteError`) live in their own crates. They converge into `ApiError`
//! in `flower-server`, which is the only place that knows about HTTP status
//! codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Model names end up in file names, so they are restricted.
    #[error("Invalid model id '{0}': only letters, digits, '-' and '_' are allowed")]
    InvalidModelId(String),

    /// Data failed validation (shape, missing fields).
    #[error("Validation error: {0}")]
    Validation(String),
}
