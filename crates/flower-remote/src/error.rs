//! Remote client error types.

use flower_core::ParameterError;
use thiserror::Error;

/// Errors that can occur when talking to remote HTTP services.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The remote resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The service returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the service asked us to wait.
        retry_after_secs: u64,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The dataset URL could not be parsed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Writing a downloaded file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RemoteError> for ParameterError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::NotFound(_) => Self::NotFound("Parameters document not found".to_string()),
            RemoteError::Parse(reason) => Self::InvalidFormat(reason),
            other => Self::Store(format!("Error accessing parameter store: {other}")),
        }
    }
}
