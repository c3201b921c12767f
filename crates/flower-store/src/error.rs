//! Store error types.
//!
//! Display strings double as the `detail` text of API error responses.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The document file does not exist. Stores never create it implicitly.
    #[error("Config file not found")]
    DocumentNotFound { path: PathBuf },

    /// The document is not a valid JSON object.
    #[error("Error decoding JSON file")]
    InvalidFormat(#[source] serde_json::Error),

    /// No entry with this name in the document.
    #[error("Dataset not found in config file")]
    DatasetNotFound(String),

    /// The entry exists but has no string `url`.
    #[error("Dataset URL not found in config file")]
    MissingUrl(String),

    /// The entry exists but is not an object.
    #[error("Invalid dataset entry '{0}' in config file")]
    InvalidEntry(String),

    #[error("Error reading config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("Error writing to config file: {0}")]
    Write(#[source] std::io::Error),

    /// Another writer held the document lock for longer than the timeout.
    #[error("Timed out waiting for lock on {}", path.display())]
    LockTimeout { path: PathBuf },
}
