//! # flower-remote
//!
//! HTTP clients for the services the flower API talks to:
//! - a Firestore REST document holding the classifier hyperparameters
//!   ([`FirestoreParameterStore`], one of the [`flower_core::ParameterStore`]
//!   implementations)
//! - third-party hosts serving registered datasets ([`DatasetDownloader`])
//!
//! Every client shares one timeout ([`REQUEST_TIMEOUT`]) and the same status
//! handling. Nothing is retried.

mod download;
mod error;
mod firestore;
mod http;

pub use download::DatasetDownloader;
pub use error::RemoteError;
pub use firestore::{DocumentLocation, FirestoreParameterStore};
pub use crate::http::REQUEST_TIMEOUT;
