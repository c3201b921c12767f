//! # flower-core
//!
//! Core types and error types shared by every flower crate.
//!
//! - Dataset registry entries ([`DatasetDescriptor`])
//! - Tabular data in the pandas-style "split" layout ([`Table`], [`Series`], [`Split`])
//! - Classifier hyperparameters and the [`ParameterStore`] capability
//! - Model identity ([`ModelId`])
//! - Request and response bodies for the HTTP API

pub mod dataset;
pub mod errors;
pub mod ids;
pub mod params;
pub mod responses;
pub mod table;

pub use dataset::DatasetDescriptor;
pub use errors::CoreError;
pub use ids::ModelId;
pub use params::{Criterion, Hyperparameters, ParameterError, ParameterStore};
pub use table::{Cell, Series, Split, Table};
