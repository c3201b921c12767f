//! Classifier hyperparameters and the store capability that serves them.

use std::fmt;
use std::future::Future;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::CoreError;

const fn default_n_estimators() -> u16 {
    100
}

/// Function measuring the quality of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    #[default]
    Gini,
    Entropy,
    LogLoss,
}

impl Criterion {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gini => "gini",
            Self::Entropy => "entropy",
            Self::LogLoss => "log_loss",
        }
    }

    /// Parse the wire representation used by document stores.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "gini" => Some(Self::Gini),
            "entropy" => Some(Self::Entropy),
            "log_loss" => Some(Self::LogLoss),
            _ => None,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Random forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Hyperparameters {
    /// Number of trees in the forest.
    #[serde(default = "default_n_estimators")]
    pub n_estimators: u16,

    #[serde(default)]
    pub criterion: Criterion,

    /// Maximum tree depth. Unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u16>,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            n_estimators: default_n_estimators(),
            criterion: Criterion::default(),
            max_depth: None,
        }
    }
}

impl Hyperparameters {
    /// Check the values a forest can actually be built with.
    ///
    /// # Errors
    ///
    /// [`CoreError::Validation`] if `n_estimators` or `max_depth` is zero.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.n_estimators == 0 {
            return Err(CoreError::Validation("n_estimators must be at least 1".into()));
        }
        if self.max_depth == Some(0) {
            return Err(CoreError::Validation("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}

/// Errors shared by every [`ParameterStore`] implementation.
#[derive(Debug, Error)]
pub enum ParameterError {
    /// The parameters document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The document exists but does not hold valid hyperparameters.
    #[error("Invalid parameters document: {0}")]
    InvalidFormat(String),

    /// Transport, authentication or filesystem failure.
    #[error("{0}")]
    Store(String),
}

/// Source of hyperparameters for the classifier.
///
/// Implemented by the local JSON file store (`flower-store`) and the remote
/// document store client (`flower-remote`). The server picks one from its
/// configuration and uses it both for training and for the parameter
/// endpoints.
pub trait ParameterStore {
    /// Write the default hyperparameters document, replacing any existing one.
    fn create_collection(&self) -> impl Future<Output = Result<(), ParameterError>> + Send;

    /// Read the current hyperparameters.
    fn get_parameters(&self) -> impl Future<Output = Result<Hyperparameters, ParameterError>> + Send;

    /// Overwrite the hyperparameters document.
    fn update_parameters(
        &self,
        values: &Hyperparameters,
    ) -> impl Future<Output = Result<(), ParameterError>> + Send;
}
