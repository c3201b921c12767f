//! Model lifecycle error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// No model has been trained under this id.
    #[error("Model file not found")]
    NotFound { path: PathBuf },

    /// The model file exists but cannot be deserialized.
    #[error("Error loading model: {0}")]
    Load(String),

    /// Training input is unusable or the learner failed.
    #[error("Error training model: {0}")]
    Train(String),

    /// Prediction input does not match the model, or the learner failed.
    #[error("Error predicting: {0}")]
    Predict(String),

    #[error("Error saving model: {0}")]
    Save(#[source] std::io::Error),
}
