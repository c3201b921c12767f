//! Request and response bodies of the HTTP API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::ModelId;
use crate::table::Split;

/// Plain acknowledgement, e.g. `{"message": "Dataset added successfully"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body. Every failed request carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Train/test partition where each part is itself a split-layout JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SplitResponse {
    #[serde(rename = "X_train")]
    pub x_train: String,
    #[serde(rename = "X_test")]
    pub x_test: String,
    pub y_train: String,
    pub y_test: String,
}

impl TryFrom<&Split> for SplitResponse {
    type Error = serde_json::Error;

    fn try_from(split: &Split) -> Result<Self, Self::Error> {
        Ok(Self {
            x_train: serde_json::to_string(&split.x_train)?,
            x_test: serde_json::to_string(&split.x_test)?,
            y_train: serde_json::to_string(&split.y_train)?,
            y_test: serde_json::to_string(&split.y_test)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrainResponse {
    pub message: String,
    pub model_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictRequest {
    /// Feature rows, one per sample.
    pub data: Vec<Vec<f64>>,
    /// Model to predict with. Defaults to `iris`.
    #[serde(default)]
    pub model: Option<ModelId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PredictResponse {
    pub predictions: Vec<String>,
}
