//! Translation of component errors into HTTP responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use flower_core::{CoreError, ParameterError, responses::ErrorResponse};
use flower_data::PipelineError;
use flower_model::ModelError;
use flower_remote::RemoteError;
use flower_store::StoreError;
use thiserror::Error;

/// Every failure a handler can return.
///
/// The `Display` text becomes the `detail` field of the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Error downloading dataset: {0}")]
    Download(#[source] RemoteError),

    /// Hyperparameters could not be loaded for training.
    #[error("Error loading hyperparameters: {0}")]
    Hyperparameters(#[source] ParameterError),

    #[error("Error encoding response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Request body or query string could not be extracted.
    #[error("{message}")]
    Rejection { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejection {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejection {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Store(err) => match err {
                StoreError::DocumentNotFound { .. } | StoreError::DatasetNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                StoreError::InvalidFormat(_)
                | StoreError::MissingUrl(_)
                | StoreError::InvalidEntry(_) => StatusCode::BAD_REQUEST,
                StoreError::Read(_) | StoreError::Write(_) | StoreError::LockTimeout { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Pipeline(err) => match err {
                PipelineError::NotFound { .. } => StatusCode::NOT_FOUND,
                PipelineError::Process(_) | PipelineError::Split(_) => StatusCode::BAD_REQUEST,
                PipelineError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Model(err) => match err {
                ModelError::NotFound { .. } => StatusCode::NOT_FOUND,
                ModelError::Predict(_) => StatusCode::BAD_REQUEST,
                ModelError::Load(_) | ModelError::Train(_) | ModelError::Save(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Parameters(err) => match err {
                ParameterError::NotFound(_) => StatusCode::NOT_FOUND,
                ParameterError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
                ParameterError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Core(_) => StatusCode::BAD_REQUEST,
            Self::Rejection { status, .. } => *status,
            Self::Download(_) | Self::Hyperparameters(_) | Self::Encode(_) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "request failed");
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn not_found_kinds_map_to_404() {
        let cases: Vec<ApiError> = vec![
            StoreError::DocumentNotFound {
                path: PathBuf::from("config.json"),
            }
            .into(),
            StoreError::DatasetNotFound("iris".into()).into(),
            PipelineError::NotFound {
                path: PathBuf::from("Iris.csv"),
            }
            .into(),
            ModelError::NotFound {
                path: PathBuf::from("iris.json"),
            }
            .into(),
            ParameterError::NotFound("Parameters file not found".into()).into(),
        ];
        for err in cases {
            assert_eq!(err.status(), StatusCode::NOT_FOUND, "{err}");
        }
    }

    #[test]
    fn validation_kinds_map_to_400() {
        let cases: Vec<ApiError> = vec![
            StoreError::MissingUrl("iris".into()).into(),
            PipelineError::Process("Species".into()).into(),
            PipelineError::Split("need at least 2 rows".into()).into(),
            ModelError::Predict("expected 4 features, got 3 in row 0".into()).into(),
            CoreError::InvalidModelId("../x".into()).into(),
        ];
        for err in cases {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{err}");
        }
    }

    #[test]
    fn failures_map_to_500() {
        let write: ApiError = StoreError::Write(std::io::Error::other("Write error")).into();
        assert_eq!(write.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(write.to_string(), "Error writing to config file: Write error");

        let params = ApiError::Hyperparameters(ParameterError::NotFound(
            "Parameters file not found".into(),
        ));
        assert_eq!(params.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let download = ApiError::Download(RemoteError::Parse("Download error".into()));
        assert_eq!(download.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            download.to_string(),
            "Error downloading dataset: parse error: Download error"
        );
    }

    #[test]
    fn rejection_keeps_its_status() {
        let err = ApiError::Rejection {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "missing field `url`".into(),
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "missing field `url`");
    }

    #[test]
    fn detail_is_the_component_message() {
        let err: ApiError = ModelError::NotFound {
            path: PathBuf::from("models/iris.json"),
        }
        .into();
        assert_eq!(err.to_string(), "Model file not found");
    }
}
