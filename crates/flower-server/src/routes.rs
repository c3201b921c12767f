//! API route handlers.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::Redirect,
};
use flower_core::{
    DatasetDescriptor, Hyperparameters, ModelId, ParameterStore, Table,
    responses::{
        HealthResponse, MessageResponse, PredictRequest, PredictResponse, SplitResponse,
        TrainResponse,
    },
};
use serde::Deserialize;
use serde_json::Value;

use crate::{docs, error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct DatasetQuery {
    #[serde(default = "default_dataset")]
    pub name: String,
}

fn default_dataset() -> String {
    "iris".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelQuery {
    pub model: Option<String>,
}

/// Run blocking file or model work off the async workers.
async fn blocking<T, E>(work: impl FnOnce() -> Result<T, E> + Send + 'static) -> Result<T, ApiError>
where
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(work).await?.map_err(Into::into)
}

pub async fn root() -> Redirect {
    Redirect::temporary("/docs")
}

pub async fn api_docs() -> Json<Value> {
    Json(serde_json::to_value(docs::schemas()).unwrap_or_default())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ── Dataset registry ──────────────────────────────────────────────

pub async fn get_dataset_info(
    State(state): State<AppState>,
    query: Result<Query<DatasetQuery>, QueryRejection>,
) -> Result<Json<DatasetDescriptor>, ApiError> {
    let Query(query) = query?;
    let datasets = state.datasets.clone();
    let descriptor = blocking(move || datasets.get_dataset_info(&query.name)).await?;
    Ok(Json(descriptor))
}

pub async fn list_datasets(
    State(state): State<AppState>,
) -> Result<Json<Vec<DatasetDescriptor>>, ApiError> {
    let datasets = state.datasets.clone();
    Ok(Json(blocking(move || datasets.list_datasets()).await?))
}

pub async fn add_dataset(
    State(state): State<AppState>,
    payload: Result<Json<DatasetDescriptor>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(descriptor) = payload?;
    let datasets = state.datasets.clone();
    blocking(move || datasets.add_dataset(&descriptor)).await?;
    Ok(Json(MessageResponse::new("Dataset added successfully")))
}

pub async fn update_dataset(
    State(state): State<AppState>,
    payload: Result<Json<DatasetDescriptor>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(descriptor) = payload?;
    let datasets = state.datasets.clone();
    blocking(move || datasets.update_dataset(&descriptor)).await?;
    Ok(Json(MessageResponse::new("Dataset updated successfully")))
}

pub async fn download_dataset(
    State(state): State<AppState>,
    query: Result<Query<DatasetQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(query) = query?;
    let datasets = state.datasets.clone();
    let descriptor = blocking(move || datasets.get_dataset_info(&query.name)).await?;
    state
        .downloader
        .download(&descriptor)
        .await
        .map_err(ApiError::Download)?;
    Ok(Json(MessageResponse::new("Dataset downloaded successfully")))
}

// ── Iris pipeline ─────────────────────────────────────────────────

pub async fn load_iris_dataset(State(state): State<AppState>) -> Result<Json<Table>, ApiError> {
    let pipeline = state.pipeline.clone();
    Ok(Json(blocking(move || pipeline.load_dataset()).await?))
}

pub async fn process_iris_dataset(State(state): State<AppState>) -> Result<Json<Table>, ApiError> {
    let pipeline = state.pipeline.clone();
    let processed = blocking(move || {
        let raw = pipeline.load_dataset()?;
        pipeline.process(&raw)
    })
    .await?;
    Ok(Json(processed))
}

pub async fn split_iris_dataset(
    State(state): State<AppState>,
) -> Result<Json<SplitResponse>, ApiError> {
    let pipeline = state.pipeline.clone();
    let split = blocking(move || pipeline.prepare()).await?;
    Ok(Json(SplitResponse::try_from(&split)?))
}

// ── Model ─────────────────────────────────────────────────────────

pub async fn train_iris_model(
    State(state): State<AppState>,
    query: Result<Query<ModelQuery>, QueryRejection>,
) -> Result<Json<TrainResponse>, ApiError> {
    let Query(query) = query?;
    let id = query
        .model
        .map_or_else(|| Ok(ModelId::default()), ModelId::new)?;
    let params = state
        .parameters
        .get_parameters()
        .await
        .map_err(ApiError::Hyperparameters)?;

    let pipeline = state.pipeline.clone();
    let models = state.models.clone();
    let path = blocking(move || -> Result<_, ApiError> {
        let split = pipeline.prepare()?;
        Ok(models.train(&id, &split.x_train, &split.y_train, &params)?)
    })
    .await?;

    Ok(Json(TrainResponse {
        message: "Model trained and saved successfully".to_string(),
        model_path: path.display().to_string(),
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload?;
    let id = request.model.unwrap_or_default();
    let models = state.models.clone();
    let predictions = blocking(move || models.predict(&id, &request.data)).await?;
    Ok(Json(PredictResponse { predictions }))
}

// ── Parameters ────────────────────────────────────────────────────

pub async fn create_collection(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.parameters.create_collection().await?;
    Ok(Json(MessageResponse::new(
        "Firestore collection created successfully",
    )))
}

pub async fn get_parameters(
    State(state): State<AppState>,
) -> Result<Json<Hyperparameters>, ApiError> {
    Ok(Json(state.parameters.get_parameters().await?))
}

pub async fn update_parameters(
    State(state): State<AppState>,
    payload: Result<Json<Hyperparameters>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(values) = payload?;
    values.validate()?;
    state.parameters.update_parameters(&values).await?;
    Ok(Json(MessageResponse::new("Parameters updated successfully")))
}
