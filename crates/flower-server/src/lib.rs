//! # flower-server
//!
//! HTTP API over the flower components: the dataset registry, the iris
//! pipeline, model training and prediction, and the hyperparameter store.
//!
//! Handlers are thin. Each one calls a single component and lets
//! [`ApiError`] turn failures into `{"detail": ...}` responses.

pub mod docs;
pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::{AppState, ParameterBackend};

use axum::{
    Router,
    routing::{get, post, put},
};

/// Build the API router. Middleware layers are added by the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/docs", get(routes::api_docs))
        .route("/health", get(routes::health))
        // Dataset registry
        .route("/datasets", get(routes::list_datasets))
        .route("/get-dataset-info", get(routes::get_dataset_info))
        .route("/add-dataset", post(routes::add_dataset))
        .route("/update-dataset", put(routes::update_dataset))
        .route("/download-dataset", get(routes::download_dataset))
        // Iris pipeline
        .route("/load-iris-dataset", get(routes::load_iris_dataset))
        .route("/process-iris-dataset", get(routes::process_iris_dataset))
        .route("/split-iris-dataset", get(routes::split_iris_dataset))
        // Model
        .route("/train-iris-model", post(routes::train_iris_model))
        .route("/predict", post(routes::predict))
        // Parameters
        .route("/create-firestore-collection", post(routes::create_collection))
        .route("/get-parameters", get(routes::get_parameters))
        .route("/update-parameters", put(routes::update_parameters))
        .with_state(state)
}
