//! Shared handler state, built once from configuration.

use std::sync::Arc;

use flower_config::{FlowerConfig, ParameterSource};
use flower_core::{Hyperparameters, ParameterError, ParameterStore};
use flower_data::Pipeline;
use flower_model::ModelManager;
use flower_remote::{DatasetDownloader, DocumentLocation, FirestoreParameterStore, RemoteError};
use flower_store::{DatasetRepository, JsonFileRepository, LocalParameterFile};

/// The hyperparameter source selected by `parameters.source`.
#[derive(Clone)]
pub enum ParameterBackend {
    Local(LocalParameterFile),
    Firestore(FirestoreParameterStore),
}

impl ParameterBackend {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Firestore(_) => "firestore",
        }
    }
}

impl ParameterStore for ParameterBackend {
    async fn create_collection(&self) -> Result<(), ParameterError> {
        match self {
            Self::Local(store) => store.create_collection().await,
            Self::Firestore(store) => store.create_collection().await,
        }
    }

    async fn get_parameters(&self) -> Result<Hyperparameters, ParameterError> {
        match self {
            Self::Local(store) => store.get_parameters().await,
            Self::Firestore(store) => store.get_parameters().await,
        }
    }

    async fn update_parameters(&self, values: &Hyperparameters) -> Result<(), ParameterError> {
        match self {
            Self::Local(store) => store.update_parameters(values).await,
            Self::Firestore(store) => store.update_parameters(values).await,
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub datasets: Arc<dyn DatasetRepository>,
    pub pipeline: Arc<Pipeline>,
    pub models: Arc<ModelManager>,
    pub parameters: ParameterBackend,
    pub downloader: DatasetDownloader,
}

impl AppState {
    /// Wire every component from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] if an HTTP client cannot be built.
    pub fn from_config(config: &FlowerConfig) -> Result<Self, RemoteError> {
        let storage = &config.storage;
        let datasets = JsonFileRepository::new(&storage.config_path, storage.lock_timeout());

        let pipeline = Pipeline::new(&storage.dataset_path)
            .with_label_column(&config.pipeline.label_column)
            .with_prefix(&config.pipeline.prefix)
            .with_seed(config.pipeline.seed)
            .with_test_percent(config.pipeline.test_percent);

        let parameters = match config.parameters.source {
            ParameterSource::Local => ParameterBackend::Local(LocalParameterFile::new(
                &config.parameters.local_path,
                &config.parameters.family,
                storage.lock_timeout(),
            )),
            ParameterSource::Firestore => {
                let fs = &config.firestore;
                let location = DocumentLocation {
                    project_id: fs.project_id.clone(),
                    database: fs.database.clone(),
                    collection: fs.collection.clone(),
                    document: fs.document.clone(),
                };
                ParameterBackend::Firestore(FirestoreParameterStore::new(
                    &fs.base_url,
                    &location,
                    &fs.access_token,
                )?)
            }
        };

        tracing::info!(
            config_path = %storage.config_path.display(),
            dataset_path = %storage.dataset_path.display(),
            model_dir = %storage.model_dir.display(),
            parameters = parameters.name(),
            "application state ready"
        );

        Ok(Self {
            datasets: Arc::new(datasets),
            pipeline: Arc::new(pipeline),
            models: Arc::new(ModelManager::new(&storage.model_dir)),
            parameters,
            downloader: DatasetDownloader::new(&storage.data_dir)?,
        })
    }
}
