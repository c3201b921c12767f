//! Hyperparameters kept in a section of a local JSON file.
//!
//! The file maps a model family name to its hyperparameters:
//!
//! ```json
//! { "RandomForestClassifier": { "n_estimators": 100, "criterion": "gini" } }
//! ```

use std::path::PathBuf;
use std::time::Duration;

use flower_core::{Hyperparameters, ParameterError, ParameterStore};
use serde_json::Map;

use crate::document::{read_object, write_atomic};
use crate::error::StoreError;
use crate::lock::DocumentLock;

#[derive(Debug, Clone)]
pub struct LocalParameterFile {
    path: PathBuf,
    family: String,
    lock_timeout: Duration,
}

impl LocalParameterFile {
    pub fn new(path: impl Into<PathBuf>, family: impl Into<String>, lock_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            family: family.into(),
            lock_timeout,
        }
    }

    /// Read this family's section.
    ///
    /// # Errors
    ///
    /// [`ParameterError::NotFound`] if the file or the section is missing,
    /// [`ParameterError::InvalidFormat`] if either cannot be parsed.
    pub fn load(&self) -> Result<Hyperparameters, ParameterError> {
        let document = read_object(&self.path).map_err(|e| match e {
            StoreError::DocumentNotFound { .. } => {
                ParameterError::NotFound("Parameters file not found".into())
            }
            StoreError::InvalidFormat(err) => ParameterError::InvalidFormat(err.to_string()),
            other => ParameterError::Store(other.to_string()),
        })?;
        let section = document.get(&self.family).ok_or_else(|| {
            ParameterError::NotFound(format!("Parameters for '{}' not found", self.family))
        })?;
        serde_json::from_value(section.clone())
            .map_err(|e| ParameterError::InvalidFormat(e.to_string()))
    }

    /// Replace this family's section, keeping the other families. Creates the
    /// file when it does not exist yet.
    ///
    /// # Errors
    ///
    /// [`ParameterError::Store`] on lock or write failure,
    /// [`ParameterError::InvalidFormat`] if the existing file is not a JSON
    /// object.
    pub fn store(&self, values: &Hyperparameters) -> Result<(), ParameterError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ParameterError::Store(format!("Error writing parameters file: {e}")))?;
        }
        let _lock = DocumentLock::acquire(&self.path, self.lock_timeout)
            .map_err(|e| ParameterError::Store(e.to_string()))?;

        let mut document = match read_object(&self.path) {
            Ok(document) => document,
            Err(StoreError::DocumentNotFound { .. }) => Map::new(),
            Err(StoreError::InvalidFormat(err)) => {
                return Err(ParameterError::InvalidFormat(err.to_string()));
            }
            Err(other) => return Err(ParameterError::Store(other.to_string())),
        };

        let section =
            serde_json::to_value(values).map_err(|e| ParameterError::Store(e.to_string()))?;
        document.insert(self.family.clone(), section);
        write_atomic(&self.path, &document).map_err(|e| ParameterError::Store(e.to_string()))?;

        tracing::info!(
            family = %self.family,
            n_estimators = values.n_estimators,
            criterion = %values.criterion,
            "hyperparameters saved"
        );
        Ok(())
    }
}

async fn blocking<T, F>(f: F) -> Result<T, ParameterError>
where
    F: FnOnce() -> Result<T, ParameterError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ParameterError::Store(format!("parameter file task failed: {e}")))?
}

impl ParameterStore for LocalParameterFile {
    async fn create_collection(&self) -> Result<(), ParameterError> {
        let store = self.clone();
        blocking(move || store.store(&Hyperparameters::default())).await
    }

    async fn get_parameters(&self) -> Result<Hyperparameters, ParameterError> {
        let store = self.clone();
        blocking(move || store.load()).await
    }

    async fn update_parameters(&self, values: &Hyperparameters) -> Result<(), ParameterError> {
        let store = self.clone();
        let values = values.clone();
        blocking(move || store.store(&values)).await
    }
}
