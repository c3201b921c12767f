//! Model files on disk, one per [`ModelId`].

use std::io::Write;
use std::path::{Path, PathBuf};

use flower_core::{Hyperparameters, ModelId, Series, Table};

use crate::error::ModelError;
use crate::forest::Classifier;

/// Owns the model directory. It is the only writer of the files in it.
///
/// ```text
/// Absent --train--> Present --train--> Present (replaced)
/// Present --predict--> Present
/// Absent --predict--> NotFound
/// ```
#[derive(Debug, Clone)]
pub struct ModelManager {
    model_dir: PathBuf,
}

impl ModelManager {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
        }
    }

    #[must_use]
    pub fn model_path(&self, id: &ModelId) -> PathBuf {
        self.model_dir.join(id.file_name())
    }

    /// Fit a classifier and persist it under `id`, replacing any previous
    /// model with that id. Returns the model file path.
    ///
    /// # Errors
    ///
    /// [`ModelError::Train`] if fitting fails, [`ModelError::Save`] if the
    /// model cannot be written.
    pub fn train(
        &self,
        id: &ModelId,
        features: &Table,
        labels: &Series,
        params: &Hyperparameters,
    ) -> Result<PathBuf, ModelError> {
        let classifier = Classifier::fit(features, labels, params)?;
        let path = self.model_path(id);
        self.write(&path, &classifier)?;

        tracing::info!(
            model = %id,
            path = %path.display(),
            rows = features.len(),
            classes = classifier.classes.len(),
            n_estimators = params.n_estimators,
            criterion = %params.criterion,
            "model trained"
        );
        Ok(path)
    }

    /// Load the model stored under `id`.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] if no model file exists,
    /// [`ModelError::Load`] if it cannot be read or deserialized.
    pub fn load(&self, id: &ModelId) -> Result<Classifier, ModelError> {
        let path = self.model_path(id);
        let raw = match std::fs::read(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ModelError::NotFound { path });
            }
            Err(err) => return Err(ModelError::Load(err.to_string())),
        };
        serde_json::from_slice(&raw).map_err(|e| ModelError::Load(e.to_string()))
    }

    /// Predict labels for `rows` with the model stored under `id`.
    ///
    /// # Errors
    ///
    /// See [`Self::load`] and [`Classifier::predict`].
    pub fn predict(&self, id: &ModelId, rows: &[Vec<f64>]) -> Result<Vec<String>, ModelError> {
        let classifier = self.load(id)?;
        let predictions = classifier.predict(rows)?;
        tracing::debug!(model = %id, rows = rows.len(), "predicted");
        Ok(predictions)
    }

    fn write(&self, path: &Path, classifier: &Classifier) -> Result<(), ModelError> {
        std::fs::create_dir_all(&self.model_dir).map_err(ModelError::Save)?;
        let bytes = serde_json::to_vec(classifier)
            .map_err(|e| ModelError::Save(std::io::Error::other(e)))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.model_dir).map_err(ModelError::Save)?;
        tmp.write_all(&bytes).map_err(ModelError::Save)?;
        tmp.persist(path).map_err(|e| ModelError::Save(e.error))?;
        Ok(())
    }
}
