//! Dataset registry backed by a single JSON document.

use std::path::{Path, PathBuf};
use std::time::Duration;

use flower_core::DatasetDescriptor;
use serde_json::{Map, Value};

use crate::document::{read_object, write_atomic};
use crate::error::StoreError;
use crate::lock::DocumentLock;

/// Registry of named dataset descriptors.
///
/// Every call observes the latest persisted state; implementations do not
/// cache.
pub trait DatasetRepository: Send + Sync {
    /// Look up one descriptor by name.
    ///
    /// # Errors
    ///
    /// [`StoreError::DocumentNotFound`] or [`StoreError::DatasetNotFound`] if
    /// the document or the entry is absent, [`StoreError::InvalidFormat`] if
    /// the document cannot be parsed, [`StoreError::MissingUrl`] or
    /// [`StoreError::InvalidEntry`] if the entry is malformed.
    fn get_dataset_info(&self, name: &str) -> Result<DatasetDescriptor, StoreError>;

    /// All well-formed descriptors, sorted by name.
    ///
    /// # Errors
    ///
    /// Same document-level errors as [`Self::get_dataset_info`].
    fn list_datasets(&self) -> Result<Vec<DatasetDescriptor>, StoreError>;

    /// Insert or overwrite the entry named `descriptor.name`.
    ///
    /// # Errors
    ///
    /// [`StoreError::DocumentNotFound`] if the document does not exist,
    /// [`StoreError::Write`] or [`StoreError::LockTimeout`] on persistence
    /// failure.
    fn add_dataset(&self, descriptor: &DatasetDescriptor) -> Result<(), StoreError>;

    /// Overwrite an existing entry.
    ///
    /// # Errors
    ///
    /// As [`Self::add_dataset`], plus [`StoreError::DatasetNotFound`] if no
    /// entry with this name exists.
    fn update_dataset(&self, descriptor: &DatasetDescriptor) -> Result<(), StoreError>;
}

/// [`DatasetRepository`] over a JSON object document on disk.
///
/// Mutations run as read-modify-write of the whole document inside a
/// [`DocumentLock`]. Entries the store does not understand are written back
/// unchanged.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    lock_timeout: Duration,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>, lock_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            lock_timeout,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate(
        &self,
        descriptor: &DatasetDescriptor,
        require_existing: bool,
    ) -> Result<(), StoreError> {
        if !self.path.exists() {
            return Err(StoreError::DocumentNotFound {
                path: self.path.clone(),
            });
        }

        let _lock = DocumentLock::acquire(&self.path, self.lock_timeout)?;
        let mut document = read_object(&self.path)?;

        if require_existing && !document.contains_key(&descriptor.name) {
            return Err(StoreError::DatasetNotFound(descriptor.name.clone()));
        }

        let entry = serde_json::to_value(descriptor)
            .map_err(|e| StoreError::Write(std::io::Error::other(e)))?;
        let replaced = document.insert(descriptor.name.clone(), entry).is_some();
        write_atomic(&self.path, &document)?;

        tracing::info!(
            dataset = %descriptor.name,
            url = %descriptor.url,
            replaced,
            path = %self.path.display(),
            "dataset descriptor saved"
        );
        Ok(())
    }
}

fn descriptor_from_entry(name: &str, entry: &Value) -> Result<DatasetDescriptor, StoreError> {
    let Some(fields) = entry.as_object() else {
        return Err(StoreError::InvalidEntry(name.to_string()));
    };
    let url = fields
        .get("url")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::MissingUrl(name.to_string()))?;
    Ok(DatasetDescriptor::new(name, url))
}

impl DatasetRepository for JsonFileRepository {
    fn get_dataset_info(&self, name: &str) -> Result<DatasetDescriptor, StoreError> {
        let document = read_object(&self.path)?;
        tracing::debug!(dataset = name, entries = document.len(), "config document read");
        let entry = document
            .get(name)
            .ok_or_else(|| StoreError::DatasetNotFound(name.to_string()))?;
        descriptor_from_entry(name, entry)
    }

    fn list_datasets(&self) -> Result<Vec<DatasetDescriptor>, StoreError> {
        let document: Map<String, Value> = read_object(&self.path)?;
        let mut descriptors: Vec<DatasetDescriptor> = document
            .iter()
            .filter_map(|(name, entry)| match descriptor_from_entry(name, entry) {
                Ok(descriptor) => Some(descriptor),
                Err(error) => {
                    tracing::warn!(dataset = %name, %error, "skipping malformed dataset entry");
                    None
                }
            })
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(descriptors)
    }

    fn add_dataset(&self, descriptor: &DatasetDescriptor) -> Result<(), StoreError> {
        self.mutate(descriptor, false)
    }

    fn update_dataset(&self, descriptor: &DatasetDescriptor) -> Result<(), StoreError> {
        self.mutate(descriptor, true)
    }
}
