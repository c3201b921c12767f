//! # flower-data
//!
//! The iris dataset pipeline: load a CSV file, normalize vendor-prefixed
//! labels, and split into train/test sets.
//!
//! There is no persisted split artifact. A model trained in one request and
//! evaluated in a later one relies on [`Pipeline::split`] regenerating the
//! same partition from the same file, which the fixed seed guarantees.

pub mod error;
pub mod load;
pub mod process;
pub mod split;

pub use error::PipelineError;

use std::path::{Path, PathBuf};

use flower_core::{Split, Table};

pub const DEFAULT_LABEL_COLUMN: &str = "Species";
pub const DEFAULT_PREFIX: &str = "iris-";
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TEST_PERCENT: u8 = 20;

/// Load/process/split over one dataset file.
#[derive(Debug, Clone)]
pub struct Pipeline {
    dataset_path: PathBuf,
    label_column: String,
    prefix: String,
    seed: u64,
    test_percent: u8,
}

impl Pipeline {
    /// Pipeline with the iris defaults: label `Species`, prefix `iris-`,
    /// seed 42, 20 % test rows.
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            seed: DEFAULT_SEED,
            test_percent: DEFAULT_TEST_PERCENT,
        }
    }

    #[must_use]
    pub fn with_label_column(mut self, label_column: impl Into<String>) -> Self {
        self.label_column = label_column.into();
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn with_test_percent(mut self, test_percent: u8) -> Self {
        self.test_percent = test_percent;
        self
    }

    #[must_use]
    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    #[must_use]
    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// Read the dataset file.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NotFound`] if the file is absent,
    /// [`PipelineError::Load`] if it is not valid CSV.
    pub fn load_dataset(&self) -> Result<Table, PipelineError> {
        load::load_csv(&self.dataset_path)
    }

    /// Strip the vendor prefix from column names and labels.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Process`] if the label column is absent.
    pub fn process(&self, table: &Table) -> Result<Table, PipelineError> {
        process::strip_prefix(table, &self.label_column, &self.prefix)
    }

    /// Deterministic train/test partition.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Split`] if the label column is absent or the table
    /// has fewer than two rows.
    pub fn split(&self, table: &Table) -> Result<Split, PipelineError> {
        split::train_test_split(table, &self.label_column, self.seed, self.test_percent)
    }

    /// Load, process and split in one go. This is what training consumes.
    ///
    /// # Errors
    ///
    /// Any error of the three stages.
    pub fn prepare(&self) -> Result<Split, PipelineError> {
        let raw = self.load_dataset()?;
        let processed = self.process(&raw)?;
        self.split(&processed)
    }
}
