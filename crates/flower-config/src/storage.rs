//! Filesystem locations of persisted state.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_config_path() -> PathBuf {
    PathBuf::from("config/config.json")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/iris/Iris.csv")
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("models")
}

const fn default_lock_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Dataset configuration document.
    #[serde(default = "default_config_path")]
    pub config_path: PathBuf,

    /// Directory that downloaded datasets are written into.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// CSV file read by the iris pipeline.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Directory holding one serialized file per trained model.
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// How long a writer waits for the configuration document lock.
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
            data_dir: default_data_dir(),
            dataset_path: default_dataset_path(),
            model_dir: default_model_dir(),
            lock_timeout_secs: default_lock_timeout_secs(),
        }
    }
}

impl StorageConfig {
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout_secs)
    }
}
