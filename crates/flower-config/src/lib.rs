//! # flower-config
//!
//! Layered configuration loading for flower using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FLOWER_*` prefix, `__` as separator)
//! 2. Project-level `flower.toml` in the working directory
//! 3. User-level `~/.config/flower/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FLOWER_SERVER__PORT` -> `server.port`,
//! `FLOWER_FIRESTORE__ACCESS_TOKEN` -> `firestore.access_token`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use flower_config::FlowerConfig;
//!
//! let config = FlowerConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.bind_address());
//! ```

mod error;
mod firestore;
mod parameters;
mod pipeline;
mod server;
mod storage;

pub use error::ConfigError;
pub use firestore::FirestoreConfig;
pub use parameters::{ParameterSource, ParametersConfig};
pub use pipeline::PipelineConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlowerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub firestore: FirestoreConfig,
}

impl FlowerConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or the merged
    /// configuration fails [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a configuration from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("flower.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("FLOWER_").split("__"))
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidValue`] if `pipeline.test_percent` is outside
    ///   `1..=99` or `pipeline.label_column` is empty.
    /// - [`ConfigError::NotConfigured`] if the firestore parameter source is
    ///   selected without a project id and access token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=99).contains(&self.pipeline.test_percent) {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.test_percent".into(),
                reason: format!("{} is not within 1..=99", self.pipeline.test_percent),
            });
        }
        if self.pipeline.label_column.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.label_column".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.parameters.source == ParameterSource::Firestore && !self.firestore.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "firestore".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("flower").join("config.toml"))
    }
}
