//! Hyperparameter source selection.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where hyperparameters are read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSource {
    /// Section of a local JSON file.
    #[default]
    Local,
    /// Document in the remote Firestore database.
    Firestore,
}

fn default_local_path() -> PathBuf {
    PathBuf::from("config/model_parameters.json")
}

fn default_family() -> String {
    "RandomForestClassifier".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParametersConfig {
    #[serde(default)]
    pub source: ParameterSource,

    /// JSON file used by the local source.
    #[serde(default = "default_local_path")]
    pub local_path: PathBuf,

    /// Top-level key of the local file holding this model family's values.
    #[serde(default = "default_family")]
    pub family: String,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            source: ParameterSource::default(),
            local_path: default_local_path(),
            family: default_family(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_file() {
        let config = ParametersConfig::default();
        assert_eq!(config.source, ParameterSource::Local);
        assert_eq!(config.family, "RandomForestClassifier");
        assert_eq!(
            config.local_path,
            PathBuf::from("config/model_parameters.json")
        );
    }
}
