//! Firestore (remote document store) configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_collection() -> String {
    "parameters".to_string()
}

fn default_document() -> String {
    "parameters".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FirestoreConfig {
    /// REST endpoint root. Point at the emulator for local runs.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Google Cloud project id.
    #[serde(default)]
    pub project_id: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_document")]
    pub document: String,

    /// OAuth2 bearer token (e.g. from `gcloud auth print-access-token`).
    #[serde(default)]
    pub access_token: String,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            project_id: String::new(),
            database: default_database(),
            collection: default_collection(),
            document: default_document(),
            access_token: String::new(),
        }
    }
}

impl FirestoreConfig {
    /// Check if the project and credentials needed for remote access are set.
    pub fn is_configured(&self) -> bool {
        !self.project_id.is_empty() && !self.access_token.is_empty()
    }
}
