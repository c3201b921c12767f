//! Firestore REST client backing the remote [`ParameterStore`].
//!
//! The hyperparameters live in a single document. Reads use `GET`, writes use
//! `PATCH` without an update mask so the document is replaced (and created
//! when missing).

use std::collections::BTreeMap;

use flower_core::{Criterion, Hyperparameters, ParameterError, ParameterStore};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::{error::RemoteError, http::build_client, http::check_response};

/// Location of the parameters document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    pub project_id: String,
    pub database: String,
    pub collection: String,
    pub document: String,
}

impl DocumentLocation {
    /// Resource path relative to the REST base URL.
    #[must_use]
    pub fn path(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents/{}/{}",
            urlencoding::encode(&self.project_id),
            self.database,
            urlencoding::encode(&self.collection),
            urlencoding::encode(&self.document),
        )
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FirestoreDocument {
    #[serde(default)]
    fields: BTreeMap<String, Value>,
}

/// Parameter store holding one Firestore document.
#[derive(Clone)]
pub struct FirestoreParameterStore {
    http: reqwest::Client,
    url: String,
    access_token: String,
}

impl FirestoreParameterStore {
    /// Build a client for the document at `location` under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        location: &DocumentLocation,
        access_token: impl Into<String>,
    ) -> Result<Self, RemoteError> {
        Ok(Self {
            http: build_client()?,
            url: format!("{}/{}", base_url.trim_end_matches('/'), location.path()),
            access_token: access_token.into(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode the hyperparameters document.
    ///
    /// # Errors
    ///
    /// [`RemoteError::NotFound`] when the document does not exist,
    /// [`RemoteError::Parse`] when its fields are not valid hyperparameters,
    /// and transport or API errors otherwise.
    pub async fn fetch(&self) -> Result<Hyperparameters, RemoteError> {
        let resp = self
            .http
            .get(&self.url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let doc: FirestoreDocument = check_response(resp).await?.json().await?;
        debug!(url = %self.url, "fetched parameters document");
        decode_fields(&doc.fields)
    }

    /// Replace the hyperparameters document.
    ///
    /// # Errors
    ///
    /// Returns transport or API errors from the service.
    pub async fn write(&self, values: &Hyperparameters) -> Result<(), RemoteError> {
        let resp = self
            .http
            .patch(&self.url)
            .bearer_auth(&self.access_token)
            .json(&encode_document(values))
            .send()
            .await?;
        check_response(resp).await?;
        info!(url = %self.url, n_estimators = values.n_estimators, criterion = %values.criterion, "wrote parameters document");
        Ok(())
    }
}

impl ParameterStore for FirestoreParameterStore {
    async fn create_collection(&self) -> Result<(), ParameterError> {
        Ok(self.write(&Hyperparameters::default()).await?)
    }

    async fn get_parameters(&self) -> Result<Hyperparameters, ParameterError> {
        Ok(self.fetch().await?)
    }

    async fn update_parameters(&self, values: &Hyperparameters) -> Result<(), ParameterError> {
        Ok(self.write(values).await?)
    }
}

fn encode_document(values: &Hyperparameters) -> Value {
    let mut fields = serde_json::Map::new();
    fields.insert(
        "n_estimators".into(),
        json!({ "integerValue": values.n_estimators.to_string() }),
    );
    fields.insert(
        "criterion".into(),
        json!({ "stringValue": values.criterion.as_str() }),
    );
    if let Some(depth) = values.max_depth {
        fields.insert("max_depth".into(), json!({ "integerValue": depth.to_string() }));
    }
    json!({ "fields": fields })
}

fn decode_fields(fields: &BTreeMap<String, Value>) -> Result<Hyperparameters, RemoteError> {
    let n_estimators = fields
        .get("n_estimators")
        .ok_or_else(|| RemoteError::Parse("missing field 'n_estimators'".into()))
        .and_then(|v| integer_value("n_estimators", v))?;

    let criterion = fields
        .get("criterion")
        .ok_or_else(|| RemoteError::Parse("missing field 'criterion'".into()))?
        .get("stringValue")
        .and_then(Value::as_str)
        .ok_or_else(|| RemoteError::Parse("field 'criterion' is not a string".into()))?;
    let criterion = Criterion::parse(criterion)
        .ok_or_else(|| RemoteError::Parse(format!("unknown criterion '{criterion}'")))?;

    let max_depth = match fields.get("max_depth") {
        None => None,
        Some(v) if v.get("nullValue").is_some() => None,
        Some(v) => Some(integer_value("max_depth", v)?),
    };

    Ok(Hyperparameters {
        n_estimators,
        criterion,
        max_depth,
    })
}

/// Firestore encodes 64-bit integers as JSON strings.
fn integer_value(field: &str, value: &Value) -> Result<u16, RemoteError> {
    let raw = value
        .get("integerValue")
        .ok_or_else(|| RemoteError::Parse(format!("field '{field}' is not an integer")))?;
    let parsed = match raw {
        Value::String(s) => s.parse::<u16>().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        _ => None,
    };
    parsed.ok_or_else(|| RemoteError::Parse(format!("field '{field}' is out of range: {raw}")))
}
