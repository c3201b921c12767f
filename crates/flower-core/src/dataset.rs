use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named dataset entry in the configuration document.
///
/// The name doubles as the key of the entry, so two descriptors with the
/// same name cannot coexist in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DatasetDescriptor {
    pub name: String,
    pub url: String,
}

impl DatasetDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
