//! Dataset pipeline settings.

use serde::{Deserialize, Serialize};

fn default_label_column() -> String {
    "Species".to_string()
}

fn default_prefix() -> String {
    "iris-".to_string()
}

const fn default_seed() -> u64 {
    42
}

const fn default_test_percent() -> u8 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Category column used as classification target.
    #[serde(default = "default_label_column")]
    pub label_column: String,

    /// Vendor prefix stripped from column names and category values.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Seed of the train/test shuffle. Changing it changes every split.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Share of rows, in percent, held out for testing.
    #[serde(default = "default_test_percent")]
    pub test_percent: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label_column: default_label_column(),
            prefix: default_prefix(),
            seed: default_seed(),
            test_percent: default_test_percent(),
        }
    }
}
