//! JSON Schemas of every request and response body, served at `/docs`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use flower_core::{
    DatasetDescriptor, Hyperparameters, Table,
    responses::{
        ErrorResponse, HealthResponse, MessageResponse, PredictRequest, PredictResponse,
        SplitResponse, TrainResponse,
    },
};
use schemars::schema_for;
use serde_json::Value;

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap_or_default());
    };
}

static SCHEMAS: LazyLock<BTreeMap<&'static str, Value>> = LazyLock::new(|| {
    let mut schemas = BTreeMap::new();

    // Request bodies
    register!(schemas, "dataset", DatasetDescriptor);
    register!(schemas, "predict_request", PredictRequest);
    register!(schemas, "hyperparameters", Hyperparameters);

    // Response bodies
    register!(schemas, "message_response", MessageResponse);
    register!(schemas, "error_response", ErrorResponse);
    register!(schemas, "health_response", HealthResponse);
    register!(schemas, "table", Table);
    register!(schemas, "split_response", SplitResponse);
    register!(schemas, "train_response", TrainResponse);
    register!(schemas, "predict_response", PredictResponse);

    schemas
});

/// All schemas keyed by body name.
pub fn schemas() -> &'static BTreeMap<&'static str, Value> {
    &SCHEMAS
}
