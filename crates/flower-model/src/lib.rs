//! # flower-model
//!
//! Model lifecycle for flower: fit a random forest (`smartcore`) on a
//! train split, persist it as JSON under an explicit [`flower_core::ModelId`],
//! reload it and predict.
//!
//! Hyperparameters are passed in by the caller, who fetches them from a
//! [`flower_core::ParameterStore`].

pub mod error;
pub mod forest;
pub mod manager;

pub use error::ModelError;
pub use forest::Classifier;
pub use manager::ModelManager;
