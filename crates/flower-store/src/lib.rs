//! # flower-store
//!
//! JSON document stores for flower:
//!
//! - [`JsonFileRepository`]: the dataset registry, a single JSON object
//!   mapping dataset names to descriptors.
//! - [`LocalParameterFile`]: classifier hyperparameters kept in a section of
//!   a local JSON file, one of the two [`flower_core::ParameterStore`]
//!   implementations.
//!
//! Both rewrite their document in full on every mutation, under a
//! [`DocumentLock`], via temp file + rename.

mod document;
pub mod error;
pub mod lock;
pub mod parameters;
pub mod repository;

pub use error::StoreError;
pub use lock::DocumentLock;
pub use parameters::LocalParameterFile;
pub use repository::{DatasetRepository, JsonFileRepository};
