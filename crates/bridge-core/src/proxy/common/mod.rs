//! Shared utilities for the request mappers.

pub mod json_schema;
pub mod media;
pub mod model_policy;
pub mod request_id;

pub use model_policy::{ModelPolicy, ModelRoute};
pub use request_id::{RequestIdSource, SequentialRequestIds, UuidRequestIds};
