//! Unified error types for the bridge core.
//!
//! The translation pipeline never fails; these errors come from the ambient
//! layers around it (config files, JSON input handed to the entry points).

use antigravity_bridge_types::ConfigError;
use serde::Serialize;
use thiserror::Error;

/// Main error type for bridge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// File system I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input did not have the shape an entry point expects.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

/// Result type alias for bridge operations.
pub type AppResult<T> = Result<T, AppError>;
