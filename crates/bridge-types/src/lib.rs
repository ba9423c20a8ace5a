//! # Antigravity Bridge Types
//!
//! Core types, configuration models, and error definitions for the Antigravity
//! request bridge.
//!
//! - **`error`** - Typed configuration errors (parsing and validation)
//! - **`models`** - Configuration models (sampling defaults, model policy, cache sizing)
//! - **`protocol`** - OpenAI chat turns and the Gemini/v1internal backend shapes
//!
//! ## Architecture Role
//!
//! ```text
//!        antigravity-bridge-types (this crate)
//!                      │
//!                      ▼
//!        antigravity-bridge-core
//!                      │
//!                      ▼
//!        antigravity-bridge-cli
//! ```
//!
//! All types are serde-serializable and `Clone`; wire types serialize to the
//! exact camelCase field names the backend expects.

pub mod error;
pub mod models;
pub mod protocol;

pub use error::ConfigError;

pub use models::{
    BridgeConfig, ModelPolicyConfig, SamplingDefaults, SamplingParams, SessionToken,
    SignatureCacheConfig,
};
