//! Typed error definitions for the Antigravity bridge.
//!
//! The translation pipeline itself is infallible by construction; errors only
//! surface from the ambient layers (configuration parsing and validation).
//! All errors are serializable, displayable, and matchable.

mod config;

pub use config::ConfigError;
