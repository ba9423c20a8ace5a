//! Proxy translation layer.
//!
//! - `signature_cache`: thought signatures observed in backend responses
//! - `common`: schema sanitizer, model gates, shared helpers
//! - `mappers`: OpenAI and native Gemini request converters

pub mod common;
pub mod mappers;
pub mod signature_cache;

pub use signature_cache::SignatureCache;
