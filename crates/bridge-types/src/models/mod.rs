//! Domain models for the Antigravity bridge.
//!
//! Configuration supplied by the host process plus the small value types the
//! external collaborators hand to the translation pipeline.

mod config;
mod session;

pub use config::{
    BridgeConfig, ModelPolicyConfig, SamplingDefaults, SamplingParams, SignatureCacheConfig,
};
pub use session::SessionToken;
