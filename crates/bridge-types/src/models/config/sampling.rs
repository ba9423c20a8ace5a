//! Sampling parameters: configured defaults and per-request overrides.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default sampling parameters applied when a request leaves a value unset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate)]
pub struct SamplingDefaults {
    /// Nucleus sampling threshold
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    /// Top-k sampling
    #[validate(range(min = 1_u32))]
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    /// Sampling temperature
    #[validate(range(min = 0.0, max = 2.0))]
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum output tokens
    #[validate(range(min = 1_u32))]
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_top_p() -> f64 {
    0.85
}

fn default_top_k() -> u32 {
    50
}

fn default_temperature() -> f64 {
    1.0
}

fn default_max_tokens() -> u32 {
    8096
}

impl Default for SamplingDefaults {
    fn default() -> Self {
        Self {
            top_p: default_top_p(),
            top_k: default_top_k(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Sampling values carried by a single request. Unset values fall back to
/// [`SamplingDefaults`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SamplingParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}
