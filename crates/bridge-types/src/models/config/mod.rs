//! Bridge configuration models.

mod cache;
mod model_policy;
mod sampling;

pub use cache::SignatureCacheConfig;
pub use model_policy::ModelPolicyConfig;
pub use sampling::{SamplingDefaults, SamplingParams};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ConfigError;

/// Instruction sent when neither the configured default nor the request's
/// system turns contribute any text.
pub const FALLBACK_SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";

/// Thinking budget used when a model is thinking-eligible.
pub const DEFAULT_THINKING_BUDGET: u32 = 1024;

/// Full bridge configuration.
///
/// Every field is defaulted, so an empty JSON object is a valid config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct BridgeConfig {
    /// Sampling parameter defaults used when the request leaves them unset
    #[validate(nested)]
    #[serde(default)]
    pub defaults: SamplingDefaults,
    /// Instruction prepended to the request's own system turns
    #[serde(default)]
    pub system_instruction: String,
    /// Instruction used when the merged system instruction is empty
    #[serde(default = "default_fallback_instruction")]
    pub fallback_system_instruction: String,
    /// Thinking budget for thinking-eligible models
    #[validate(range(min = 1_u32))]
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,
    /// Model-name feature gates
    #[serde(default)]
    pub models: ModelPolicyConfig,
    /// Signature cache sizing
    #[validate(nested)]
    #[serde(default)]
    pub signature_cache: SignatureCacheConfig,
}

fn default_fallback_instruction() -> String {
    FALLBACK_SYSTEM_INSTRUCTION.to_string()
}

fn default_thinking_budget() -> u32 {
    DEFAULT_THINKING_BUDGET
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            defaults: SamplingDefaults::default(),
            system_instruction: String::new(),
            fallback_system_instruction: default_fallback_instruction(),
            thinking_budget: DEFAULT_THINKING_BUDGET,
            models: ModelPolicyConfig::default(),
            signature_cache: SignatureCacheConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Run field validation and fold the first failure into a [`ConfigError`].
    pub fn check(&self) -> Result<(), ConfigError> {
        if let Err(errors) = self.validate() {
            let message = errors.to_string();
            let field = message.split(':').next().unwrap_or("config").trim().to_string();
            return Err(ConfigError::invalid(&field, message));
        }
        if self.fallback_system_instruction.trim().is_empty() {
            return Err(ConfigError::invalid(
                "fallback_system_instruction",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
