use antigravity_bridge_types::protocol::{GenerationConfig, ThinkingConfig};
use antigravity_bridge_types::{SamplingDefaults, SamplingParams};

/// Stop sequences sent with every request.
pub const STOP_SEQUENCES: [&str; 4] =
    ["<|user|>", "<|bot|>", "<|context_request|>", "<|endoftext|>"];

/// Thinking decision for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingMode {
    pub enabled: bool,
    pub budget: u32,
    /// Drop `topP`; the signature-excluded vendor rejects it next to thinking.
    pub omit_top_p: bool,
}

pub fn build_generation_config(
    params: &SamplingParams,
    defaults: &SamplingDefaults,
    thinking: ThinkingMode,
) -> GenerationConfig {
    let top_p = if thinking.enabled && thinking.omit_top_p {
        tracing::debug!("[OpenAI-Request] Omitting topP for thinking request");
        None
    } else {
        Some(params.top_p.unwrap_or(defaults.top_p))
    };

    GenerationConfig {
        top_p,
        top_k: params.top_k.unwrap_or(defaults.top_k),
        temperature: params.temperature.unwrap_or(defaults.temperature),
        candidate_count: 1,
        max_output_tokens: params.max_tokens.unwrap_or(defaults.max_tokens),
        stop_sequences: STOP_SEQUENCES.iter().map(|s| (*s).to_string()).collect(),
        thinking_config: ThinkingConfig {
            include_thoughts: thinking.enabled,
            thinking_budget: if thinking.enabled { thinking.budget } else { 0 },
        },
    }
}
