//! Model-name feature gates.
//!
//! Upstream model identifiers change frequently, so the patterns that decide
//! thinking eligibility, signature exclusion and aliasing are data rather than
//! code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pattern tables consulted when translating a request for a given model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelPolicyConfig {
    /// Substrings marking a vendor whose backend rejects `thoughtSignature`
    #[serde(default = "default_signature_excluded_markers")]
    pub signature_excluded_markers: Vec<String>,
    /// Suffix that marks a thinking variant
    #[serde(default = "default_thinking_suffix")]
    pub thinking_suffix: String,
    /// Exact model names with thinking enabled
    #[serde(default = "default_thinking_models")]
    pub thinking_models: Vec<String>,
    /// Model name prefixes with thinking enabled
    #[serde(default = "default_thinking_prefixes")]
    pub thinking_prefixes: Vec<String>,
    /// Requested model name -> upstream model name
    #[serde(default = "default_aliases")]
    pub aliases: BTreeMap<String, String>,
}

fn default_signature_excluded_markers() -> Vec<String> {
    vec!["claude".to_string()]
}

fn default_thinking_suffix() -> String {
    "-thinking".to_string()
}

fn default_thinking_models() -> Vec<String> {
    ["gemini-2.5-pro", "rev19-uic3-1p", "gpt-oss-120b-medium"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_thinking_prefixes() -> Vec<String> {
    vec!["gemini-3-pro-".to_string()]
}

fn default_aliases() -> BTreeMap<String, String> {
    [
        ("claude-sonnet-4-5-thinking", "claude-sonnet-4-5"),
        ("claude-opus-4-5", "claude-opus-4-5-thinking"),
        ("gemini-2.5-flash-thinking", "gemini-2.5-flash"),
    ]
    .into_iter()
    .map(|(from, to)| (from.to_string(), to.to_string()))
    .collect()
}

impl Default for ModelPolicyConfig {
    fn default() -> Self {
        Self {
            signature_excluded_markers: default_signature_excluded_markers(),
            thinking_suffix: default_thinking_suffix(),
            thinking_models: default_thinking_models(),
            thinking_prefixes: default_thinking_prefixes(),
            aliases: default_aliases(),
        }
    }
}
