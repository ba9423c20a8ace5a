//! Signature cache sizing.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Capacity of the two signature maps. Least recently used entries are evicted
/// once a map is full.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct SignatureCacheConfig {
    /// Entries keyed by tool-call id
    #[validate(range(min = 1_usize))]
    #[serde(default = "default_capacity")]
    pub tool_capacity: usize,
    /// Entries keyed by assistant text (each text may occupy up to three keys)
    #[validate(range(min = 1_usize))]
    #[serde(default = "default_capacity")]
    pub text_capacity: usize,
}

fn default_capacity() -> usize {
    1024
}

impl Default for SignatureCacheConfig {
    fn default() -> Self {
        Self { tool_capacity: default_capacity(), text_capacity: default_capacity() }
    }
}
