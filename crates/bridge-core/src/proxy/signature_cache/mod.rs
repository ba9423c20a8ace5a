//! Thought signature cache.
//!
//! The backend issues an opaque `thoughtSignature` alongside generated text and
//! function calls and rejects follow-up requests that reference that output
//! without echoing the signature back. OpenAI clients drop the field, so the
//! bridge remembers signatures by tool-call id and by assistant text.
//!
//! Both maps are bounded LRU caches guarded by a mutex each, so a single
//! instance can be shared between concurrent requests.

mod text;

#[cfg(test)]
mod tests;

use antigravity_bridge_types::SignatureCacheConfig;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::OnceLock;

pub use text::{lookup_keys, normalize_for_lookup};

/// Signature remembered for a piece of assistant text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureEntry {
    pub signature: String,
    /// The text exactly as it was stored.
    pub text: String,
}

pub struct SignatureCache {
    tool_signatures: Mutex<LruCache<String, String>>,
    text_signatures: Mutex<LruCache<String, SignatureEntry>>,
}

impl Default for SignatureCache {
    fn default() -> Self {
        Self::from_config(&SignatureCacheConfig::default())
    }
}

impl std::fmt::Debug for SignatureCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureCache")
            .field("tool_entries", &self.tool_len())
            .field("text_entries", &self.text_len())
            .finish()
    }
}

impl SignatureCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(tool_capacity: usize, text_capacity: usize) -> Self {
        let cap = |n: usize| NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN);
        Self {
            tool_signatures: Mutex::new(LruCache::new(cap(tool_capacity))),
            text_signatures: Mutex::new(LruCache::new(cap(text_capacity))),
        }
    }

    pub fn from_config(config: &SignatureCacheConfig) -> Self {
        Self::with_capacity(config.tool_capacity, config.text_capacity)
    }

    /// Process-wide instance with default capacity, for hosts that do not
    /// manage their own cache.
    pub fn global() -> &'static SignatureCache {
        static INSTANCE: OnceLock<SignatureCache> = OnceLock::new();
        INSTANCE.get_or_init(SignatureCache::new)
    }

    /// Remember the signature of a function call.
    pub fn put(&self, call_id: &str, signature: &str) {
        if call_id.is_empty() || signature.is_empty() {
            return;
        }
        tracing::debug!("[SignatureCache] Caching tool signature for id: {}", call_id);
        let _ = self.tool_signatures.lock().put(call_id.to_string(), signature.to_string());
    }

    pub fn get(&self, call_id: &str) -> Option<String> {
        if call_id.is_empty() {
            return None;
        }
        let hit = self.tool_signatures.lock().get(call_id).cloned();
        if hit.is_some() {
            tracing::debug!("[SignatureCache] Hit tool signature for id: {}", call_id);
        }
        hit
    }

    /// Remember the signature of an assistant text under its raw, trimmed and
    /// normalized forms.
    pub fn put_for_text(&self, text: &str, signature: &str) {
        if text.is_empty() || signature.is_empty() {
            return;
        }
        let keys = lookup_keys(text);
        if keys.is_empty() {
            return;
        }

        let entry = SignatureEntry { signature: signature.to_string(), text: text.to_string() };
        let mut cache = self.text_signatures.lock();
        for key in keys {
            let _ = cache.put(key, entry.clone());
        }
        tracing::debug!(
            "[SignatureCache] Caching text signature (text_len={}, sig_len={})",
            text.len(),
            signature.len()
        );
    }

    /// Look up by raw text, then trimmed, then normalized. Blank input never
    /// matches.
    pub fn get_for_text(&self, text: &str) -> Option<SignatureEntry> {
        if text.trim().is_empty() {
            return None;
        }
        let mut cache = self.text_signatures.lock();
        for key in lookup_keys(text) {
            if let Some(entry) = cache.get(&key) {
                tracing::debug!(
                    "[SignatureCache] Hit text signature (sig_len={})",
                    entry.signature.len()
                );
                return Some(entry.clone());
            }
        }
        None
    }

    pub fn tool_len(&self) -> usize {
        self.tool_signatures.lock().len()
    }

    pub fn text_len(&self) -> usize {
        self.text_signatures.lock().len()
    }

    /// Total number of cached keys across both maps.
    pub fn len(&self) -> usize {
        self.tool_len() + self.text_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.tool_signatures.lock().clear();
        self.text_signatures.lock().clear();
    }
}
