// Response side of the signature cache
use serde_json::Value;

use super::wrapper::unwrap_response;
use crate::proxy::SignatureCache;

/// Counts of signatures recorded by [`harvest_signatures`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestStats {
    pub tool_signatures: usize,
    pub text_signatures: usize,
}

/// Record the thought signatures of a backend response.
///
/// Function calls are stored by id. For each candidate, the visible
/// (non-thought) text is stored under the signature of the last text part
/// that carried one, which is how the client will later send that text back.
pub fn harvest_signatures(response: &Value, cache: &SignatureCache) -> HarvestStats {
    let mut stats = HarvestStats::default();
    let candidates = unwrap_response(response)
        .get("candidates")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for candidate in candidates {
        let parts = candidate
            .pointer("/content/parts")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut visible_text = String::new();
        let mut text_signature: Option<&str> = None;

        for part in parts {
            let signature = part.get("thoughtSignature").and_then(Value::as_str);

            if let Some(call) = part.get("functionCall") {
                let id = call.get("id").and_then(Value::as_str).unwrap_or_default();
                if let Some(signature) = signature.filter(|_| !id.is_empty()) {
                    cache.put(id, signature);
                    stats.tool_signatures += 1;
                }
                continue;
            }

            let Some(text) = part.get("text").and_then(Value::as_str) else {
                continue;
            };
            if signature.is_some() {
                text_signature = signature;
            }
            let is_thought = part.get("thought").and_then(Value::as_bool).unwrap_or(false);
            if !is_thought {
                visible_text.push_str(text);
            }
        }

        if let Some(signature) = text_signature {
            if !visible_text.trim().is_empty() {
                cache.put_for_text(&visible_text, signature);
                stats.text_signatures += 1;
            }
        }
    }

    if stats != HarvestStats::default() {
        tracing::debug!(
            "[Gemini-Harvest] Recorded {} tool and {} text signature(s)",
            stats.tool_signatures,
            stats.text_signatures
        );
    }
    stats
}
