use super::{harvest_signatures, unwrap_response, wrap_native, HarvestStats};
use crate::proxy::common::SequentialRequestIds;
use crate::proxy::mappers::MapperContext;
use crate::proxy::SignatureCache;
use crate::AppError;
use antigravity_bridge_types::{BridgeConfig, SessionToken};
use pretty_assertions::assert_eq;
use serde_json::json;

fn token() -> SessionToken {
    SessionToken::new("test-project", "session-1")
}

#[test]
fn test_wrap_fills_missing_fields() {
    let config = BridgeConfig::default();
    let cache = SignatureCache::new();
    let ids = SequentialRequestIds::new("agent");
    let ctx = MapperContext::new(&config, &cache).with_request_ids(&ids);

    let body = json!({"contents": [{"role": "user", "parts": [{"text": "Hi"}]}]});
    let envelope = wrap_native(&body, "gemini-2.5-flash", &token(), &ctx).unwrap();

    assert_eq!(envelope.project, "test-project");
    assert_eq!(envelope.request_id, "agent-1");
    assert_eq!(envelope.model, "gemini-2.5-flash");
    assert_eq!(envelope.user_agent, "antigravity");

    let request = &envelope.request;
    assert_eq!(request["contents"], body["contents"]);
    assert_eq!(request["sessionId"], "session-1");
    assert_eq!(
        request["systemInstruction"],
        json!({"role": "user", "parts": [{"text": "You are a helpful assistant."}]})
    );
    assert_eq!(request["generationConfig"]["topK"], 50);
    assert_eq!(request["generationConfig"]["candidateCount"], 1);
    assert_eq!(request["generationConfig"]["thinkingConfig"]["thinkingBudget"], 0);
}

#[test]
fn test_wrap_keeps_caller_fields() {
    let config = BridgeConfig::default();
    let cache = SignatureCache::new();
    let ctx = MapperContext::new(&config, &cache);

    let body = json!({
        "contents": [],
        "systemInstruction": {"parts": [{"text": "custom"}]},
        "generationConfig": {"temperature": 0.1},
        "tools": [{"functionDeclarations": [{"name": "x", "parameters": {"type": "OBJECT"}}]}],
        "sessionId": "stale"
    });
    let envelope = wrap_native(&body, "gemini-2.5-pro", &token(), &ctx).unwrap();

    assert_eq!(envelope.request["systemInstruction"], body["systemInstruction"]);
    assert_eq!(envelope.request["generationConfig"], json!({"temperature": 0.1}));
    assert_eq!(envelope.request["tools"], body["tools"]);
    assert_eq!(envelope.request["sessionId"], "session-1");
    assert!(envelope.request_id.starts_with("agent-"));
}

#[test]
fn test_wrap_replaces_null_fields() {
    let config = BridgeConfig::default();
    let cache = SignatureCache::new();
    let ctx = MapperContext::new(&config, &cache);

    let body = json!({"contents": [], "systemInstruction": null, "generationConfig": null});
    let envelope = wrap_native(&body, "gemini-2.5-pro", &token(), &ctx).unwrap();

    assert_eq!(
        envelope.request["systemInstruction"]["parts"][0]["text"],
        "You are a helpful assistant."
    );
    assert_eq!(envelope.request["generationConfig"]["candidateCount"], 1);
}

#[test]
fn test_wrap_injects_cached_call_signature() {
    let config = BridgeConfig::default();
    let cache = SignatureCache::new();
    cache.put("call_1", "sig-1");
    let ctx = MapperContext::new(&config, &cache);

    let body = json!({
        "contents": [{
            "role": "model",
            "parts": [
                {"functionCall": {"id": "call_1", "name": "get_weather", "args": {}}},
                {"functionCall": {"id": "call_2", "name": "get_time", "args": {}}},
                {"functionCall": {"id": "call_1", "name": "get_weather", "args": {}}, "thoughtSignature": "own"}
            ]
        }]
    });
    let envelope = wrap_native(&body, "gemini-2.5-pro", &token(), &ctx).unwrap();
    let parts = &envelope.request["contents"][0]["parts"];

    assert_eq!(parts[0]["thoughtSignature"], "sig-1");
    assert!(parts[1].get("thoughtSignature").is_none());
    assert_eq!(parts[2]["thoughtSignature"], "own");
}

#[test]
fn test_wrap_skips_signatures_for_excluded_vendor() {
    let config = BridgeConfig::default();
    let cache = SignatureCache::new();
    cache.put("call_1", "sig-1");
    let ctx = MapperContext::new(&config, &cache);

    let body = json!({
        "contents": [{"role": "model", "parts": [{"functionCall": {"id": "call_1", "name": "f", "args": {}}}]}]
    });
    let envelope = wrap_native(&body, "claude-sonnet-4-5-thinking", &token(), &ctx).unwrap();

    assert_eq!(envelope.model, "claude-sonnet-4-5");
    assert!(envelope.request["contents"][0]["parts"][0].get("thoughtSignature").is_none());
    let generation = &envelope.request["generationConfig"];
    assert_eq!(generation["thinkingConfig"]["includeThoughts"], false);
    assert!(generation.get("topP").is_some());
}

#[test]
fn test_wrap_rejects_non_object_body() {
    let config = BridgeConfig::default();
    let cache = SignatureCache::new();
    let ctx = MapperContext::new(&config, &cache);

    let err = wrap_native(&json!([1, 2]), "gemini-2.5-pro", &token(), &ctx).unwrap_err();
    assert!(matches!(err, AppError::InvalidRequest(_)));
}

#[test]
fn test_unwrap_response() {
    let wrapped = json!({"response": {"candidates": []}});
    assert!(unwrap_response(&wrapped).get("candidates").is_some());

    let bare = json!({"candidates": []});
    assert_eq!(unwrap_response(&bare), &bare);
}

#[test]
fn test_harvest_records_call_and_text_signatures() {
    let cache = SignatureCache::new();
    let response = json!({
        "response": {
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "Let me think", "thought": true, "thoughtSignature": "sig-thought"},
                        {"text": "The answer "},
                        {"text": "is 42.", "thoughtSignature": "sig-text"},
                        {"functionCall": {"id": "call_9", "name": "lookup", "args": {}}, "thoughtSignature": "sig-call"},
                        {"functionCall": {"name": "no_id", "args": {}}, "thoughtSignature": "ignored"}
                    ]
                }
            }]
        }
    });

    let stats = harvest_signatures(&response, &cache);
    assert_eq!(stats, HarvestStats { tool_signatures: 1, text_signatures: 1 });
    assert_eq!(cache.get("call_9"), Some("sig-call".to_string()));

    let entry = cache.get_for_text("The answer is 42.").unwrap();
    assert_eq!(entry.signature, "sig-text");
}

#[test]
fn test_harvest_ignores_unsigned_text() {
    let cache = SignatureCache::new();
    let response = json!({"candidates": [{"content": {"parts": [{"text": "plain"}]}}]});

    assert_eq!(harvest_signatures(&response, &cache), HarvestStats::default());
    assert!(cache.is_empty());
    assert_eq!(harvest_signatures(&json!("garbage"), &cache), HarvestStats::default());
}
