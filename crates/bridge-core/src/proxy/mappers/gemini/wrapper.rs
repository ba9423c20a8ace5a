// Native Gemini body -> v1internal envelope
use antigravity_bridge_types::protocol::{RequestEnvelope, SystemInstruction, USER_AGENT};
use antigravity_bridge_types::{SamplingParams, SessionToken};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::proxy::common::ModelPolicy;
use crate::proxy::mappers::openai::request::{
    build_generation_config, merge_instruction, thinking_mode,
};
use crate::proxy::mappers::MapperContext;

/// Wrap a request body that is already in Gemini shape.
///
/// `contents`, `tools` and every other field are kept. `systemInstruction` and
/// `generationConfig` are only filled in when absent or null. Function calls
/// without a `thoughtSignature` get the cached one for their id when the model
/// accepts signatures. The request id, session id and project are always fresh.
pub fn wrap_native(
    body: &Value,
    model: &str,
    token: &SessionToken,
    ctx: &MapperContext<'_>,
) -> AppResult<RequestEnvelope<Value>> {
    if !body.is_object() {
        return Err(AppError::InvalidRequest("native request body must be a JSON object".into()));
    }

    let config = ctx.config;
    let route = ModelPolicy::new(&config.models).route(model);
    let mut inner = body.clone();

    if route.signatures_allowed {
        let injected = inject_call_signatures(&mut inner, ctx);
        if injected > 0 {
            tracing::debug!("[Gemini-Wrap] Injected {} cached signature(s)", injected);
        }
    }

    if inner.get("systemInstruction").is_none_or(Value::is_null) {
        let text = merge_instruction(
            &config.system_instruction,
            &config.fallback_system_instruction,
            &[],
        );
        inner["systemInstruction"] = serde_json::to_value(SystemInstruction::text(text))?;
    }

    if inner.get("generationConfig").is_none_or(Value::is_null) {
        let thinking = thinking_mode(&route, has_function_calls(&inner), config.thinking_budget);
        let generation =
            build_generation_config(&SamplingParams::default(), &config.defaults, thinking);
        inner["generationConfig"] = serde_json::to_value(generation)?;
    }

    inner["sessionId"] = json!(token.session_id);

    tracing::debug!("[Gemini-Wrap] model='{}' upstream='{}'", model, route.upstream);

    Ok(RequestEnvelope {
        project: token.project_id.clone(),
        request_id: ctx.ids.next_id(),
        model: route.upstream,
        user_agent: USER_AGENT.to_string(),
        request: inner,
    })
}

/// The inner response of a v1internal reply, or the body itself when it is
/// not wrapped.
pub fn unwrap_response(response: &Value) -> &Value {
    response.get("response").unwrap_or(response)
}

fn parts_mut(body: &mut Value) -> impl Iterator<Item = &mut Value> {
    body.get_mut("contents")
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(|content| content.get_mut("parts").and_then(Value::as_array_mut))
        .flatten()
}

fn inject_call_signatures(body: &mut Value, ctx: &MapperContext<'_>) -> usize {
    let mut injected = 0;
    for part in parts_mut(body) {
        if part.get("thoughtSignature").is_some() {
            continue;
        }
        let Some(id) = part.pointer("/functionCall/id").and_then(Value::as_str) else {
            continue;
        };
        let Some(signature) = ctx.cache.get(id) else {
            continue;
        };
        if let Some(obj) = part.as_object_mut() {
            let _ = obj.insert("thoughtSignature".to_string(), json!(signature));
            injected += 1;
        }
    }
    injected
}

fn has_function_calls(body: &Value) -> bool {
    body.get("contents")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|content| content.get("parts").and_then(Value::as_array))
        .flatten()
        .any(|part| part.get("functionCall").is_some())
}
