use std::collections::HashMap;

use antigravity_bridge_types::protocol::{
    BackendPart, BackendRole, BackendTurn, ChatRole, ChatTurn, FunctionCall, FunctionResponse,
    ToolArguments, ToolCall,
};
use serde_json::{Map, Value};

use super::content_parts::user_parts;
use super::tool_result::tool_output;
use crate::proxy::SignatureCache;

/// Folds OpenAI chat turns into backend turns.
///
/// System turns are skipped; the assembler turns them into the system
/// instruction. Signatures are looked up in the injected cache and only
/// attached when the target model accepts them.
#[derive(Debug, Clone, Copy)]
pub struct MessageConverter<'a> {
    cache: &'a SignatureCache,
    signatures_allowed: bool,
}

impl<'a> MessageConverter<'a> {
    pub fn new(cache: &'a SignatureCache, signatures_allowed: bool) -> Self {
        Self { cache, signatures_allowed }
    }

    pub fn convert(&self, turns: &[ChatTurn]) -> Vec<BackendTurn> {
        let mut output = TurnSequence::default();
        for turn in turns {
            match turn.role {
                ChatRole::System => {},
                ChatRole::User => {
                    let parts = user_parts(turn.content.as_ref());
                    output.push(BackendTurn::new(BackendRole::User, parts));
                },
                ChatRole::Assistant => self.fold_assistant(turn, &mut output),
                ChatRole::Tool => self.fold_tool_result(turn, &mut output),
            }
        }
        output.finish()
    }

    fn fold_assistant(&self, turn: &ChatTurn, output: &mut TurnSequence) {
        let text = turn.text();
        let has_text = !text.trim().is_empty();
        let calls: Vec<BackendPart> =
            turn.calls().iter().map(|call| self.call_part(call)).collect();

        if !has_text && !calls.is_empty() && output.last_role() == Some(BackendRole::Model) {
            tracing::debug!(
                "[OpenAI-Request] Appending {} function call(s) to previous model turn",
                calls.len()
            );
            output.extend_last(calls);
            return;
        }

        let mut parts = Vec::with_capacity(calls.len() + 1);
        if has_text {
            let thought_signature = self.text_signature(&text);
            parts.push(BackendPart::Text { text, thought_signature });
        }
        parts.extend(calls);

        if parts.is_empty() {
            tracing::debug!("[OpenAI-Request] Skipping assistant turn without text or tool calls");
            return;
        }
        output.push(BackendTurn::new(BackendRole::Model, parts));
    }

    fn fold_tool_result(&self, turn: &ChatTurn, output: &mut TurnSequence) {
        let id = turn.tool_call_id.clone().unwrap_or_default();
        let name = output.call_name(&id);
        if name.is_empty() {
            tracing::debug!("[OpenAI-Request] No function call found for tool result id: {}", id);
        }
        let part = BackendPart::FunctionResponse {
            function_response: FunctionResponse::with_output(
                id,
                name,
                tool_output(turn.content.as_ref()),
            ),
        };

        let batches = output
            .last()
            .is_some_and(|last| last.role == BackendRole::User && last.has_function_response());
        if batches {
            output.extend_last(vec![part]);
        } else {
            output.push(BackendTurn::new(BackendRole::User, vec![part]));
        }
    }

    fn call_part(&self, call: &ToolCall) -> BackendPart {
        let thought_signature =
            if self.signatures_allowed { self.cache.get(&call.id) } else { None };
        BackendPart::FunctionCall {
            function_call: FunctionCall {
                id: call.id.clone(),
                name: call.function.name.clone(),
                args: parse_arguments(call),
            },
            thought_signature,
        }
    }

    fn text_signature(&self, text: &str) -> Option<String> {
        if !self.signatures_allowed {
            return None;
        }
        let entry = self.cache.get_for_text(text);
        if entry.is_none() {
            tracing::debug!(
                "[OpenAI-Signature] No cached signature for assistant text (len={}), sending plain text",
                text.len()
            );
        }
        entry.map(|e| e.signature)
    }
}

/// Structured call arguments. Anything that is not a JSON object becomes `{}`.
fn parse_arguments(call: &ToolCall) -> Value {
    let empty = || Value::Object(Map::new());
    match &call.function.arguments {
        ToolArguments::Structured(value @ Value::Object(_)) => value.clone(),
        ToolArguments::Structured(Value::Null) => empty(),
        ToolArguments::Serialized(raw) if raw.trim().is_empty() => empty(),
        ToolArguments::Serialized(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(value @ Value::Object(_)) => value,
            Ok(_) => {
                tracing::warn!(
                    "[OpenAI-Request] Tool call {} arguments are not a JSON object, using {{}}",
                    call.id
                );
                empty()
            },
            Err(e) => {
                tracing::warn!(
                    "[OpenAI-Request] Failed to parse arguments of tool call {}: {}",
                    call.id,
                    e
                );
                empty()
            },
        },
        ToolArguments::Structured(_) => {
            tracing::warn!(
                "[OpenAI-Request] Tool call {} arguments are not a JSON object, using {{}}",
                call.id
            );
            empty()
        },
    }
}

/// Output of the fold. Turns are only ever appended, or extended at the tail.
#[derive(Debug, Default)]
struct TurnSequence {
    turns: Vec<BackendTurn>,
    /// Function call id -> name, for the calls emitted so far.
    call_names: HashMap<String, String>,
}

impl TurnSequence {
    fn push(&mut self, turn: BackendTurn) {
        self.index_calls(&turn.parts);
        self.turns.push(turn);
    }

    /// Append parts to the last turn. Only called after checking `last`.
    fn extend_last(&mut self, parts: Vec<BackendPart>) {
        self.index_calls(&parts);
        match self.turns.last_mut() {
            Some(last) => last.parts.extend(parts),
            None => tracing::error!("[OpenAI-Request] extend_last on an empty turn sequence"),
        }
    }

    fn last(&self) -> Option<&BackendTurn> {
        self.turns.last()
    }

    fn last_role(&self) -> Option<BackendRole> {
        self.last().map(|turn| turn.role)
    }

    /// Name of the most recent function call with `id`, or empty.
    fn call_name(&self, id: &str) -> String {
        self.call_names.get(id).cloned().unwrap_or_default()
    }

    fn index_calls(&mut self, parts: &[BackendPart]) {
        for call in parts.iter().filter_map(BackendPart::as_function_call) {
            let _ = self.call_names.insert(call.id.clone(), call.name.clone());
        }
    }

    fn finish(self) -> Vec<BackendTurn> {
        self.turns
    }
}
