//! Gemini content shapes and the Antigravity (v1internal) request envelope.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Backend content role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendRole {
    User,
    Model,
}

/// One part of a backend turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BackendPart {
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: FunctionCall,
        #[serde(
            rename = "thoughtSignature",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        thought_signature: Option<String>,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: FunctionResponse,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
        #[serde(
            rename = "thoughtSignature",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        thought_signature: Option<String>,
    },
}

impl BackendPart {
    pub fn text(text: impl Into<String>) -> Self {
        BackendPart::Text { text: text.into(), thought_signature: None }
    }

    pub fn inline_image(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        BackendPart::InlineData {
            inline_data: InlineData { mime_type: mime_type.into(), data: data.into() },
        }
    }

    #[must_use]
    pub fn is_function_response(&self) -> bool {
        matches!(self, BackendPart::FunctionResponse { .. })
    }

    #[must_use]
    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            BackendPart::FunctionCall { function_call, .. } => Some(function_call),
            _ => None,
        }
    }

    #[must_use]
    pub fn thought_signature(&self) -> Option<&str> {
        match self {
            BackendPart::FunctionCall { thought_signature, .. }
            | BackendPart::Text { thought_signature, .. } => thought_signature.as_deref(),
            BackendPart::FunctionResponse { .. } | BackendPart::InlineData { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionResponse {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub response: Value,
}

impl FunctionResponse {
    /// Response whose payload is `{output: <text>}`.
    pub fn with_output(
        id: impl Into<String>,
        name: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self { id: id.into(), name: name.into(), response: json!({ "output": output.into() }) }
    }

    /// The `output` string of the payload, if present.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        self.response.get("output").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// One entry of the backend `contents` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendTurn {
    pub role: BackendRole,
    pub parts: Vec<BackendPart>,
}

impl BackendTurn {
    pub fn new(role: BackendRole, parts: Vec<BackendPart>) -> Self {
        Self { role, parts }
    }

    #[must_use]
    pub fn has_function_response(&self) -> bool {
        self.parts.iter().any(BackendPart::is_function_response)
    }

    /// Function calls carried by this turn, in order.
    pub fn function_calls(&self) -> impl Iterator<Item = &FunctionCall> {
        self.parts.iter().filter_map(BackendPart::as_function_call)
    }
}

/// `systemInstruction` block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemInstruction {
    pub role: BackendRole,
    pub parts: Vec<BackendPart>,
}

impl SystemInstruction {
    pub fn text(text: impl Into<String>) -> Self {
        Self { role: BackendRole::User, parts: vec![BackendPart::text(text)] }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolGroup {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub function_calling_config: FunctionCallingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionCallingConfig {
    pub mode: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self { function_calling_config: FunctionCallingConfig { mode: "VALIDATED".to_string() } }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    pub top_k: u32,
    pub temperature: f64,
    pub candidate_count: u32,
    pub max_output_tokens: u32,
    pub stop_sequences: Vec<String>,
    pub thinking_config: ThinkingConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub include_thoughts: bool,
    pub thinking_budget: u32,
}

/// Inner `request` of the envelope built from an OpenAI chat request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendRequest {
    pub contents: Vec<BackendTurn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolGroup>,
    pub tool_config: ToolConfig,
    pub generation_config: GenerationConfig,
    pub session_id: String,
}

/// Antigravity v1internal envelope. `R` is the inner request body: typed for
/// translated chat requests, raw JSON for native pass-through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope<R = BackendRequest> {
    pub project: String,
    pub request_id: String,
    pub model: String,
    pub user_agent: String,
    pub request: R,
}

/// `userAgent` value of every envelope.
pub const USER_AGENT: &str = "antigravity";

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_part_wire_shapes() {
        let call = BackendPart::FunctionCall {
            function_call: FunctionCall {
                id: "call_1".into(),
                name: "read".into(),
                args: json!({"path": "a"}),
            },
            thought_signature: Some("sig".into()),
        };
        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({
                "functionCall": {"id": "call_1", "name": "read", "args": {"path": "a"}},
                "thoughtSignature": "sig"
            })
        );

        let response = BackendPart::FunctionResponse {
            function_response: FunctionResponse::with_output("call_1", "read", "ok"),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"functionResponse": {"id": "call_1", "name": "read", "response": {"output": "ok"}}})
        );

        let image = BackendPart::inline_image("image/png", "AAAA");
        assert_eq!(
            serde_json::to_value(&image).unwrap(),
            json!({"inlineData": {"mimeType": "image/png", "data": "AAAA"}})
        );

        assert_eq!(serde_json::to_value(BackendPart::text("hi")).unwrap(), json!({"text": "hi"}));
    }

    #[test]
    fn test_parts_deserialize_to_matching_variant() {
        let parts: Vec<BackendPart> = serde_json::from_value(json!([
            {"text": "hi", "thoughtSignature": "s1"},
            {"functionCall": {"id": "c", "name": "n", "args": {}}},
            {"functionResponse": {"id": "c", "name": "n", "response": {"output": "x"}}}
        ]))
        .unwrap();
        assert_eq!(parts[0].thought_signature(), Some("s1"));
        assert!(parts[1].as_function_call().is_some());
        assert!(parts[2].is_function_response());
    }

    #[test]
    fn test_tool_config_default_is_validated() {
        assert_eq!(
            serde_json::to_value(ToolConfig::default()).unwrap(),
            json!({"functionCallingConfig": {"mode": "VALIDATED"}})
        );
    }
}
