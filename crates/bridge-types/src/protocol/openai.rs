//! OpenAI ChatCompletions request types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::SamplingParams;

/// OpenAI chat completion request, reduced to the fields the bridge consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// Requested model identifier.
    pub model: String,
    /// Conversation history.
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
    /// Tool definitions (`{type: "function", function: {...}}` or the flat form).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    /// Streaming flag (transport concern, carried through untouched).
    #[serde(default)]
    pub stream: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Per-request sampling overrides.
    #[must_use]
    pub fn sampling(&self) -> SamplingParams {
        SamplingParams {
            top_p: self.top_p,
            top_k: self.top_k,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Tool definitions, empty when the request has none.
    #[must_use]
    pub fn tool_definitions(&self) -> &[Value] {
        self.tools.as_deref().unwrap_or_default()
    }
}

/// Chat message role. `developer` reads as `system` and `function` as `tool`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    #[serde(alias = "developer")]
    System,
    User,
    Assistant,
    #[serde(alias = "function")]
    Tool,
}

/// One turn of the chat history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: ChatRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ChatContent>,
    /// Tool invocations requested by an assistant turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    /// Correlation id of a tool result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatTurn {
    fn with_content(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(ChatContent::Text(text.into())),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::with_content(ChatRole::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::with_content(ChatRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::with_content(ChatRole::Assistant, text)
    }

    /// Assistant turn that only carries tool calls.
    pub fn assistant_tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: None,
            tool_calls: Some(calls),
            tool_call_id: None,
            name: None,
        }
    }

    /// Tool result correlated to `call_id`.
    pub fn tool_result(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Tool,
            content: Some(ChatContent::Text(output.into())),
            tool_calls: None,
            tool_call_id: Some(call_id.into()),
            name: None,
        }
    }

    /// Concatenation of the text fragments of this turn. Non-text fragments are
    /// skipped.
    #[must_use]
    pub fn text(&self) -> String {
        self.content.as_ref().map(ChatContent::text).unwrap_or_default()
    }

    /// Tool calls of this turn, empty when there are none.
    #[must_use]
    pub fn calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or_default()
    }
}

/// Message content: plain text, typed fragments, or (for tool results) any JSON.
///
/// Every JSON array reads as [`ChatContent::Parts`]; fragments are parsed one
/// by one, so a malformed fragment never hides its neighbours.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChatContent {
    Text(String),
    Parts(Vec<ContentPart>),
    Json(Value),
}

impl ChatContent {
    /// Concatenated text fragments.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            ChatContent::Text(s) => s.clone(),
            ChatContent::Parts(parts) => parts.iter().filter_map(ContentPart::text).collect(),
            ChatContent::Json(Value::String(s)) => s.clone(),
            ChatContent::Json(Value::Array(items)) => {
                items.iter().filter_map(text_fragment).collect()
            },
            ChatContent::Json(_) => String::new(),
        }
    }
}

/// Content fragment. Kinds the bridge does not translate, and fragments that
/// do not have the expected shape, are kept verbatim as [`ContentPart::Other`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "Value", into = "Value")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
    Other(Value),
}

impl ContentPart {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentPart::Text { text } => Some(text.as_str()),
            ContentPart::ImageUrl { .. } | ContentPart::Other(_) => None,
        }
    }
}

/// `{"type": "text", "text": "..."}`
fn text_fragment(value: &Value) -> Option<&str> {
    if value.get("type").and_then(Value::as_str) != Some("text") {
        return None;
    }
    value.get("text").and_then(Value::as_str)
}

/// `image_url` is either `{url, detail?}` or the bare URL string.
fn image_fragment(value: &Value) -> Option<ImageUrl> {
    if value.get("type").and_then(Value::as_str) != Some("image_url") {
        return None;
    }
    match value.get("image_url")? {
        Value::String(url) => Some(ImageUrl { url: url.clone(), detail: None }),
        image @ Value::Object(_) => Some(ImageUrl {
            url: image.get("url").and_then(Value::as_str)?.to_string(),
            detail: image.get("detail").and_then(Value::as_str).map(str::to_string),
        }),
        _ => None,
    }
}

impl From<Value> for ContentPart {
    fn from(value: Value) -> Self {
        if let Some(text) = text_fragment(&value) {
            return ContentPart::Text { text: text.to_string() };
        }
        if let Some(image_url) = image_fragment(&value) {
            return ContentPart::ImageUrl { image_url };
        }
        ContentPart::Other(value)
    }
}

impl From<ContentPart> for Value {
    fn from(part: ContentPart) -> Self {
        match part {
            ContentPart::Text { text } => json!({"type": "text", "text": text}),
            ContentPart::ImageUrl { image_url } => {
                let mut image = json!({"url": image_url.url});
                if let Some(detail) = image_url.detail {
                    image["detail"] = Value::String(detail);
                }
                json!({"type": "image_url", "image_url": image})
            },
            ContentPart::Other(value) => value,
        }
    }
}

/// Image reference; only `data:image/<fmt>;base64,<data>` URLs are inlined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Tool invocation requested by the assistant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_tool_type")]
    pub r#type: String,
    pub function: ToolFunction,
}

fn default_tool_type() -> String {
    "function".to_string()
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: ToolArguments) -> Self {
        Self {
            id: id.into(),
            r#type: default_tool_type(),
            function: ToolFunction { name: name.into(), arguments },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: ToolArguments,
}

/// Tool call arguments, either the JSON-encoded string OpenAI sends or an
/// already structured value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ToolArguments {
    Serialized(String),
    Structured(Value),
}

impl Default for ToolArguments {
    fn default() -> Self {
        ToolArguments::Structured(Value::Object(serde_json::Map::new()))
    }
}
