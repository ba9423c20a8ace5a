use antigravity_bridge_types::protocol::ChatContent;
use serde_json::Value;

/// Flatten tool result content into the string sent as `response.output`.
///
/// Plain strings pass through. A `{text}` object is unwrapped. For arrays the
/// first text-like element wins. Anything else is serialized as JSON.
pub fn tool_output(content: Option<&ChatContent>) -> String {
    match content {
        None => String::new(),
        Some(ChatContent::Text(text)) => text.clone(),
        Some(ChatContent::Parts(parts)) => {
            json_output(&Value::Array(parts.iter().cloned().map(Value::from).collect()))
        },
        Some(ChatContent::Json(value)) => json_output(value),
    }
}

fn json_output(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(_) => match text_field(value) {
            Some(text) => text.to_string(),
            None => value.to_string(),
        },
        Value::Array(elements) => elements
            .iter()
            .find_map(|element| match element {
                Value::String(s) => Some(s.as_str()),
                other => text_field(other),
            })
            .map_or_else(|| value.to_string(), str::to_string),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
    }
}

fn text_field(value: &Value) -> Option<&str> {
    value.get("text").and_then(Value::as_str)
}
