use antigravity_bridge_types::protocol::{FunctionDeclaration, ToolGroup};
use serde_json::{json, Value};

use crate::proxy::common::json_schema::sanitize_schema;

/// Convert OpenAI tool definitions into a single `functionDeclarations` group.
///
/// Accepts both `{type: "function", function: {...}}` and the flat
/// `{name, description, parameters}` form. Returns no group when nothing
/// usable is left.
pub fn build_tool_groups(tools: &[Value]) -> Vec<ToolGroup> {
    let declarations: Vec<FunctionDeclaration> = tools.iter().filter_map(declaration).collect();
    if declarations.is_empty() {
        return Vec::new();
    }
    tracing::debug!("[OpenAI-Request] Declared {} function(s)", declarations.len());
    vec![ToolGroup { function_declarations: declarations }]
}

fn declaration(tool: &Value) -> Option<FunctionDeclaration> {
    let function = tool.get("function").filter(|f| f.is_object()).unwrap_or(tool);

    let Some(name) = function.get("name").and_then(Value::as_str).filter(|n| !n.is_empty()) else {
        tracing::warn!("[OpenAI-Request] Skipping tool without name: {}", tool);
        return None;
    };

    let parameters = match function.get("parameters") {
        Some(schema) if schema.is_object() => sanitize_schema(schema),
        _ => {
            tracing::debug!("[OpenAI-Request] Injecting empty parameter schema for tool: {}", name);
            json!({"type": "object", "properties": {}})
        },
    };

    Some(FunctionDeclaration {
        name: name.to_string(),
        description: function.get("description").and_then(Value::as_str).map(str::to_string),
        parameters,
    })
}
