//! `type` narrowing and value filters shared by the sanitizer passes.

use serde_json::{Number, Value};

use super::graph::{GraphNode, NodeId, SchemaGraph};
use super::node::SchemaType;

const ALLOWED_FORMATS: [&str; 6] = ["date-time", "date", "time", "email", "uri", "uuid"];

/// Result of reading a `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ResolvedType {
    pub schema_type: SchemaType,
    pub nullable: bool,
}

/// Resolve the `type` member of a node.
///
/// Array form keeps only exact known names; a `null` entry marks the result
/// nullable. Scalar form goes through the synonym table. Any other shape
/// leaves the type unresolved so it can be inferred from structure.
pub(super) fn resolve_type(graph: &SchemaGraph, type_node: NodeId) -> Option<ResolvedType> {
    match graph.node(type_node)? {
        GraphNode::Scalar(Value::String(name)) => Some(ResolvedType {
            schema_type: SchemaType::from_synonym(name),
            nullable: false,
        }),
        GraphNode::Array(entries) => {
            let names: Vec<&str> = entries
                .iter()
                .filter_map(|id| graph.scalar(*id).and_then(Value::as_str))
                .collect();
            let nullable = names.contains(&"null");
            let schema_type = names
                .iter()
                .find_map(|name| SchemaType::from_name(name))
                .unwrap_or(SchemaType::String);
            Some(ResolvedType { schema_type, nullable })
        },
        GraphNode::Scalar(_) | GraphNode::Object(_) => None,
    }
}

/// Enum members must be present and not the empty string.
pub(super) fn is_valid_enum_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Valid members of an `enum` array, or `None` when none survive.
pub(super) fn filter_enum(graph: &SchemaGraph, enum_node: NodeId) -> Option<Vec<Value>> {
    let values: Vec<Value> = graph
        .elements(enum_node)?
        .iter()
        .map(|id| graph.to_value(*id))
        .filter(is_valid_enum_value)
        .collect();
    (!values.is_empty()).then_some(values)
}

pub(super) fn allowed_format(format: &str) -> bool {
    ALLOWED_FORMATS.contains(&format)
}

/// Numeric bound, kept only when it is a finite number.
pub(super) fn finite_number(graph: &SchemaGraph, id: NodeId) -> Option<Number> {
    match graph.scalar(id)? {
        Value::Number(n) if n.as_f64().is_some_and(f64::is_finite) => Some(n.clone()),
        _ => None,
    }
}

/// Append `values` to `target`, skipping duplicates.
pub(super) fn extend_unique<T: PartialEq>(
    target: &mut Vec<T>,
    values: impl IntoIterator<Item = T>,
) {
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}
