//! Flattening of `anyOf` / `oneOf` / `allOf` into a single node.

use indexmap::IndexMap;

use super::node::{SchemaNode, SchemaType};
use super::type_resolution::extend_unique;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UnionKind {
    AnyOf,
    OneOf,
    AllOf,
}

impl UnionKind {
    /// Lookup precedence when a node carries several union keys.
    pub const PRECEDENCE: [UnionKind; 3] = [UnionKind::AnyOf, UnionKind::OneOf, UnionKind::AllOf];

    pub fn key(self) -> &'static str {
        match self {
            UnionKind::AnyOf => "anyOf",
            UnionKind::OneOf => "oneOf",
            UnionKind::AllOf => "allOf",
        }
    }
}

/// Merge already sanitized branches. `branches` must not be empty.
///
/// Properties win over enums, enums win over plain types. Among several plain
/// types `string` is preferred, then `object`, then the first one seen.
pub(super) fn merge_branches(kind: UnionKind, branches: Vec<SchemaNode>) -> SchemaNode {
    let description = branches.iter().find_map(|b| b.description.clone());

    let has_properties =
        branches.iter().any(|b| b.properties.as_ref().is_some_and(|p| !p.is_empty()));
    if has_properties {
        let mut properties = IndexMap::new();
        let mut required = Vec::new();
        for branch in branches {
            if let Some(branch_properties) = branch.properties {
                properties.extend(branch_properties);
            }
            if kind == UnionKind::AllOf {
                extend_unique(&mut required, branch.required.unwrap_or_default());
            }
        }
        let mut merged = SchemaNode::object(properties);
        merged.description = description;
        merged.required = Some(required);
        merged.settle_shape();
        return merged;
    }

    let mut enum_values = Vec::new();
    for branch in &branches {
        if let Some(values) = &branch.enum_values {
            extend_unique(&mut enum_values, values.iter().cloned());
        }
    }
    if !enum_values.is_empty() {
        let mut merged = SchemaNode::new(SchemaType::String);
        merged.description = description;
        merged.enum_values = Some(enum_values);
        return merged;
    }

    let mut types = Vec::new();
    extend_unique(&mut types, branches.iter().map(|b| b.schema_type));
    let chosen = match types.as_slice() {
        [single] => *single,
        _ if types.contains(&SchemaType::String) => SchemaType::String,
        _ if types.contains(&SchemaType::Object) => SchemaType::Object,
        _ => types.first().copied().unwrap_or(SchemaType::String),
    };

    let mut merged = branches
        .into_iter()
        .find(|b| b.schema_type == chosen)
        .unwrap_or_else(|| SchemaNode::new(chosen));
    if merged.description.is_none() {
        merged.description = description;
    }
    merged.settle_shape();
    merged
}
