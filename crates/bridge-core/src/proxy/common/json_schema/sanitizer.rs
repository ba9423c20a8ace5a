//! Depth-first schema sanitizer over a [`SchemaGraph`].

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;

use super::graph::{NodeId, SchemaGraph};
use super::node::{SchemaNode, SchemaType};
use super::type_resolution::{
    allowed_format, extend_unique, filter_enum, finite_number, is_valid_enum_value, resolve_type,
};
use super::union::{merge_branches, UnionKind};

const MAX_RECURSION_DEPTH: usize = 64;

/// Keys that give a union branch (or the union node itself) a shape of its own.
const SHAPE_KEYS: [&str; 9] =
    ["type", "properties", "items", "enum", "const", "$ref", "anyOf", "oneOf", "allOf"];

pub(super) struct Sanitizer<'a> {
    graph: &'a SchemaGraph,
    /// Nodes on the current descent path.
    path: HashSet<NodeId>,
}

impl<'a> Sanitizer<'a> {
    pub fn new(graph: &'a SchemaGraph) -> Self {
        Self { graph, path: HashSet::new() }
    }

    /// Sanitize an object node. Non-object nodes yield `None`.
    pub fn sanitize(&mut self, id: NodeId) -> Option<SchemaNode> {
        self.sanitize_at(id, 0)
    }

    fn sanitize_at(&mut self, id: NodeId, depth: usize) -> Option<SchemaNode> {
        if !self.graph.is_object(id) {
            return None;
        }
        if depth > MAX_RECURSION_DEPTH {
            tracing::warn!(
                "[JSON-Schema] Recursion depth {} exceeded limit {}, emitting empty object",
                depth,
                MAX_RECURSION_DEPTH
            );
            return Some(SchemaNode::object(IndexMap::new()));
        }
        if !self.path.insert(id) {
            tracing::debug!("[JSON-Schema] Cycle detected, emitting circular reference marker");
            return Some(SchemaNode::circular());
        }

        let node = self.sanitize_object(id, depth);
        let _ = self.path.remove(&id);
        Some(node)
    }

    fn sanitize_object(&mut self, id: NodeId, depth: usize) -> SchemaNode {
        if let Some(reference) = self.graph.member(id, "$ref") {
            let target = match self.graph.to_value(reference) {
                Value::String(s) => s,
                other => other.to_string(),
            };
            return SchemaNode::opaque_object(format!("Reference: {}", target));
        }

        for kind in UnionKind::PRECEDENCE {
            let Some(branches) = self.graph.member(id, kind.key()) else {
                continue;
            };
            let Some(branches) = self.graph.elements(branches) else {
                continue;
            };
            let branches = branches.to_vec();
            if let Some(node) = self.sanitize_union(id, kind, &branches, depth) {
                return node;
            }
            break;
        }

        if let Some(constant) = self.graph.member(id, "const") {
            return self.sanitize_const(id, constant);
        }

        self.sanitize_fields(id, depth)
    }

    fn sanitize_union(
        &mut self,
        id: NodeId,
        kind: UnionKind,
        branch_ids: &[NodeId],
        depth: usize,
    ) -> Option<SchemaNode> {
        let description = self.graph.str_member(id, "description").map(str::to_string);
        let mut saw_null = false;
        let mut branches = Vec::new();

        for &branch in branch_ids {
            if self.is_null_branch(branch) {
                saw_null = true;
                continue;
            }
            if !self.has_shape(branch) {
                continue;
            }
            if let Some(node) = self.sanitize_at(branch, depth + 1) {
                branches.push(node);
            }
        }

        let mut merged = if branches.is_empty() {
            if self.has_shape_outside_unions(id) {
                return None;
            }
            let first = branch_ids.first().copied()?;
            self.sanitize_at(first, depth + 1)?
        } else {
            merge_branches(kind, branches)
        };

        if description.is_some() {
            merged.description = description;
        }
        if saw_null {
            merged.nullable = Some(true);
        }
        Some(merged)
    }

    fn sanitize_const(&self, id: NodeId, constant: NodeId) -> SchemaNode {
        let value = self.graph.to_value(constant);
        let mut node = SchemaNode::new(SchemaType::of_value(&value));
        node.description = self.graph.str_member(id, "description").map(str::to_string);
        if is_valid_enum_value(&value) {
            node.enum_values = Some(vec![value]);
        }
        node.settle_shape();
        node
    }

    fn sanitize_fields(&mut self, id: NodeId, depth: usize) -> SchemaNode {
        let graph = self.graph;
        let resolved = graph.member(id, "type").and_then(|t| resolve_type(graph, t));

        let mut properties = IndexMap::new();
        if let Some(members) = graph.member(id, "properties").and_then(|p| graph.object(p)) {
            for (key, child) in members {
                if let Some(node) = self.sanitize_at(*child, depth + 1) {
                    let _ = properties.insert(key.clone(), node);
                }
            }
        }
        let properties = (!properties.is_empty()).then_some(properties);

        let items = match graph.member(id, "items") {
            Some(items) if graph.is_object(items) => self.sanitize_at(items, depth + 1),
            Some(items) => {
                let first_object = graph
                    .elements(items)
                    .and_then(|elements| elements.iter().copied().find(|e| graph.is_object(*e)));
                match first_object {
                    Some(element) => self.sanitize_at(element, depth + 1),
                    None => None,
                }
            },
            None => None,
        };

        let enum_values = graph.member(id, "enum").and_then(|e| filter_enum(graph, e));

        let staged_required: Vec<String> = graph
            .member(id, "required")
            .and_then(|r| graph.elements(r))
            .map(|elements| {
                let mut keys = Vec::new();
                extend_unique(
                    &mut keys,
                    elements
                        .iter()
                        .filter_map(|e| graph.scalar(*e).and_then(Value::as_str))
                        .map(str::to_string),
                );
                keys
            })
            .unwrap_or_default();

        let schema_type = match resolved {
            Some(resolved) => resolved.schema_type,
            None if properties.is_some() => SchemaType::Object,
            None if items.is_some() => SchemaType::Array,
            None => enum_values
                .as_ref()
                .and_then(|values| values.first())
                .map(SchemaType::of_value)
                .unwrap_or(SchemaType::String),
        };

        let mut node = SchemaNode::new(schema_type);
        node.description = graph.str_member(id, "description").map(str::to_string);
        node.nullable = match graph.member(id, "nullable").and_then(|n| graph.scalar(n)) {
            Some(Value::Bool(flag)) => Some(*flag),
            _ => None,
        };
        if resolved.is_some_and(|r| r.nullable) {
            node.nullable = Some(true);
        }
        node.enum_values = enum_values;
        node.format = graph
            .str_member(id, "format")
            .filter(|f| allowed_format(f))
            .map(str::to_string);
        node.minimum = graph.member(id, "minimum").and_then(|n| finite_number(graph, n));
        node.maximum = graph.member(id, "maximum").and_then(|n| finite_number(graph, n));
        node.min_items = graph.member(id, "minItems").and_then(|n| finite_number(graph, n));
        node.max_items = graph.member(id, "maxItems").and_then(|n| finite_number(graph, n));

        if let Some(properties) = &properties {
            let committed: Vec<String> =
                staged_required.into_iter().filter(|key| properties.contains_key(key)).collect();
            node.required = Some(committed);
        }
        node.properties = properties;
        node.items = items.map(Box::new);

        node.settle_shape();
        node
    }

    /// Exactly `{type: "null"}`, optionally with a description.
    fn is_null_branch(&self, id: NodeId) -> bool {
        let Some(members) = self.graph.object(id) else {
            return false;
        };
        self.graph.str_member(id, "type") == Some("null")
            && members.keys().all(|key| key == "type" || key == "description")
    }

    fn has_shape(&self, id: NodeId) -> bool {
        self.graph
            .object(id)
            .is_some_and(|members| SHAPE_KEYS.iter().any(|key| members.contains_key(*key)))
    }

    fn has_shape_outside_unions(&self, id: NodeId) -> bool {
        self.graph.object(id).is_some_and(|members| {
            ["type", "properties", "items", "enum", "const"]
                .iter()
                .any(|key| members.contains_key(*key))
        })
    }
}
