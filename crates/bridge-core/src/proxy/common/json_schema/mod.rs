//! Tool parameter schema sanitizer.
//!
//! Reduces arbitrary JSON Schema to the dialect the backend accepts: six
//! primitive types, no references, no unions, and a short whitelist of
//! keywords. The transformation is total and idempotent.

mod graph;
mod node;
mod sanitizer;
mod type_resolution;
mod union;

pub use graph::{NodeId, SchemaGraph};
pub use node::{SchemaNode, SchemaType};

use serde_json::Value;

use sanitizer::Sanitizer;

/// Sanitize a schema value. Non-object input is returned unchanged.
pub fn sanitize_schema(schema: &Value) -> Value {
    if !schema.is_object() {
        return schema.clone();
    }
    SchemaGraph::from_value(schema).sanitize()
}

/// Typed variant of [`sanitize_schema`]; `None` for non-object input.
pub fn sanitize_schema_node(schema: &Value) -> Option<SchemaNode> {
    if !schema.is_object() {
        return None;
    }
    let graph = SchemaGraph::from_value(schema);
    Sanitizer::new(&graph).sanitize(graph.root())
}

impl SchemaGraph {
    /// Sanitize from the root. A non-object root is rebuilt unchanged.
    pub fn sanitize(&self) -> Value {
        match Sanitizer::new(self).sanitize(self.root()) {
            Some(node) => node.to_value(),
            None => self.to_value(self.root()),
        }
    }

    pub fn sanitize_node(&self, id: NodeId) -> Option<SchemaNode> {
        Sanitizer::new(self).sanitize(id)
    }
}

#[cfg(test)]
mod tests;
