//! Index arena holding a schema document.
//!
//! `serde_json::Value` is a tree, but schemas assembled by hand (or decoded
//! from formats with anchors) can share and even contain themselves. The arena
//! stores object members and array elements as node indices, so a member can
//! point back at an ancestor through [`SchemaGraph::link`].

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Index of a node inside a [`SchemaGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub(super) enum GraphNode {
    Scalar(Value),
    Array(Vec<NodeId>),
    Object(IndexMap<String, NodeId>),
}

#[derive(Debug, Clone)]
pub struct SchemaGraph {
    nodes: Vec<GraphNode>,
    root: NodeId,
}

impl SchemaGraph {
    /// Load a JSON document. The result is acyclic until [`link`](Self::link)
    /// is used.
    pub fn from_value(value: &Value) -> Self {
        let mut graph = Self { nodes: Vec::new(), root: NodeId(0) };
        graph.root = graph.add(value);
        graph
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a detached copy of `value` and return its index.
    pub fn add(&mut self, value: &Value) -> NodeId {
        let node = match value {
            Value::Array(elements) => {
                GraphNode::Array(elements.iter().map(|element| self.add(element)).collect())
            },
            Value::Object(map) => GraphNode::Object(
                map.iter().map(|(key, member)| (key.clone(), self.add(member))).collect(),
            ),
            scalar => GraphNode::Scalar(scalar.clone()),
        };
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Member `key` of object node `parent`.
    pub fn member(&self, parent: NodeId, key: &str) -> Option<NodeId> {
        match self.nodes.get(parent.0)? {
            GraphNode::Object(members) => members.get(key).copied(),
            GraphNode::Scalar(_) | GraphNode::Array(_) => None,
        }
    }

    /// Follow a chain of object keys from the root.
    pub fn lookup(&self, path: &[&str]) -> Option<NodeId> {
        path.iter().try_fold(self.root, |node, key| self.member(node, key))
    }

    /// Point member `key` of object node `parent` at the existing node `child`.
    ///
    /// Returns `false` when `parent` is not an object or `child` is unknown.
    pub fn link(&mut self, parent: NodeId, key: &str, child: NodeId) -> bool {
        if child.0 >= self.nodes.len() {
            return false;
        }
        match self.nodes.get_mut(parent.0) {
            Some(GraphNode::Object(members)) => {
                let _ = members.insert(key.to_string(), child);
                true
            },
            _ => false,
        }
    }

    /// Append the existing node `child` to array node `parent`.
    pub fn push_element(&mut self, parent: NodeId, child: NodeId) -> bool {
        if child.0 >= self.nodes.len() {
            return false;
        }
        match self.nodes.get_mut(parent.0) {
            Some(GraphNode::Array(elements)) => {
                elements.push(child);
                true
            },
            _ => false,
        }
    }

    pub(super) fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.0)
    }

    pub(super) fn is_object(&self, id: NodeId) -> bool {
        matches!(self.node(id), Some(GraphNode::Object(_)))
    }

    pub(super) fn object(&self, id: NodeId) -> Option<&IndexMap<String, NodeId>> {
        match self.node(id)? {
            GraphNode::Object(members) => Some(members),
            GraphNode::Scalar(_) | GraphNode::Array(_) => None,
        }
    }

    pub(super) fn elements(&self, id: NodeId) -> Option<&[NodeId]> {
        match self.node(id)? {
            GraphNode::Array(elements) => Some(elements.as_slice()),
            GraphNode::Scalar(_) | GraphNode::Object(_) => None,
        }
    }

    pub(super) fn scalar(&self, id: NodeId) -> Option<&Value> {
        match self.node(id)? {
            GraphNode::Scalar(value) => Some(value),
            GraphNode::Array(_) | GraphNode::Object(_) => None,
        }
    }

    pub(super) fn str_member(&self, parent: NodeId, key: &str) -> Option<&str> {
        self.member(parent, key).and_then(|id| self.scalar(id)).and_then(Value::as_str)
    }

    /// Rebuild a JSON value. Members that would re-enter a node already on the
    /// current path are left out.
    pub fn to_value(&self, id: NodeId) -> Value {
        let mut path = HashSet::new();
        self.to_value_guarded(id, &mut path).unwrap_or(Value::Null)
    }

    fn to_value_guarded(&self, id: NodeId, path: &mut HashSet<NodeId>) -> Option<Value> {
        if !path.insert(id) {
            return None;
        }
        let value = match self.node(id)? {
            GraphNode::Scalar(value) => value.clone(),
            GraphNode::Array(elements) => Value::Array(
                elements.iter().filter_map(|e| self.to_value_guarded(*e, path)).collect(),
            ),
            GraphNode::Object(members) => {
                let mut map = Map::new();
                for (key, member) in members {
                    if let Some(v) = self.to_value_guarded(*member, path) {
                        let _ = map.insert(key.clone(), v);
                    }
                }
                Value::Object(map)
            },
        };
        let _ = path.remove(&id);
        Some(value)
    }
}
