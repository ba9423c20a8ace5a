//! Typed form of a sanitized schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// The six types the backend schema dialect understands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }

    /// Exact match against the known names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(SchemaType::String),
            "number" => Some(SchemaType::Number),
            "integer" => Some(SchemaType::Integer),
            "boolean" => Some(SchemaType::Boolean),
            "array" => Some(SchemaType::Array),
            "object" => Some(SchemaType::Object),
            _ => None,
        }
    }

    /// Known names plus common synonyms; anything else is a string.
    pub fn from_synonym(name: &str) -> Self {
        if let Some(known) = Self::from_name(name) {
            return known;
        }
        match name.to_ascii_lowercase().as_str() {
            "int" | "integer" => SchemaType::Integer,
            "float" | "double" | "number" => SchemaType::Number,
            "bool" | "boolean" => SchemaType::Boolean,
            "list" | "array" => SchemaType::Array,
            "dict" | "map" | "object" => SchemaType::Object,
            _ => SchemaType::String,
        }
    }

    /// Type of a literal value, as used for `const` and enum back-fill.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => SchemaType::Integer,
            Value::Number(_) => SchemaType::Number,
            Value::Bool(_) => SchemaType::Boolean,
            Value::Array(_) => SchemaType::Array,
            Value::Object(_) => SchemaType::Object,
            Value::String(_) | Value::Null => SchemaType::String,
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a sanitized schema.
///
/// Object nodes always carry `properties` and array nodes always carry
/// `items`; `required` only names keys present in `properties`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<Number>,
}

pub(super) const CIRCULAR_REFERENCE: &str = "[Circular Reference]";

impl SchemaNode {
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            nullable: None,
            enum_values: None,
            format: None,
            properties: None,
            required: None,
            items: None,
            minimum: None,
            maximum: None,
            min_items: None,
            max_items: None,
        }
    }

    pub fn object(properties: IndexMap<String, SchemaNode>) -> Self {
        Self { properties: Some(properties), ..Self::new(SchemaType::Object) }
    }

    /// Empty object node with a description.
    pub(super) fn opaque_object(description: impl Into<String>) -> Self {
        Self { description: Some(description.into()), ..Self::object(IndexMap::new()) }
    }

    pub(super) fn circular() -> Self {
        Self::opaque_object(CIRCULAR_REFERENCE)
    }

    /// Enforce the per-type shape: objects get `properties`, arrays get
    /// `items`, and neither keeps the other's fields.
    pub(super) fn settle_shape(&mut self) {
        match self.schema_type {
            SchemaType::Object => {
                self.items = None;
                let properties = self.properties.get_or_insert_with(IndexMap::new);
                if let Some(required) = self.required.as_mut() {
                    required.retain(|key| properties.contains_key(key));
                }
            },
            SchemaType::Array => {
                self.properties = None;
                if self.items.is_none() {
                    self.items = Some(Box::new(SchemaNode::new(SchemaType::String)));
                }
            },
            _ => {
                self.properties = None;
                self.items = None;
            },
        }
        if self.schema_type != SchemaType::Object {
            self.required = None;
        }
        if self.required.as_ref().is_some_and(Vec::is_empty) {
            self.required = None;
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
    }
}
