use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

const KNOWN_TYPES: [&str; 6] = ["string", "number", "integer", "boolean", "array", "object"];

/// Walk a sanitized schema and check the per-node invariants.
fn assert_invariants(node: &Value) {
    let ty = node["type"].as_str().expect("type is a string");
    assert!(KNOWN_TYPES.contains(&ty), "unknown type {ty}");

    match ty {
        "array" => {
            assert!(node.get("items").is_some(), "array without items: {node}");
            assert!(node.get("properties").is_none());
            assert_invariants(&node["items"]);
        },
        "object" => {
            let props = node["properties"].as_object().expect("object without properties");
            assert!(node.get("items").is_none());
            if let Some(required) = node.get("required") {
                for key in required.as_array().unwrap() {
                    assert!(props.contains_key(key.as_str().unwrap()), "dangling {key}");
                }
            }
            for child in props.values() {
                assert_invariants(child);
            }
        },
        _ => {
            assert!(node.get("properties").is_none());
            assert!(node.get("items").is_none());
            assert!(node.get("required").is_none());
        },
    }
}

fn assert_idempotent(input: &Value) -> Value {
    let once = sanitize_schema(input);
    let twice = sanitize_schema(&once);
    assert_eq!(twice, once, "not idempotent for {input}");
    once
}

#[test]
fn test_non_object_passes_through() {
    assert_eq!(sanitize_schema(&json!("string")), json!("string"));
    assert_eq!(sanitize_schema(&json!([1, 2])), json!([1, 2]));
    assert_eq!(sanitize_schema(&Value::Null), Value::Null);
    assert!(sanitize_schema_node(&json!(true)).is_none());
}

#[test]
fn test_whitelist_and_required_filtering() {
    let schema = json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "path": {"type": "string", "minLength": 1, "format": "uri", "default": "/"},
            "when": {"type": "string", "format": "city"},
            "count": {"type": "integer", "minimum": 0, "maximum": 10, "exclusiveMaximum": 11},
            "dropped": null
        },
        "required": ["path", "missing", "path"]
    });

    let out = assert_idempotent(&schema);
    assert_eq!(
        out,
        json!({
            "type": "object",
            "properties": {
                "path": {"type": "string", "format": "uri"},
                "when": {"type": "string"},
                "count": {"type": "integer", "minimum": 0, "maximum": 10}
            },
            "required": ["path"]
        })
    );
    assert_invariants(&out);
}

#[test]
fn test_any_of_string_number_prefers_string() {
    let out = assert_idempotent(&json!({"anyOf": [{"type": "string"}, {"type": "number"}]}));
    assert_eq!(out, json!({"type": "string"}));
    assert!(out.get("properties").is_none());
}

#[test]
fn test_union_merges_properties() {
    let schema = json!({
        "description": "target",
        "allOf": [
            {"type": "object", "properties": {"a": {"type": "string"}}, "required": ["a"]},
            {"type": "object", "properties": {"a": {"type": "integer"}, "b": {"type": "boolean"}}, "required": ["b", "c"]}
        ]
    });
    let out = assert_idempotent(&schema);
    assert_eq!(
        out,
        json!({
            "type": "object",
            "description": "target",
            "properties": {"a": {"type": "integer"}, "b": {"type": "boolean"}},
            "required": ["a", "b"]
        })
    );
}

#[test]
fn test_any_of_drops_required() {
    let schema = json!({
        "oneOf": [
            {"type": "object", "properties": {"a": {"type": "string"}}, "required": ["a"]},
            {"type": "object", "properties": {"b": {"type": "string"}}, "required": ["b"]}
        ]
    });
    let out = assert_idempotent(&schema);
    assert!(out.get("required").is_none());
    assert_eq!(out["properties"].as_object().unwrap().len(), 2);
}

#[test]
fn test_union_of_enums_becomes_string_enum() {
    let schema = json!({
        "anyOf": [{"enum": ["a", "b", ""]}, {"enum": ["b", "c", null]}]
    });
    let out = assert_idempotent(&schema);
    assert_eq!(out, json!({"type": "string", "enum": ["a", "b", "c"]}));
}

#[test]
fn test_nullable_union() {
    let schema = json!({
        "anyOf": [{"type": "integer", "description": "count"}, {"type": "null"}]
    });
    let out = assert_idempotent(&schema);
    assert_eq!(out, json!({"type": "integer", "description": "count", "nullable": true}));
}

#[test]
fn test_union_multiple_types_without_string() {
    let out = assert_idempotent(&json!({"oneOf": [{"type": "integer"}, {"type": "object"}]}));
    assert_eq!(out, json!({"type": "object", "properties": {}}));

    let out = assert_idempotent(&json!({"oneOf": [{"type": "integer"}, {"type": "boolean"}]}));
    assert_eq!(out, json!({"type": "integer"}));
}

#[test]
fn test_union_constraint_branches_keep_outer_shape() {
    let schema = json!({
        "type": "object",
        "properties": {"a": {"type": "string"}, "b": {"type": "string"}},
        "anyOf": [{"required": ["a"]}, {"required": ["b"]}]
    });
    let out = assert_idempotent(&schema);
    assert_eq!(out["type"], "object");
    assert_eq!(out["properties"].as_object().unwrap().len(), 2);
}

#[test]
fn test_ref_is_not_resolved() {
    let out = assert_idempotent(&json!({"$ref": "#/definitions/Node", "type": "string"}));
    assert_eq!(
        out,
        json!({"type": "object", "description": "Reference: #/definitions/Node", "properties": {}})
    );
}

#[test]
fn test_const() {
    let out = assert_idempotent(&json!({"const": "fixed", "description": "mode"}));
    assert_eq!(out, json!({"type": "string", "enum": ["fixed"], "description": "mode"}));

    let out = assert_idempotent(&json!({"const": 3}));
    assert_eq!(out, json!({"type": "integer", "enum": [3]}));

    let out = assert_idempotent(&json!({"const": ""}));
    assert_eq!(out, json!({"type": "string"}));
}

#[test]
fn test_type_arrays_and_synonyms() {
    assert_eq!(
        sanitize_schema(&json!({"type": ["null", "integer"]})),
        json!({"type": "integer", "nullable": true})
    );
    assert_eq!(sanitize_schema(&json!({"type": ["foo"]})), json!({"type": "string"}));
    assert_eq!(sanitize_schema(&json!({"type": "int"})), json!({"type": "integer"}));
    assert_eq!(sanitize_schema(&json!({"type": "double"})), json!({"type": "number"}));
    assert_eq!(sanitize_schema(&json!({"type": "bool"})), json!({"type": "boolean"}));
    assert_eq!(
        sanitize_schema(&json!({"type": "list"})),
        json!({"type": "array", "items": {"type": "string"}})
    );
    assert_eq!(
        sanitize_schema(&json!({"type": "dict"})),
        json!({"type": "object", "properties": {}})
    );
    assert_eq!(sanitize_schema(&json!({"type": "any"})), json!({"type": "string"}));
    assert_eq!(sanitize_schema(&json!({"type": "whatever"})), json!({"type": "string"}));
}

#[test]
fn test_type_backfill() {
    assert_eq!(
        sanitize_schema(&json!({"properties": {"a": {"type": "string"}}})),
        json!({"type": "object", "properties": {"a": {"type": "string"}}})
    );
    assert_eq!(
        sanitize_schema(&json!({"items": {"type": "number"}})),
        json!({"type": "array", "items": {"type": "number"}})
    );
    assert_eq!(
        sanitize_schema(&json!({"enum": [1.5, 2.5]})),
        json!({"type": "number", "enum": [1.5, 2.5]})
    );
    assert_eq!(sanitize_schema(&json!({})), json!({"type": "string"}));
}

#[test]
fn test_tuple_items_use_first_object() {
    let out = sanitize_schema(&json!({"type": "array", "items": [1, {"type": "boolean"}]}));
    assert_eq!(out, json!({"type": "array", "items": {"type": "boolean"}}));
}

#[test]
fn test_mismatched_fields_are_removed() {
    let out = sanitize_schema(&json!({
        "type": "string",
        "properties": {"a": {"type": "string"}},
        "items": {"type": "string"},
        "required": ["a"]
    }));
    assert_eq!(out, json!({"type": "string"}));
}

#[test]
fn test_self_referencing_property_terminates() {
    let mut graph = SchemaGraph::from_value(&json!({
        "type": "object",
        "properties": {"name": {"type": "string"}}
    }));
    let root = graph.root();
    let properties = graph.lookup(&["properties"]).unwrap();
    assert!(graph.link(properties, "parent", root));

    let out = graph.sanitize();
    assert_eq!(
        out["properties"]["parent"],
        json!({"type": "object", "description": "[Circular Reference]", "properties": {}})
    );
    assert_eq!(out["properties"]["name"], json!({"type": "string"}));
    assert_invariants(&out);
    assert_eq!(sanitize_schema(&out), out);
}

#[test]
fn test_cycle_through_union_branch() {
    let mut graph = SchemaGraph::from_value(&json!({
        "type": "object",
        "properties": {"next": {"anyOf": [{"type": "null"}]}}
    }));
    let root = graph.root();
    let branches = graph.lookup(&["properties", "next", "anyOf"]).unwrap();
    assert!(graph.push_element(branches, root));

    let out = graph.sanitize();
    assert_eq!(out["properties"]["next"]["description"], "[Circular Reference]");
    assert_eq!(out["properties"]["next"]["nullable"], true);
}

#[test]
fn test_shared_subschema_is_not_a_cycle() {
    let mut graph = SchemaGraph::from_value(&json!({
        "type": "object",
        "properties": {"a": {"type": "object", "properties": {"x": {"type": "integer"}}}}
    }));
    let shared = graph.lookup(&["properties", "a"]).unwrap();
    let properties = graph.lookup(&["properties"]).unwrap();
    assert!(graph.link(properties, "b", shared));

    let out = graph.sanitize();
    assert_eq!(out["properties"]["a"], out["properties"]["b"]);
    assert_eq!(out["properties"]["b"]["properties"]["x"]["type"], "integer");
}

#[test]
fn test_link_rejects_non_object_parent() {
    let mut graph = SchemaGraph::from_value(&json!({"enum": ["a"]}));
    let root = graph.root();
    let values = graph.lookup(&["enum"]).unwrap();
    assert!(!graph.link(values, "x", root));
}

#[test]
fn test_deep_nesting_is_bounded() {
    let mut schema = json!({"type": "string"});
    for _ in 0..100 {
        schema = json!({"type": "object", "properties": {"child": schema}});
    }
    let out = assert_idempotent(&schema);
    assert_invariants(&out);
}

#[test]
fn test_typed_node() {
    let node = sanitize_schema_node(&json!({
        "type": "object",
        "properties": {"tags": {"type": "array", "items": {"type": "string"}, "maxItems": 5}}
    }))
    .unwrap();
    assert_eq!(node.schema_type, SchemaType::Object);
    let tags = &node.properties.as_ref().unwrap()["tags"];
    assert_eq!(tags.schema_type, SchemaType::Array);
    assert_eq!(tags.items.as_ref().unwrap().schema_type, SchemaType::String);
    assert_eq!(tags.max_items.as_ref().and_then(serde_json::Number::as_u64), Some(5));
}

#[test]
fn test_invariants_over_mixed_samples() {
    let samples = [
        json!({"type": "array"}),
        json!({"type": "object", "required": ["x"]}),
        json!({"anyOf": []}),
        json!({"anyOf": ["not-a-schema"]}),
        json!({"oneOf": [{"type": "array", "items": {"type": "int"}}, {"type": "null"}]}),
        json!({"allOf": [{"properties": {"a": {"$ref": "#/a"}}}, {"properties": {"b": {"const": true}}}]}),
        json!({"type": ["array", "null"], "items": [{"type": "object"}]}),
        json!({"enum": [null, ""], "type": "string"}),
        json!({"type": "number", "minimum": "zero", "maxItems": 2}),
    ];
    for sample in samples {
        let out = assert_idempotent(&sample);
        assert_invariants(&out);
    }
}
