//! Declarative schema vocabulary.
//!
//! The JSON form of a shape, for schemas supplied as files rather than
//! built from live values. Every node is a tagged object:
//!
//! ```json
//! { "type": "object",
//!   "fields": {
//!     "port": { "type": "literal", "value": 3000 },
//!     "host": { "shape": { "type": "string" }, "optional": true },
//!     "tags": { "type": "array", "items": { "type": "string" } },
//!     "mode": { "type": "union", "variants": [
//!       { "type": "literal", "value": "on" },
//!       { "type": "literal", "value": "off" }
//!     ]}
//!   }
//! }
//! ```
//!
//! A field maps either to a shape directly (required field) or to a
//! `{ "shape": ..., "optional": ... }` wrapper. Aliases and intersections
//! are not part of the vocabulary; resolve them before writing the schema.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use crate::shape::{FieldEntry, ObjectShape, PrimitiveKind, ShapeNode};

// ------------------------------- Vocabulary ------------------------------- //

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaNode {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Symbol,
    Bigint,
    Function,
    Literal { value: Value },
    Opaque { name: String },
    Array { items: Box<SchemaNode> },
    Object {
        #[serde(default)]
        fields: IndexMap<String, SchemaField>,
    },
    Union { variants: Vec<SchemaNode> },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaField {
    Entry {
        shape: SchemaNode,
        #[serde(default)]
        optional: bool,
    },
    Shape(SchemaNode),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid schema at JSON path {path}: {message}")]
    Parse { path: String, message: String },
    #[error("literal values must be JSON scalars, got: {0}")]
    NonScalarLiteral(String),
}

// -------------------------------- Parsing --------------------------------- //

/// Parse a schema document into a shape, with JSON-path context on errors.
pub fn parse_schema(src: &str) -> Result<ShapeNode, SchemaError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    let node: SchemaNode =
        serde_path_to_error::deserialize(de).map_err(|err| SchemaError::Parse {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        })?;
    node.to_shape()
}

impl SchemaNode {
    pub fn to_shape(&self) -> Result<ShapeNode, SchemaError> {
        Ok(match self {
            SchemaNode::String => ShapeNode::Primitive(PrimitiveKind::String),
            SchemaNode::Number => ShapeNode::Primitive(PrimitiveKind::Number),
            SchemaNode::Boolean => ShapeNode::Primitive(PrimitiveKind::Boolean),
            SchemaNode::Null => ShapeNode::Primitive(PrimitiveKind::Null),
            SchemaNode::Undefined => ShapeNode::Primitive(PrimitiveKind::Undefined),
            SchemaNode::Symbol => ShapeNode::Primitive(PrimitiveKind::Symbol),
            SchemaNode::Bigint => ShapeNode::Primitive(PrimitiveKind::BigInt),
            SchemaNode::Function => ShapeNode::Primitive(PrimitiveKind::Function),
            SchemaNode::Opaque { name } => ShapeNode::Primitive(PrimitiveKind::Opaque(name.clone())),
            SchemaNode::Literal { value } => ShapeNode::Primitive(literal_kind(value)?),
            SchemaNode::Array { items } => ShapeNode::array(items.to_shape()?),
            SchemaNode::Union { variants } => ShapeNode::Union(
                variants.iter().map(SchemaNode::to_shape).collect::<Result<_, _>>()?,
            ),
            SchemaNode::Object { fields } => {
                let mut entries = Vec::with_capacity(fields.len());
                for (name, field) in fields {
                    let entry = match field {
                        SchemaField::Shape(node) => FieldEntry::required(node.to_shape()?),
                        SchemaField::Entry { shape, optional } => FieldEntry {
                            shape: shape.to_shape()?,
                            optional: *optional,
                        },
                    };
                    entries.push((name.clone(), entry));
                }
                ShapeNode::Object(ObjectShape::from_entries(entries))
            }
        })
    }
}

fn literal_kind(value: &Value) -> Result<PrimitiveKind, SchemaError> {
    match value {
        Value::Null => Ok(PrimitiveKind::Null),
        Value::Bool(b) => Ok(PrimitiveKind::BoolLit(*b)),
        Value::Number(n) => Ok(PrimitiveKind::NumberLit(OrderedFloat(
            n.as_f64().unwrap_or(f64::NAN),
        ))),
        Value::String(s) => Ok(PrimitiveKind::StringLit(s.clone())),
        other => Err(SchemaError::NonScalarLiteral(other.to_string())),
    }
}

// -------------------------------- Emission -------------------------------- //

/// Render a shape back into the schema vocabulary.
pub fn emit_schema(shape: &ShapeNode) -> Value {
    match shape {
        ShapeNode::Primitive(kind) => emit_primitive(kind),
        ShapeNode::Array(arr) => json!({ "type": "array", "items": emit_schema(&arr.element) }),
        ShapeNode::Union(alternatives) => json!({
            "type": "union",
            "variants": alternatives.iter().map(emit_schema).collect::<Vec<_>>(),
        }),
        ShapeNode::Object(obj) => {
            let mut fields = serde_json::Map::new();
            for (name, entry) in &obj.fields {
                let rendered = if entry.optional {
                    json!({ "shape": emit_schema(&entry.shape), "optional": true })
                } else {
                    emit_schema(&entry.shape)
                };
                fields.insert(name.clone(), rendered);
            }
            json!({ "type": "object", "fields": Value::Object(fields) })
        }
    }
}

fn emit_primitive(kind: &PrimitiveKind) -> Value {
    match kind {
        PrimitiveKind::String => json!({ "type": "string" }),
        PrimitiveKind::Number => json!({ "type": "number" }),
        PrimitiveKind::Boolean => json!({ "type": "boolean" }),
        PrimitiveKind::Null => json!({ "type": "null" }),
        PrimitiveKind::Undefined => json!({ "type": "undefined" }),
        PrimitiveKind::Symbol => json!({ "type": "symbol" }),
        PrimitiveKind::BigInt => json!({ "type": "bigint" }),
        PrimitiveKind::Function => json!({ "type": "function" }),
        PrimitiveKind::Opaque(name) => json!({ "type": "opaque", "name": name }),
        PrimitiveKind::StringLit(s) => json!({ "type": "literal", "value": s }),
        PrimitiveKind::NumberLit(n) => json!({ "type": "literal", "value": n.0 }),
        PrimitiveKind::BoolLit(b) => json!({ "type": "literal", "value": b }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{Verdict, match_shapes};
    use crate::observe::observe_value;

    #[test]
    fn parses_the_module_doc_example() {
        let src = r#"{
            "type": "object",
            "fields": {
                "port": { "type": "literal", "value": 3000 },
                "host": { "shape": { "type": "string" }, "optional": true },
                "tags": { "type": "array", "items": { "type": "string" } },
                "mode": { "type": "union", "variants": [
                    { "type": "literal", "value": "on" },
                    { "type": "literal", "value": "off" }
                ]}
            }
        }"#;
        let shape = parse_schema(src).unwrap();
        let ShapeNode::Object(obj) = &shape else { panic!("expected object") };
        assert_eq!(obj.fields.len(), 4);
        assert!(obj.fields["host"].optional);
        assert!(!obj.fields["port"].optional);
        assert_eq!(obj.fields["port"].shape, ShapeNode::number_lit(3000.0));
    }

    #[test]
    fn unknown_node_types_are_parse_errors() {
        let src = r#"{ "type": "object", "fields": { "a": { "type": "nonsense" } } }"#;
        let err = parse_schema(src).unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn composite_literal_values_are_rejected() {
        let src = r#"{ "type": "literal", "value": [1, 2] }"#;
        let err = parse_schema(src).unwrap_err();
        assert!(matches!(err, SchemaError::NonScalarLiteral(_)));
    }

    #[test]
    fn emit_then_parse_round_trips_an_observed_shape() {
        let value = serde_json::json!({
            "id": "0ahUKEa1ZQ",
            "rating": 4.3,
            "open": true,
            "tags": ["hardware", "store"],
            "geo": { "lat": 37.4219, "lon": -122.0840 }
        });
        let shape = observe_value(&value);
        let rendered = emit_schema(&shape).to_string();
        let reparsed = parse_schema(&rendered).unwrap();
        assert_eq!(reparsed, shape);
        assert_eq!(match_shapes(&shape, &reparsed), Verdict::Match);
    }

    #[test]
    fn schema_driven_check_matches_a_live_value() {
        let schema = r#"{
            "type": "object",
            "fields": {
                "name": { "type": "string" },
                "port": { "type": "union", "variants": [
                    { "type": "literal", "value": 3000 },
                    { "type": "literal", "value": 3001 }
                ]},
                "debug": { "shape": { "type": "boolean" }, "optional": true }
            }
        }"#;
        let expected = parse_schema(schema).unwrap();
        let ok = observe_value(&serde_json::json!({ "name": "api", "port": 3000 }));
        let wrong_port = observe_value(&serde_json::json!({ "name": "api", "port": 9999 }));
        let junk = observe_value(&serde_json::json!({ "name": "api", "port": 3000, "pid": 1 }));
        assert_eq!(match_shapes(&ok, &expected), Verdict::Match);
        assert_eq!(match_shapes(&wrong_port, &expected), Verdict::NotSubtype);
        assert_eq!(match_shapes(&junk, &expected), Verdict::ExtraProperties);
    }
}
