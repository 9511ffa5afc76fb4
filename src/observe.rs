//! Turn a live JSON value into its candidate shape.
//!
//! The shape of a concrete value is as narrow as the model allows: scalars
//! become literal leaves, object fields are all required (they are
//! literally present), and an array becomes a homogeneous array whose
//! element shape is the union of the element shapes actually seen. The leaf
//! matcher's widening rule then lets a literal satisfy an expected base
//! kind.

use ordered_float::OrderedFloat;
use serde_json::Value;

use crate::shape::{FieldEntry, ObjectShape, PrimitiveKind, ShapeNode};

pub fn observe_value(value: &Value) -> ShapeNode {
    match value {
        Value::Null => ShapeNode::Primitive(PrimitiveKind::Null),
        Value::Bool(b) => ShapeNode::Primitive(PrimitiveKind::BoolLit(*b)),
        Value::Number(n) => ShapeNode::Primitive(PrimitiveKind::NumberLit(OrderedFloat(
            n.as_f64().unwrap_or(f64::NAN),
        ))),
        Value::String(s) => ShapeNode::Primitive(PrimitiveKind::StringLit(s.clone())),
        Value::Array(items) => observe_array(items),
        Value::Object(map) => {
            // serde_json's map already guarantees unique keys, so this
            // cannot trip the duplicate-name panic.
            ShapeNode::Object(ObjectShape::from_entries(
                map.iter()
                    .map(|(k, v)| (k.clone(), FieldEntry::required(observe_value(v)))),
            ))
        }
    }
}

/// Shape covering every document in a batch: the deduped union of the
/// per-document shapes, unwrapped when only one distinct shape was seen.
pub fn observe_documents<'a, I>(values: I) -> ShapeNode
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut alternatives = Vec::<ShapeNode>::new();
    for value in values {
        let shape = observe_value(value);
        if !alternatives.contains(&shape) {
            alternatives.push(shape);
        }
    }
    match alternatives.len() {
        1 => alternatives.remove(0),
        _ => ShapeNode::Union(alternatives),
    }
}

fn observe_array(items: &[Value]) -> ShapeNode {
    // Element shape = deduped union of the observed element shapes. An empty
    // array gets an empty union: uninhabited, so it satisfies any expected
    // element shape.
    let mut alternatives = Vec::<ShapeNode>::new();
    for item in items {
        let shape = observe_value(item);
        if !alternatives.contains(&shape) {
            alternatives.push(shape);
        }
    }
    ShapeNode::array(ShapeNode::union(alternatives))
}
