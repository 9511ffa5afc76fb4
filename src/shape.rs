//! Shape data model.
//!
//! A `ShapeNode` is a pure, immutable description of a value's structure:
//! primitive, object (named fields), homogeneous array, or union. The
//! matcher walks these trees; nothing here carries matching logic.
//!
//! Tuples have no dedicated variant: model them as an object with positional
//! keys ("0", "1", ...). Row-open objects don't exist in this model; every
//! object is closed (extra keys are always a rejection).

use indexmap::IndexMap;
use ordered_float::OrderedFloat;

// ------------------------------- Leaves ----------------------------------- //

/// Non-structural leaf kinds. Literals carry their value; `Opaque` is a
/// nominal marker for host types with no structural decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Symbol,
    BigInt,
    Function,
    Opaque(String),
    StringLit(String),
    NumberLit(OrderedFloat<f64>),
    BoolLit(bool),
}

// ------------------------------- Nodes ------------------------------------ //

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeNode {
    Primitive(PrimitiveKind),
    Object(ObjectShape),
    Array(ArrayShape),
    /// Semantically a set of alternatives; order only affects reporting
    /// determinism, never the verdict. Zero alternatives = uninhabited.
    Union(Vec<ShapeNode>),
}

/// Closed record of named fields. Field names are unique; `IndexMap` keeps
/// insertion order for deterministic iteration but equality ignores order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ObjectShape {
    pub fields: IndexMap<String, FieldEntry>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayShape {
    pub element: Box<ShapeNode>,
}

/// One named field. `optional` is the "value may be structurally absent"
/// bit, independent of whether the field's shape includes `Undefined`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldEntry {
    pub shape: ShapeNode,
    pub optional: bool,
}

impl FieldEntry {
    pub fn required(shape: ShapeNode) -> Self {
        FieldEntry { shape, optional: false }
    }

    pub fn optional(shape: ShapeNode) -> Self {
        FieldEntry { shape, optional: true }
    }
}

// ----------------------------- Constructors ------------------------------- //

impl ObjectShape {
    /// Build from (name, entry) pairs.
    ///
    /// Panics on a duplicate field name: that is a bug at the shape
    /// construction site, and a silently-last-wins map would let the
    /// validator return a verdict for a shape nobody asked about.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldEntry)>,
        K: Into<String>,
    {
        let mut fields = IndexMap::new();
        for (name, entry) in entries {
            let name = name.into();
            if fields.insert(name.clone(), entry).is_some() {
                panic!("duplicate field name in object shape: {name:?}");
            }
        }
        ObjectShape { fields }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ShapeNode {
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldEntry)>,
        K: Into<String>,
    {
        ShapeNode::Object(ObjectShape::from_entries(entries))
    }

    pub fn array(element: ShapeNode) -> Self {
        ShapeNode::Array(ArrayShape { element: Box::new(element) })
    }

    pub fn union<I>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = ShapeNode>,
    {
        ShapeNode::Union(alternatives.into_iter().collect())
    }

    pub fn string_lit(s: impl Into<String>) -> Self {
        ShapeNode::Primitive(PrimitiveKind::StringLit(s.into()))
    }

    pub fn number_lit(n: f64) -> Self {
        ShapeNode::Primitive(PrimitiveKind::NumberLit(OrderedFloat(n)))
    }

    pub fn bool_lit(b: bool) -> Self {
        ShapeNode::Primitive(PrimitiveKind::BoolLit(b))
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        ShapeNode::Primitive(PrimitiveKind::Opaque(name.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_equality_ignores_field_order() {
        let a = ShapeNode::object([
            ("x", FieldEntry::required(ShapeNode::Primitive(PrimitiveKind::Number))),
            ("y", FieldEntry::required(ShapeNode::Primitive(PrimitiveKind::String))),
        ]);
        let b = ShapeNode::object([
            ("y", FieldEntry::required(ShapeNode::Primitive(PrimitiveKind::String))),
            ("x", FieldEntry::required(ShapeNode::Primitive(PrimitiveKind::Number))),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "duplicate field name")]
    fn duplicate_field_names_fail_fast() {
        let _ = ObjectShape::from_entries([
            ("x", FieldEntry::required(ShapeNode::Primitive(PrimitiveKind::Number))),
            ("x", FieldEntry::required(ShapeNode::Primitive(PrimitiveKind::String))),
        ]);
    }

    #[test]
    fn literal_leaves_compare_by_value() {
        assert_eq!(ShapeNode::number_lit(3000.0), ShapeNode::number_lit(3000.0));
        assert_ne!(ShapeNode::number_lit(3000.0), ShapeNode::number_lit(3001.0));
        assert_ne!(ShapeNode::opaque("Date"), ShapeNode::opaque("RegExp"));
    }
}
