//! Primitive-vs-primitive assignability.

use crate::shape::PrimitiveKind;

/// True when a non-structural candidate leaf is an acceptable instance of a
/// non-structural expected leaf.
///
/// Rules:
/// - identical kinds match (literals by value, opaques by marker name);
/// - a literal widens into the expected base kind of the same family
///   (`3000` into `number`, `"on"` into `string`, `true` into `boolean`);
/// - nothing else. Opaque markers never match partially, and a base kind
///   never narrows into a literal.
pub fn match_leaf(candidate: &PrimitiveKind, expected: &PrimitiveKind) -> bool {
    use PrimitiveKind::*;
    match (candidate, expected) {
        (StringLit(_), String) => true,
        (NumberLit(_), Number) => true,
        (BoolLit(_), Boolean) => true,
        (a, b) => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    #[test]
    fn literals_widen_into_their_base_kind() {
        assert!(match_leaf(&PrimitiveKind::NumberLit(OrderedFloat(3000.0)), &PrimitiveKind::Number));
        assert!(match_leaf(&PrimitiveKind::StringLit("on".into()), &PrimitiveKind::String));
        assert!(match_leaf(&PrimitiveKind::BoolLit(true), &PrimitiveKind::Boolean));
    }

    #[test]
    fn base_kinds_never_narrow_into_literals() {
        assert!(!match_leaf(&PrimitiveKind::Number, &PrimitiveKind::NumberLit(OrderedFloat(1.0))));
        assert!(!match_leaf(&PrimitiveKind::String, &PrimitiveKind::StringLit("x".into())));
    }

    #[test]
    fn literals_match_only_identical_literals() {
        assert!(match_leaf(
            &PrimitiveKind::StringLit("on".into()),
            &PrimitiveKind::StringLit("on".into())
        ));
        assert!(!match_leaf(
            &PrimitiveKind::StringLit("on".into()),
            &PrimitiveKind::StringLit("off".into())
        ));
        assert!(!match_leaf(&PrimitiveKind::NumberLit(OrderedFloat(1.0)), &PrimitiveKind::String));
    }

    #[test]
    fn opaque_markers_compare_by_name_only() {
        assert!(match_leaf(
            &PrimitiveKind::Opaque("Date".into()),
            &PrimitiveKind::Opaque("Date".into())
        ));
        assert!(!match_leaf(
            &PrimitiveKind::Opaque("Date".into()),
            &PrimitiveKind::Opaque("RegExp".into())
        ));
        assert!(!match_leaf(&PrimitiveKind::Opaque("Date".into()), &PrimitiveKind::Function));
    }

    #[test]
    fn cross_family_kinds_never_match() {
        assert!(!match_leaf(&PrimitiveKind::Null, &PrimitiveKind::Undefined));
        assert!(!match_leaf(&PrimitiveKind::BigInt, &PrimitiveKind::Number));
        assert!(!match_leaf(&PrimitiveKind::Symbol, &PrimitiveKind::Function));
    }
}
