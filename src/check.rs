//! Assertion boundary: verdicts as `Result`s.
//!
//! The matcher only ever returns a verdict; this layer is for callers that
//! want a rejection to be an error value with a ready-made message, or
//! their own message.

use serde_json::Value;
use thiserror::Error;

use crate::matcher::{Verdict, match_shapes};
use crate::observe::observe_value;
use crate::shape::ShapeNode;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("candidate does not conform to expected shape")]
    NotSubtype,
    #[error("candidate has properties not present in expected shape")]
    ExtraProperties,
    /// Caller-supplied override for either rejection.
    #[error("{0}")]
    Custom(String),
}

pub fn check_shape(candidate: &ShapeNode, expected: &ShapeNode) -> Result<(), ShapeError> {
    match match_shapes(candidate, expected) {
        Verdict::Match => Ok(()),
        Verdict::NotSubtype => Err(ShapeError::NotSubtype),
        Verdict::ExtraProperties => Err(ShapeError::ExtraProperties),
    }
}

/// Like `check_shape`, but any rejection carries the caller's message.
pub fn check_shape_or(
    candidate: &ShapeNode,
    expected: &ShapeNode,
    message: impl Into<String>,
) -> Result<(), ShapeError> {
    check_shape(candidate, expected).map_err(|_| ShapeError::Custom(message.into()))
}

/// Observe a live JSON value and check it against an expected shape.
pub fn check_value(value: &Value, expected: &ShapeNode) -> Result<(), ShapeError> {
    check_shape(&observe_value(value), expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{FieldEntry, PrimitiveKind};
    use serde_json::json;

    fn number() -> ShapeNode {
        ShapeNode::Primitive(PrimitiveKind::Number)
    }

    #[test]
    fn rejections_carry_their_fixed_messages() {
        let expected = ShapeNode::object([("a", FieldEntry::required(number()))]);
        let missing = check_value(&json!({}), &expected).unwrap_err();
        assert_eq!(missing.to_string(), "candidate does not conform to expected shape");

        let junk = check_value(&json!({"a": 1, "b": 2}), &expected).unwrap_err();
        assert_eq!(
            junk.to_string(),
            "candidate has properties not present in expected shape"
        );
    }

    #[test]
    fn caller_message_overrides_both_rejections() {
        let expected = ShapeNode::object([("a", FieldEntry::required(number()))]);
        let candidate = observe_value(&json!({"a": 1, "b": 2}));
        let err = check_shape_or(&candidate, &expected, "bad config").unwrap_err();
        assert_eq!(err, ShapeError::Custom("bad config".into()));
        assert_eq!(err.to_string(), "bad config");
    }

    #[test]
    fn matching_value_checks_clean() {
        let expected = ShapeNode::object([("a", FieldEntry::required(number()))]);
        assert!(check_value(&json!({"a": 1}), &expected).is_ok());
    }
}
