//! Exact structural shape validation.
//!
//! Given a candidate shape and an expected shape, decide whether every
//! variant of the candidate is a structural subtype of some variant of the
//! expected shape with zero extra properties at any depth. The answer is a
//! three-way verdict: match, not-subtype, or extra-properties.
//!
//! - [`shape`]: the shape data model (primitives, objects, arrays, unions)
//! - [`matcher`]: the comparison itself
//! - [`observe`]: live `serde_json::Value` → candidate shape
//! - [`schema`]: declarative JSON vocabulary ↔ shape
//! - [`check`]: verdicts as `Result`s with ready-made messages
//! - [`cli`], [`jq`]: the command-line driver and its jq pre-filter bridge

pub mod check;
pub mod cli;
pub mod jq;
pub mod matcher;
pub mod observe;
pub mod schema;
pub mod shape;

pub use check::{ShapeError, check_shape, check_value};
pub use matcher::{Verdict, match_shapes};
pub use shape::{FieldEntry, ObjectShape, PrimitiveKind, ShapeNode};
