//! Exact structural matching.
//!
//! `match_shapes(candidate, expected)` decides whether every variant of the
//! candidate shape is a structural subtype of some variant of the expected
//! shape, with zero extra properties allowed at any depth. Three outcomes:
//!
//! - `Match`
//! - `NotSubtype`        (wrong kind, missing/incompatible field, ...)
//! - `ExtraProperties`   (a candidate field the expected shape never names)
//!
//! Union quantifiers are explicit:
//! - candidate union: universal. Every alternative must pass on its own.
//! - expected union: existential. Any alternative passing is enough; on
//!   failure the verdict is `ExtraProperties` only when every disjunct
//!   failed for that reason, so "close but has junk fields" stays
//!   distinguishable from "fundamentally the wrong shape".
//!
//! The walk carries an in-progress pair trail keyed by node identity and
//! answers `Match` on re-entry (co-inductive reading). `Box`-owned trees
//! can't revisit a pair, so for ordinary shapes the trail is just a
//! termination guarantee for any future shared-node graph.

pub mod fields;
pub mod leaf;

use crate::shape::ShapeNode;

// ------------------------------- Verdict ---------------------------------- //

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Match,
    NotSubtype,
    ExtraProperties,
}

impl Verdict {
    pub fn is_match(self) -> bool {
        matches!(self, Verdict::Match)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Match => "match",
            Verdict::NotSubtype => "not-subtype",
            Verdict::ExtraProperties => "extra-properties",
        }
    }
}

// ----------------------------- Pair trail --------------------------------- //

/// (candidate, expected) pairs currently being compared, by node address.
/// Per call, discarded on return. Linear scan: trails stay shallow (one
/// entry per nesting level along the current path).
#[derive(Default)]
pub(crate) struct Trail {
    pairs: Vec<(usize, usize)>,
}

impl Trail {
    fn key(candidate: &ShapeNode, expected: &ShapeNode) -> (usize, usize) {
        (
            candidate as *const ShapeNode as usize,
            expected as *const ShapeNode as usize,
        )
    }

    /// Returns false if this exact pair is already in progress.
    fn enter(&mut self, candidate: &ShapeNode, expected: &ShapeNode) -> bool {
        let key = Self::key(candidate, expected);
        if self.pairs.contains(&key) {
            return false;
        }
        self.pairs.push(key);
        true
    }

    fn leave(&mut self) {
        self.pairs.pop();
    }
}

// --------------------------- Union distributor ---------------------------- //

/// Top-level comparison. Pure; safe to call from any number of threads on
/// independently-owned trees.
pub fn match_shapes(candidate: &ShapeNode, expected: &ShapeNode) -> Verdict {
    let mut trail = Trail::default();
    match_nodes(candidate, expected, &mut trail)
}

pub(crate) fn match_nodes(
    candidate: &ShapeNode,
    expected: &ShapeNode,
    trail: &mut Trail,
) -> Verdict {
    if !trail.enter(candidate, expected) {
        // Already comparing this exact pair further up the walk.
        return Verdict::Match;
    }
    let verdict = dispatch(candidate, expected, trail);
    trail.leave();
    verdict
}

fn dispatch(candidate: &ShapeNode, expected: &ShapeNode, trail: &mut Trail) -> Verdict {
    // Candidate union first: an empty candidate union is uninhabited and
    // vacuously matches anything, including an empty expected union.
    if let ShapeNode::Union(alternatives) = candidate {
        for alt in alternatives {
            let verdict = match_nodes(alt, expected, trail);
            if !verdict.is_match() {
                return verdict;
            }
        }
        return Verdict::Match;
    }

    if let ShapeNode::Union(alternatives) = expected {
        return match_against_any(candidate, alternatives, trail);
    }

    match (candidate, expected) {
        (ShapeNode::Primitive(c), ShapeNode::Primitive(e)) => {
            if leaf::match_leaf(c, e) {
                Verdict::Match
            } else {
                Verdict::NotSubtype
            }
        }
        (ShapeNode::Object(c), ShapeNode::Object(e)) => fields::match_fields(c, e, trail),
        (ShapeNode::Array(c), ShapeNode::Array(e)) => {
            match_nodes(&c.element, &e.element, trail)
        }
        // Kind mismatch (object vs array, array vs primitive, ...) is never
        // a partial match and never an extra-property failure.
        _ => Verdict::NotSubtype,
    }
}

/// Existential fold over expected alternatives for one non-union candidate.
///
/// A success short-circuits (the boolean fast path is confluent). On
/// failure every disjunct has been tried; `ExtraProperties` is reported
/// only when no disjunct failed for a structural reason.
fn match_against_any(
    candidate: &ShapeNode,
    alternatives: &[ShapeNode],
    trail: &mut Trail,
) -> Verdict {
    if alternatives.is_empty() {
        // Uninhabited expected shape admits nothing.
        return Verdict::NotSubtype;
    }
    let mut any_structural_failure = false;
    for alt in alternatives {
        match match_nodes(candidate, alt, trail) {
            Verdict::Match => return Verdict::Match,
            Verdict::NotSubtype => any_structural_failure = true,
            Verdict::ExtraProperties => {}
        }
    }
    if any_structural_failure {
        Verdict::NotSubtype
    } else {
        Verdict::ExtraProperties
    }
}
