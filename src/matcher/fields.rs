//! Object-vs-object field reconciliation.

use crate::matcher::{Trail, Verdict, match_nodes};
use crate::shape::ObjectShape;

/// Compare one candidate object alternative against one expected object
/// alternative.
///
/// The extra-key scan runs first and short-circuits: a candidate carrying
/// both junk fields and a type mismatch reports the junk. After that every
/// expected field must reconcile; first failure wins.
///
/// Optionality table for a field present on both sides:
/// a candidate marked optional may omit the field, so it only fits an
/// expected field that is itself optional. Every other combination just
/// compares the two field shapes.
pub(crate) fn match_fields(
    candidate: &ObjectShape,
    expected: &ObjectShape,
    trail: &mut Trail,
) -> Verdict {
    for name in candidate.fields.keys() {
        if !expected.fields.contains_key(name) {
            return Verdict::ExtraProperties;
        }
    }

    for (name, expected_entry) in &expected.fields {
        match candidate.fields.get(name) {
            None => {
                if !expected_entry.optional {
                    return Verdict::NotSubtype;
                }
            }
            Some(candidate_entry) => {
                if candidate_entry.optional && !expected_entry.optional {
                    return Verdict::NotSubtype;
                }
                let verdict = match_nodes(&candidate_entry.shape, &expected_entry.shape, trail);
                if !verdict.is_match() {
                    return verdict;
                }
            }
        }
    }

    Verdict::Match
}
