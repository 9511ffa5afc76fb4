//! jq pre-filter bridge (jaq).
//!
//! The CLI lets callers run a jq program over each input document before
//! validation, e.g. to peel off an envelope: `--jq-expr '.data.items[]'`.
//! One input value in, zero or more output values out.

use anyhow::{Result, anyhow};
use jaq_core::{Compiler, Ctx, RcIter, load};
use jaq_json::Val;
use serde_json::Value;

pub fn apply_filter(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(|errs| collect_errors("jq parse error", errs.iter().map(|(_, e)| format!("{e:?}"))))?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| {
            collect_errors(
                "undefined name in jq filter",
                errs.iter()
                    .flat_map(|(_, list)| list.iter())
                    .map(|(name, undef)| format!("`{name}`: {undef:?}")),
            )
        })?;

    let inputs = RcIter::new(core::iter::empty());
    let mut out = Vec::new();
    for item in filter.run((Ctx::new([], &inputs), Val::from(input.clone()))) {
        let val = item.map_err(|e| anyhow!("jq runtime error: {e:?}"))?;
        // Val displays as JSON text; round-trip it back into a Value.
        let value = serde_json::from_str(&val.to_string())
            .map_err(|e| anyhow!("jq filter produced non-JSON output: {e}"))?;
        out.push(value);
    }
    Ok(out)
}

fn collect_errors(context: &str, details: impl Iterator<Item = String>) -> anyhow::Error {
    let joined = details.collect::<Vec<_>>().join("; ");
    anyhow!("{context}: {joined}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_filter_passes_the_document_through() {
        let doc = json!({"a": 1});
        let out = apply_filter(".", &doc).unwrap();
        assert_eq!(out, vec![doc]);
    }

    #[test]
    fn iteration_fans_out_into_multiple_documents() {
        let doc = json!({"items": [{"x": 1}, {"x": 2}]});
        let out = apply_filter(".items[]", &doc).unwrap();
        assert_eq!(out, vec![json!({"x": 1}), json!({"x": 2})]);
    }

    #[test]
    fn a_broken_filter_surfaces_as_an_error() {
        assert!(apply_filter(".items[", &json!({})).is_err());
    }
}
