//! Fixture-driven runner for the exact-match validator.
//!
//! Each fixture is a (candidate schema, expected schema, verdict) triple in
//! the shape vocabulary. Handy for eyeballing regressions without wiring a
//! full cargo test cycle: `cargo run -p dev-test-runner`.

use once_cell::sync::Lazy;
use serde::Deserialize;
use shape_exact::matcher::match_shapes;
use shape_exact::schema::SchemaNode;

#[derive(Debug, Deserialize)]
struct Fixture {
    name: String,
    candidate: SchemaNode,
    expected: SchemaNode,
    verdict: String,
}

static FIXTURES: Lazy<Vec<Fixture>> = Lazy::new(|| {
    let src = include_str!("fixtures.json");
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize(de) {
        Ok(fixtures) => fixtures,
        Err(err) => {
            let path = err.path().to_string();
            panic!("bad fixtures.json at {}: {}", path, err.into_inner())
        }
    }
});

fn main() {
    let mut failures = 0usize;
    for fixture in FIXTURES.iter() {
        let candidate = fixture
            .candidate
            .to_shape()
            .unwrap_or_else(|e| panic!("fixture {:?}: bad candidate schema: {e}", fixture.name));
        let expected = fixture
            .expected
            .to_shape()
            .unwrap_or_else(|e| panic!("fixture {:?}: bad expected schema: {e}", fixture.name));

        let got = match_shapes(&candidate, &expected);
        if got.as_str() == fixture.verdict {
            println!("PASS  {}", fixture.name);
        } else {
            failures += 1;
            println!(
                "FAIL  {} (want {}, got {})",
                fixture.name,
                fixture.verdict,
                got.as_str()
            );
        }
    }

    let total = FIXTURES.len();
    println!("{} / {total} fixtures passed", total - failures);
    if failures > 0 {
        std::process::exit(1);
    }
}
