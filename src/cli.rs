//! Minimal CLI: check documents against a schema, or print their shape.
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;

use crate::matcher::{Verdict, match_shapes};
use crate::observe;
use crate::schema;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// validate JSON documents against an exact structural schema, or infer the schema of a document set
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// check each input document against an expected schema
    Check(CheckCmd),
    /// observe input documents and print their schema
    Schema(SchemaCmd),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat each input file as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// jq pre-process filter applied to each document (may fan out)
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs: literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug)]
struct CheckCmd {
    #[command(flatten)]
    input_settings: InputSettings,

    /// expected schema file (shape vocabulary JSON)
    #[arg(long, short)]
    schema: PathBuf,

    /// print only rejected documents
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct SchemaCmd {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

/// One document after input settings are applied: where it came from, and
/// its value.
struct Document {
    label: String,
    value: Value,
}

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let source_paths =
            resolve_file_path_patterns(&self.input).context("failed to resolve input file paths")?;

        // Per-file work (read, parse, pointer, jq) is independent.
        let per_file: Vec<Vec<Document>> = source_paths
            .par_iter()
            .map(|path| self.load_one_file(path))
            .collect::<Result<_>>()?;

        Ok(per_file.into_iter().flatten().collect())
    }

    fn load_one_file(&self, path: &PathBuf) -> Result<Vec<Document>> {
        let label = path.to_string_lossy().to_string();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read source file {label}"))?;

        let raw: Vec<Value> = if self.ndjson {
            source
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| {
                    serde_json::from_str(line)
                        .with_context(|| format!("failed to parse NDJSON line in {label}"))
                })
                .collect::<Result<_>>()?
        } else {
            vec![
                serde_json::from_str(&source)
                    .with_context(|| format!("failed to parse JSON source file {label}"))?,
            ]
        };

        let mut out = Vec::new();
        for (index, value) in raw.into_iter().enumerate() {
            let value = match &self.json_pointer {
                None => value,
                Some(pointer) => value
                    .pointer(pointer)
                    .cloned()
                    .with_context(|| format!("JSON pointer {pointer} matched nothing in {label}"))?,
            };
            let selected = match &self.jq_expr {
                None => vec![value],
                Some(expr) => crate::jq::apply_filter(expr, &value)
                    .with_context(|| format!("failed to apply jq expression to {label}"))?,
            };
            for (fan, value) in selected.into_iter().enumerate() {
                let label = match (self.ndjson, self.jq_expr.is_some()) {
                    (false, false) => label.clone(),
                    (true, false) => format!("{label}:{index}"),
                    (false, true) => format!("{label}#{fan}"),
                    (true, true) => format!("{label}:{index}#{fan}"),
                };
                out.push(Document { label, value });
            }
        }
        Ok(out)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Check(cmd) => cmd.run(),
            Command::Schema(cmd) => cmd.run(),
        }
    }
}

impl CheckCmd {
    fn run(&self) -> Result<()> {
        let schema_label = self.schema.to_string_lossy().to_string();
        let schema_src = std::fs::read_to_string(&self.schema)
            .with_context(|| format!("failed to read schema file {schema_label}"))?;
        let expected = schema::parse_schema(&schema_src)
            .with_context(|| format!("failed to load schema {schema_label}"))?;

        let documents = self.input_settings.load_documents()?;

        // The matcher is pure over immutable trees, so fan out per document.
        let verdicts: Vec<(String, Verdict)> = documents
            .par_iter()
            .map(|doc| {
                let candidate = observe::observe_value(&doc.value);
                (doc.label.clone(), match_shapes(&candidate, &expected))
            })
            .collect();

        let mut rejected = 0usize;
        for (label, verdict) in &verdicts {
            if verdict.is_match() && self.quiet {
                continue;
            }
            println!("{} {label}", render_verdict(*verdict));
            if !verdict.is_match() {
                rejected += 1;
            }
        }
        if rejected > 0 {
            bail!("{rejected} of {} document(s) rejected", verdicts.len());
        }
        Ok(())
    }
}

impl SchemaCmd {
    fn run(&self) -> Result<()> {
        let documents = self.input_settings.load_documents()?;
        if documents.is_empty() {
            bail!("no input documents");
        }
        let shape = observe::observe_documents(documents.iter().map(|d| &d.value));
        let rendered = serde_json::to_string_pretty(&schema::emit_schema(&shape))?;
        match &self.out {
            Some(out) => {
                if let Some(parent) = out.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(out, &rendered)?;
            }
            None => println!("{rendered}"),
        }
        Ok(())
    }
}

fn render_verdict(verdict: Verdict) -> String {
    match verdict {
        Verdict::Match => verdict.as_str().green().to_string(),
        Verdict::ExtraProperties => verdict.as_str().yellow().to_string(),
        Verdict::NotSubtype => verdict.as_str().red().to_string(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // An explicit glob that matches nothing is an input mistake.
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }
    Ok(out)
}
