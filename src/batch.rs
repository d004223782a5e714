//! Loading parser output and running the rewrite over many units.
//!
//! Files are independent, so each unit is decoded, normalized and rewritten
//! on the rayon pool. Results always come back in input order.
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;

use crate::engine::{self, Rewrite};
use crate::error::Error;
use crate::ir::CompilationUnit;
use crate::norm;
use crate::path_de;
use crate::source::SourceUnit;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// One parser-produced unit, not decoded yet.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File it came from; also names the unit if the parser did not.
    pub origin: PathBuf,
    pub value: Value,
}

#[derive(Debug, Clone, Default)]
pub struct InputOptions {
    pub ndjson: bool,
    pub json_pointer: Option<String>,
    pub jq_expr: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report a failed file and keep going.
    #[default]
    Continue,
    /// Stop once any file fails. Which failure is reported is not fixed.
    FailFast,
}

#[derive(Debug)]
pub struct FileOutcome {
    pub origin: PathBuf,
    pub result: Result<Rewrite, Error>,
}

// ————————————————————————————————————————————————————————————————————————————
// LOADING
// ————————————————————————————————————————————————————————————————————————————

pub fn load_documents(paths: &[PathBuf], options: &InputOptions) -> Result<Vec<SourceDocument>, Error> {
    let mut out = Vec::new();
    for path in paths {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        for value in parse_documents(path, &text, options.ndjson)? {
            for value in select(path, value, options)? {
                out.push(SourceDocument { origin: path.clone(), value });
            }
        }
    }
    tracing::debug!(files = paths.len(), units = out.len(), "loaded source documents");
    Ok(out)
}

fn parse_documents(path: &Path, text: &str, ndjson: bool) -> Result<Vec<Value>, Error> {
    if !ndjson {
        return path_de::from_str_with_path::<Value>(text)
            .map(|v| vec![v])
            .map_err(|msg| Error::decode(path, msg));
    }
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(ix, line)| {
            path_de::from_str_with_path::<Value>(line)
                .map_err(|msg| Error::decode(path, format!("line {}: {msg}", ix + 1)))
        })
        .collect()
}

fn select(path: &Path, value: Value, options: &InputOptions) -> Result<Vec<Value>, Error> {
    let value = match options.json_pointer.as_deref() {
        None => value,
        Some(pointer) => value.pointer(pointer).cloned().ok_or_else(|| Error::Select {
            origin: path.to_path_buf(),
            message: format!("JSON pointer {pointer} matched nothing"),
        })?,
    };
    match options.jq_expr.as_deref() {
        None => Ok(vec![value]),
        Some(filter) => crate::jq_exec::select_units(filter, &value).map_err(|e| Error::Select {
            origin: path.to_path_buf(),
            message: format!("{e:#}"),
        }),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// PROCESSING
// ————————————————————————————————————————————————————————————————————————————

/// Decode, normalize and rewrite a single unit.
pub fn process_document(doc: &SourceDocument) -> Result<Rewrite, Error> {
    let source: SourceUnit =
        path_de::from_value_with_path(doc.value.clone()).map_err(|msg| Error::decode(&doc.origin, msg))?;
    let unit = norm::normalize_unit(source, &doc.origin).map_err(|source| Error::Normalize {
        path: doc.origin.clone(),
        source,
    })?;
    Ok(engine::rewrite_unit(&unit)?)
}

/// Under [`FailurePolicy::FailFast`] the rayon collect short-circuits: the
/// error of one failing unit (not necessarily the earliest in input order) is
/// returned and no outcome is. Otherwise every unit gets an outcome.
pub fn run_batch(docs: &[SourceDocument], policy: FailurePolicy) -> Result<Vec<FileOutcome>, Error> {
    match policy {
        FailurePolicy::Continue => Ok(docs
            .par_iter()
            .map(|doc| FileOutcome { origin: doc.origin.clone(), result: process_document(doc) })
            .collect()),
        FailurePolicy::FailFast => {
            let rewrites = docs.par_iter().map(process_document).collect::<Result<Vec<_>, _>>()?;
            Ok(docs
                .iter()
                .zip(rewrites)
                .map(|(doc, rewrite)| FileOutcome { origin: doc.origin.clone(), result: Ok(rewrite) })
                .collect())
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// OUTPUT
// ————————————————————————————————————————————————————————————————————————————

/// One rewritten unit per line, to `out` or stdout.
pub fn write_ndjson<'a>(units: impl IntoIterator<Item = &'a CompilationUnit>, out: Option<&Path>) -> Result<(), Error> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            let file = fs::File::create(path).map_err(|e| Error::io(path, e))?;
            write_lines(BufWriter::new(file), units).map_err(|e| Error::io(path, e))
        }
        None => write_lines(io::stdout().lock(), units).map_err(|e| Error::io("<stdout>", e)),
    }
}

fn write_lines<'a, W: Write>(mut w: W, units: impl IntoIterator<Item = &'a CompilationUnit>) -> io::Result<()> {
    for unit in units {
        serde_json::to_writer(&mut w, unit)?;
        w.write_all(b"\n")?;
    }
    w.flush()
}
