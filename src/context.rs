//! Per-request state shared by every upload element on a page.
//!
//! The host hands the same context to each element in turn. Hooks mutate it in
//! place: `prepare` grows the required-name list, `parse` moves per-element
//! payloads into the aggregate `_files` list and appends format errors.
use crate::errors::FormatError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Aggregate list of every upload element's files in `submitted_answers`,
/// and the `format_errors` key upload errors are recorded under.
pub const FILES_KEY: &str = "_files";
/// Secondary storage map (answer identity -> file list) in `submitted_answers`.
pub const FILE_STORAGE_KEY: &str = "_file_storage_s3";

/// Which rendering phase the host is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    #[default]
    Question,
    Submission,
    Answer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Names declared by every upload element prepared so far.
    #[serde(
        rename = "_required_file_names",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub required_file_names: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub panel: Panel,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub submitted_answers: Map<String, Value>,
    #[serde(default)]
    pub format_errors: Map<String, Value>,
}

impl RequestContext {
    pub fn new(panel: Panel) -> Self {
        Self {
            panel,
            ..Self::default()
        }
    }

    /// Append a user-visible error under `format_errors._files`.
    pub fn add_format_error(&mut self, error: &FormatError) {
        let entry = self
            .format_errors
            .entry(FILES_KEY)
            .or_insert_with(|| Value::Array(Vec::new()));
        if !entry.is_array() {
            tracing::warn!(
                existing = %entry,
                "format_errors._files was not a list; replacing it"
            );
            *entry = Value::Array(Vec::new());
        }
        if let Value::Array(errors) = entry {
            errors.push(Value::String(error.to_string()));
        }
    }

    /// Error strings recorded under `format_errors._files`, in order.
    pub fn file_errors(&self) -> Vec<String> {
        self.format_errors
            .get(FILES_KEY)
            .and_then(Value::as_array)
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Load request state from a JSON file.
pub fn load_context(path: &Path) -> Result<RequestContext> {
    let bytes = fs::read(path).with_context(|| format!("read state {}", path.display()))?;
    let context: RequestContext = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse state JSON {}", path.display()))?;
    Ok(context)
}

/// Persist request state, replacing `path` atomically.
pub fn write_context(path: &Path, context: &RequestContext) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    let text = serde_json::to_string_pretty(context).context("serialize state")?;
    let mut staged = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("stage state in {}", parent.display()))?;
    staged
        .write_all(text.as_bytes())
        .context("write staged state")?;
    staged
        .persist(path)
        .map_err(|err| anyhow!("replace {}: {}", path.display(), err.error))?;
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
