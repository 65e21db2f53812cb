//! The three render-cycle hooks for an upload element.
//!
//! `prepare` declares required names, `render` builds the widget view model
//! from prior state, and `parse` folds a fresh submission into the aggregate
//! `_files` list while recording format errors.

use crate::answer::AnswerIdentity;
use crate::context::{Panel, RequestContext, FILES_KEY, FILE_STORAGE_KEY};
use crate::element::ElementConfig;
use crate::errors::FormatError;
use crate::files::{collect_records, decode_payload, missing_names, retain_named, SubmittedFile};
use crate::util::json_text;
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Template fields for the upload widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub name: String,
    /// JSON array of the declared names.
    pub file_names: String,
    pub uuid: Uuid,
    pub has_files: bool,
    /// JSON array of prior files matching the declared names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<String>,
    /// JSON array of secondary-storage files matching the declared names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_files: Option<String>,
}

/// Record this element's names in the request-wide requirement list.
pub fn prepare(config: &ElementConfig, context: &mut RequestContext) -> Vec<String> {
    let names = config.file_names().to_vec();
    context
        .params
        .required_file_names
        .extend(names.iter().cloned());
    tracing::debug!(
        declared = names.len(),
        total = context.params.required_file_names.len(),
        "declared required file names"
    );
    names
}

/// Build the widget view model. Only the question panel shows the widget;
/// every other panel renders nothing.
///
/// `has_files` tracks whether an aggregate `_files` list exists at all, even
/// when none of its records belong to this element.
pub fn render(config: &ElementConfig, context: &RequestContext) -> Result<Option<ViewModel>> {
    if context.panel != Panel::Question {
        return Ok(None);
    }
    let file_names = config.file_names();
    let identity = config.answer_identity();
    let mut view = ViewModel {
        name: identity.to_string(),
        file_names: json_text(file_names)?,
        uuid: Uuid::new_v4(),
        has_files: false,
        files: None,
        s3_files: None,
    };

    let Some(prior) = prior_files(context) else {
        return Ok(Some(view));
    };
    let filtered = retain_named(prior, file_names);
    tracing::debug!(files = filtered.len(), "rendering prior files");
    view.has_files = true;
    view.files = Some(json_text(&filtered)?);

    if let Some(storage) = present(context.submitted_answers.get(FILE_STORAGE_KEY)) {
        let stored = retain_named(stored_files(storage, &identity), file_names);
        view.s3_files = Some(json_text(&stored)?);
    }
    Ok(Some(view))
}

/// Validate a fresh submission and merge it into the aggregate `_files` list.
///
/// The per-element payload is always removed from `submitted_answers`. Errors
/// are appended to the context and also returned.
pub fn parse(config: &ElementConfig, context: &mut RequestContext) -> Vec<FormatError> {
    let required = config.file_names();
    let identity = config.answer_identity();
    let raw = context.submitted_answers.remove(identity.as_str());
    let stored = present(context.submitted_answers.get(FILE_STORAGE_KEY))
        .map(|storage| stored_files(storage, &identity))
        .unwrap_or_default();

    let mut errors = Vec::new();
    let Some(raw) = raw.filter(|value| !value.is_null()) else {
        errors.push(FormatError::MissingSubmission);
        record(context, &errors);
        return errors;
    };

    let decoded = match decode_payload(&raw) {
        Ok(files) => files,
        Err(err) => {
            tracing::warn!(answer = %identity, error = %err, "could not decode submitted files");
            errors.push(FormatError::Unparseable);
            Vec::new()
        }
    };
    let accepted = retain_named(decoded, required);

    let merged: Vec<Value> = accepted
        .iter()
        .cloned()
        .map(SubmittedFile::into_value)
        .collect();
    let aggregate = context
        .submitted_answers
        .entry(FILES_KEY)
        .or_insert(Value::Null);
    if aggregate.is_null() {
        *aggregate = Value::Array(merged);
    } else if let Value::Array(existing) = aggregate {
        existing.extend(merged);
    } else {
        errors.push(FormatError::AggregateNotList);
    }

    let missing = missing_names(required, &[accepted.as_slice(), stored.as_slice()]);
    if !missing.is_empty() {
        errors.push(FormatError::MissingRequiredFiles(missing));
    }
    tracing::debug!(
        answer = %identity,
        accepted = accepted.len(),
        errors = errors.len(),
        "parsed file submission"
    );
    record(context, &errors);
    errors
}

fn record(context: &mut RequestContext, errors: &[FormatError]) {
    for error in errors {
        context.add_format_error(error);
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

fn prior_files(context: &RequestContext) -> Option<Vec<SubmittedFile>> {
    let value = present(context.submitted_answers.get(FILES_KEY))?;
    let files = collect_records(value);
    if files.is_none() {
        tracing::warn!(aggregate = %value, "ignoring _files aggregate that is not a list");
    }
    files
}

fn stored_files(storage: &Value, identity: &AnswerIdentity) -> Vec<SubmittedFile> {
    let Some(entry) = present(storage.get(identity.as_str())) else {
        return Vec::new();
    };
    collect_records(entry).unwrap_or_else(|| {
        tracing::warn!(answer = %identity, "ignoring stored files that are not a list");
        Vec::new()
    })
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
