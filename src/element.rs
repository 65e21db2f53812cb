//! Typed attributes for one upload element.
//!
//! Attributes are checked against an explicit required/optional list before any
//! hook runs, so a misdeclared element fails the whole render or parse step
//! instead of producing a half-configured widget.
use crate::answer::AnswerIdentity;
use crate::file_names::{parse_file_names, FileNamesError};
use std::collections::BTreeMap;
use thiserror::Error;

pub const FILE_NAMES_ATTR: &str = "file-names";

const REQUIRED_ATTRIBS: &[&str] = &[FILE_NAMES_ATTR];
const OPTIONAL_ATTRIBS: &[&str] = &[];

#[derive(Debug, Error)]
pub enum ElementError {
    #[error("required attribute \"{0}\" missing")]
    MissingAttribute(String),
    #[error("unknown attribute \"{0}\"")]
    UnknownAttribute(String),
    #[error("attributes must be KEY=VALUE (got {0:?})")]
    MalformedAttribute(String),
    #[error("invalid \"file-names\" attribute: {0}")]
    FileNames(#[from] FileNamesError),
}

/// Validated element configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementConfig {
    raw_file_names: String,
    file_names: Vec<String>,
}

impl ElementConfig {
    pub fn from_attributes(attributes: &BTreeMap<String, String>) -> Result<Self, ElementError> {
        if let Some(unknown) = attributes.keys().find(|key| {
            !REQUIRED_ATTRIBS.contains(&key.as_str()) && !OPTIONAL_ATTRIBS.contains(&key.as_str())
        }) {
            return Err(ElementError::UnknownAttribute(unknown.clone()));
        }
        if let Some(missing) = REQUIRED_ATTRIBS
            .iter()
            .find(|key| !attributes.contains_key(**key))
        {
            return Err(ElementError::MissingAttribute((*missing).to_string()));
        }
        let raw_file_names = attributes
            .get(FILE_NAMES_ATTR)
            .cloned()
            .unwrap_or_default();
        Self::new(raw_file_names)
    }

    pub fn new(raw_file_names: impl Into<String>) -> Result<Self, ElementError> {
        let raw_file_names = raw_file_names.into();
        let file_names = parse_file_names(&raw_file_names)?;
        Ok(Self {
            raw_file_names,
            file_names,
        })
    }

    /// The attribute exactly as declared.
    pub fn raw_file_names(&self) -> &str {
        &self.raw_file_names
    }

    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }

    pub fn answer_identity(&self) -> AnswerIdentity {
        AnswerIdentity::from_spec(&self.raw_file_names)
    }
}

/// Split a `KEY=VALUE` attribute argument. Only the first `=` separates; the
/// value may itself contain `=`.
pub fn parse_attribute(raw: &str) -> Result<(String, String), ElementError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ElementError::MalformedAttribute(raw.to_string())),
    }
}

/// Collect `KEY=VALUE` arguments into an attribute map; later keys win.
pub fn parse_attributes<S: AsRef<str>>(
    raw: &[S],
) -> Result<BTreeMap<String, String>, ElementError> {
    let mut attributes = BTreeMap::new();
    for entry in raw {
        let (key, value) = parse_attribute(entry.as_ref())?;
        attributes.insert(key, value);
    }
    Ok(attributes)
}

#[cfg(test)]
#[path = "element_tests.rs"]
mod tests;
