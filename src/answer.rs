//! Answer identities for upload elements.
//!
//! Each element is keyed by a digest of its raw `file-names` attribute, so two
//! elements declaring byte-identical names share one answer slot.

use crate::util::sha256_hex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ANSWER_NAME_PREFIX: &str = "_file_upload_";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerIdentity(String);

impl AnswerIdentity {
    /// Derive the identity from the attribute exactly as written (no trimming
    /// or parsing).
    ///
    /// The digest is SHA-256. Identities produced with the older SHA-1 keying
    /// (same prefix, 40 hex digits) do not match these 64-digit ones, so
    /// answers stored under SHA-1 keys are not found by this element.
    pub fn from_spec(raw_file_names: &str) -> Self {
        Self(format!(
            "{ANSWER_NAME_PREFIX}{}",
            sha256_hex(raw_file_names.as_bytes())
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnswerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
