//! User-visible format errors recorded against a submission.
//!
//! These never abort a hook; they are appended to the request's
//! `format_errors._files` list so the learner sees them next to the widget.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("No submitted answer for file upload.")]
    MissingSubmission,
    #[error("Could not parse submitted files.")]
    Unparseable,
    #[error("_files was present but was not an array.")]
    AggregateNotList,
    #[error("The following required files were missing: {}", .0.join(", "))]
    MissingRequiredFiles(Vec<String>),
}
