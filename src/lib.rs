//! Required-file validation for a file upload answer element.
//!
//! An element declares the file names a learner must submit. The host drives
//! it through three hooks sharing one [`RequestContext`]: [`hooks::prepare`]
//! declares requirements, [`hooks::render`] builds the widget view model and
//! [`hooks::parse`] reconciles a submission against the declared names.

pub mod answer;
pub mod context;
pub mod element;
pub mod errors;
pub mod file_names;
pub mod files;
pub mod hooks;
mod util;

pub use answer::AnswerIdentity;
pub use context::{load_context, write_context, Panel, RequestContext};
pub use element::{ElementConfig, ElementError};
pub use errors::FormatError;
pub use file_names::{format_file_names, parse_file_names, FileNamesError};
pub use files::SubmittedFile;
pub use hooks::ViewModel;
