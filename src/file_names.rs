//! Parsing for the `file-names` attribute.
//!
//! The attribute is a single comma-separated row. A backslash escapes the next
//! character (commas, backslashes, whitespace, line breaks); there is no
//! quoting, so quote characters are ordinary text. Unescaped whitespace around
//! each name is dropped.

use thiserror::Error;

/// Malformed `file-names` attribute values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileNamesError {
    #[error("file-names ends with an unfinished escape sequence")]
    DanglingEscape,
    #[error("file-names must be a single row (found content after a line break)")]
    MultipleRows,
    #[error("file-names entry {position} is empty")]
    EmptyName { position: usize },
}

#[derive(Default)]
struct Field {
    chars: Vec<(char, bool)>,
}

impl Field {
    fn push(&mut self, ch: char, escaped: bool) {
        self.chars.push((ch, escaped));
    }

    fn is_blank(&self) -> bool {
        self.chars
            .iter()
            .all(|(ch, escaped)| !escaped && ch.is_whitespace())
    }

    fn finish(&mut self, position: usize) -> Result<String, FileNamesError> {
        let chars = std::mem::take(&mut self.chars);
        let strippable = |&(ch, escaped): &(char, bool)| !escaped && ch.is_whitespace();
        let start = chars
            .iter()
            .position(|c| !strippable(c))
            .unwrap_or(chars.len());
        let end = chars
            .iter()
            .rposition(|c| !strippable(c))
            .map_or(start, |idx| idx + 1);
        let name: String = chars[start..end].iter().map(|(ch, _)| *ch).collect();
        if name.is_empty() {
            return Err(FileNamesError::EmptyName { position });
        }
        Ok(name)
    }
}

/// Parse a `file-names` attribute into its ordered list of names.
///
/// Empty (or whitespace-only) input yields no names. A single trailing line
/// terminator is tolerated; anything after it is rejected rather than
/// silently ignored. Empty entries, including the one a trailing comma
/// produces (`"a.txt,"`), are rejected too: no uploaded file can match an
/// empty name, so such a requirement could never be satisfied.
pub fn parse_file_names(raw: &str) -> Result<Vec<String>, FileNamesError> {
    let mut names = Vec::new();
    let mut field = Field::default();
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(escaped) => field.push(escaped, true),
                None => return Err(FileNamesError::DanglingEscape),
            },
            ',' => names.push(field.finish(names.len() + 1)?),
            '\r' | '\n' => {
                if chars.any(|rest| !rest.is_whitespace()) {
                    return Err(FileNamesError::MultipleRows);
                }
                break;
            }
            _ => field.push(ch, false),
        }
    }
    if names.is_empty() && field.is_blank() {
        return Ok(Vec::new());
    }
    names.push(field.finish(names.len() + 1)?);
    Ok(names)
}

/// Format names back into a `file-names` attribute value.
///
/// `parse_file_names(&format_file_names(names))` returns `names` for any list
/// of non-empty names.
pub fn format_file_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| escape_name(name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_name(name: &str) -> String {
    let last = name.chars().count().saturating_sub(1);
    let mut escaped = String::with_capacity(name.len());
    for (idx, ch) in name.chars().enumerate() {
        let boundary_space = ch.is_whitespace() && (idx == 0 || idx == last);
        if matches!(ch, ',' | '\\' | '\n' | '\r') || boundary_space {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
#[path = "file_names_tests.rs"]
mod tests;
