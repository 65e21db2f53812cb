//! Submitted file records and the list operations the hooks share.
//!
//! Records are kept as the JSON objects the host stored. Only `name` is ever
//! read; everything else (including `contents`) passes through byte-for-byte.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// One uploaded file record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmittedFile(Map<String, Value>);

impl SubmittedFile {
    pub fn named(name: impl Into<String>) -> Self {
        let mut record = Map::new();
        record.insert("name".to_string(), Value::String(name.into()));
        Self(record)
    }

    /// The record's `name`; missing or non-string names read as empty.
    pub fn name(&self) -> &str {
        self.0.get("name").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Decode a raw per-element payload.
///
/// Hosts normally submit the list as JSON text; an already-decoded array is
/// accepted as well. Anything that is not an array of objects is a decode
/// failure.
pub fn decode_payload(raw: &Value) -> Result<Vec<SubmittedFile>, serde_json::Error> {
    match raw {
        Value::String(text) => serde_json::from_str(text),
        other => Vec::<SubmittedFile>::deserialize(other),
    }
}

/// Read a stored file list, skipping entries that are not objects.
///
/// Returns `None` when `value` is not an array at all.
pub fn collect_records(value: &Value) -> Option<Vec<SubmittedFile>> {
    let entries = value.as_array()?;
    let records: Vec<SubmittedFile> = entries
        .iter()
        .filter_map(|entry| entry.as_object().cloned().map(SubmittedFile))
        .collect();
    if records.len() != entries.len() {
        tracing::warn!(
            skipped = entries.len() - records.len(),
            "skipping stored file entries that are not objects"
        );
    }
    Some(records)
}

/// Keep only files whose name is one of `names`, preserving submission order.
pub fn retain_named<S: AsRef<str>>(files: Vec<SubmittedFile>, names: &[S]) -> Vec<SubmittedFile> {
    let allowed: HashSet<&str> = names.iter().map(S::as_ref).collect();
    files
        .into_iter()
        .filter(|file| allowed.contains(file.name()))
        .collect()
}

/// Required names not covered by any of `sources`, in declaration order.
pub fn missing_names<S: AsRef<str>>(required: &[S], sources: &[&[SubmittedFile]]) -> Vec<String> {
    let present: HashSet<&str> = sources
        .iter()
        .flat_map(|files| files.iter().map(SubmittedFile::name))
        .collect();
    required
        .iter()
        .map(S::as_ref)
        .filter(|name| !present.contains(name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_payload_reads_json_text_and_keeps_every_field() {
        let raw = json!(r#"[{"name":"a.txt","contents":"aGk=","mimetype":"text/plain"}]"#);
        let files = decode_payload(&raw).expect("decode payload");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name(), "a.txt");
        assert_eq!(files[0].get("contents"), Some(&json!("aGk=")));

        let round = serde_json::to_value(&files[0]).expect("serialize file");
        assert_eq!(
            round,
            json!({"name": "a.txt", "contents": "aGk=", "mimetype": "text/plain"})
        );
    }

    #[test]
    fn decode_payload_keeps_null_and_structured_contents() {
        let raw = json!([
            {"name": "a.txt", "contents": null, "size": 0},
            {"name": "b.bin", "contents": {"key": "x"}}
        ]);
        let files = decode_payload(&raw).expect("decode payload");
        let values: Vec<Value> = files.into_iter().map(SubmittedFile::into_value).collect();
        assert_eq!(Value::Array(values), raw);
    }

    #[test]
    fn decode_payload_accepts_odd_names_but_rejects_non_object_entries() {
        let files = decode_payload(&json!([{"name": "a.txt"}, {"name": 7}])).expect("decode");
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].name(), "");

        assert!(decode_payload(&json!("not json")).is_err());
        assert!(decode_payload(&json!({"name": "a.txt"})).is_err());
        assert!(decode_payload(&json!(["a.txt"])).is_err());
    }

    #[test]
    fn collect_records_skips_non_objects_and_rejects_non_arrays() {
        let files = collect_records(&json!([{"name": "a.txt"}, "junk", 3])).expect("array");
        assert_eq!(files, vec![SubmittedFile::named("a.txt")]);
        assert!(collect_records(&json!({"name": "a.txt"})).is_none());
    }

    #[test]
    fn records_without_a_string_name_never_match() {
        let files = collect_records(&json!([{"contents": "eA=="}, {"name": null}])).expect("list");
        assert_eq!(files[0].name(), "");
        assert!(retain_named(files, &["a.txt"]).is_empty());
    }

    #[test]
    fn retain_named_filters_by_required_names() {
        let files = vec![SubmittedFile::named("a.txt"), SubmittedFile::named("c.txt")];
        let kept = retain_named(files, &["a.txt", "b.txt"]);
        assert_eq!(kept, vec![SubmittedFile::named("a.txt")]);
    }

    #[test]
    fn missing_names_checks_every_source() {
        let primary = vec![SubmittedFile::named("a.txt")];
        let secondary = vec![SubmittedFile::named("c.txt")];
        let missing = missing_names(
            &["a.txt", "b.txt", "c.txt", "d.txt"],
            &[primary.as_slice(), secondary.as_slice()],
        );
        assert_eq!(missing, vec!["b.txt", "d.txt"]);
    }
}
