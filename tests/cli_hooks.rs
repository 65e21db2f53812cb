//! End-to-end runs of `fue` against request state files.
//!
//! Each test stages a state file in a temp dir, runs one hook through the
//! binary, and checks both stdout and the rewritten state.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const FILE_NAMES: &str = "file-names=a.txt, b.txt";

fn fue(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fue"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run fue")
}

fn write_state(dir: &Path, state: &Value) -> PathBuf {
    let path = dir.join("state.json");
    let text = serde_json::to_string_pretty(state).expect("serialize state");
    std::fs::write(&path, text).expect("write state");
    path
}

fn read_state(path: &Path) -> Value {
    let bytes = std::fs::read(path).expect("read state");
    serde_json::from_slice(&bytes).expect("parse state")
}

fn identity() -> String {
    let output = fue(&["identity", "--attr", FILE_NAMES]);
    assert!(output.status.success(), "identity failed: {output:?}");
    String::from_utf8(output.stdout)
        .expect("utf8 stdout")
        .trim()
        .to_string()
}

#[test]
fn identity_is_stable_and_prefixed() {
    let first = identity();
    let second = identity();
    assert_eq!(first, second);
    assert!(first.starts_with("_file_upload_"));
    assert_eq!(first.len(), "_file_upload_".len() + 64);
}

#[test]
fn prepare_writes_required_names_into_state() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let state = write_state(temp_dir.path(), &json!({"params": {"seed": 1}}));

    let output = fue(&[
        "prepare",
        "--attr",
        FILE_NAMES,
        "--state",
        state.to_str().expect("utf8 path"),
        "--json",
    ]);
    assert!(output.status.success(), "prepare failed: {output:?}");
    let report: Value = serde_json::from_slice(&output.stdout).expect("prepare report");
    assert_eq!(report["declared"], json!(["a.txt", "b.txt"]));

    let updated = read_state(&state);
    assert_eq!(
        updated["params"],
        json!({"_required_file_names": ["a.txt", "b.txt"], "seed": 1})
    );
}

#[test]
fn render_prints_view_model_only_for_question_panel() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let state = write_state(
        temp_dir.path(),
        &json!({"submitted_answers": {"_files": [{"name": "a.txt"}, {"name": "c.txt"}]}}),
    );
    let state_arg = state.to_str().expect("utf8 path");

    let output = fue(&["render", "--attr", FILE_NAMES, "--state", state_arg]);
    assert!(output.status.success(), "render failed: {output:?}");
    let view: Value = serde_json::from_slice(&output.stdout).expect("view model");
    assert_eq!(view["name"], json!(identity()));
    assert_eq!(view["has_files"], json!(true));
    assert_eq!(view["files"], json!(r#"[{"name":"a.txt"}]"#));
    assert_eq!(view["file_names"], json!(r#"["a.txt","b.txt"]"#));

    let output = fue(&[
        "render", "--attr", FILE_NAMES, "--state", state_arg, "--panel", "answer",
    ]);
    assert!(output.status.success(), "render failed: {output:?}");
    assert!(output.stdout.is_empty());
}

#[test]
fn parse_records_missing_files_and_writes_output_state() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let answer = identity();
    let state = write_state(
        temp_dir.path(),
        &json!({"submitted_answers": {answer.clone(): r#"[{"name":"a.txt","contents":"YQ=="}]"#}}),
    );
    let out = temp_dir.path().join("parsed.json");

    let output = fue(&[
        "parse",
        "--attr",
        FILE_NAMES,
        "--state",
        state.to_str().expect("utf8 path"),
        "--out",
        out.to_str().expect("utf8 path"),
        "--json",
    ]);
    assert!(output.status.success(), "parse failed: {output:?}");
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse report");
    assert_eq!(
        report["errors"],
        json!(["The following required files were missing: b.txt"])
    );

    let parsed = read_state(&out);
    assert!(parsed["submitted_answers"].get(&answer).is_none());
    assert_eq!(
        parsed["submitted_answers"]["_files"],
        json!([{"name": "a.txt", "contents": "YQ=="}])
    );
    assert_eq!(
        parsed["format_errors"]["_files"],
        json!(["The following required files were missing: b.txt"])
    );
    // --out leaves the input state untouched
    let original = read_state(&state);
    assert!(original["submitted_answers"].get(&answer).is_some());
}

#[test]
fn missing_file_names_attribute_fails_the_command() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let state = write_state(temp_dir.path(), &json!({}));
    let output = fue(&[
        "parse",
        "--attr",
        "max-files=2",
        "--state",
        state.to_str().expect("utf8 path"),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max-files"), "stderr: {stderr}");
}
