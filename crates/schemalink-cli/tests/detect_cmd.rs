//! Integration tests for the `detect` subcommand.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("schemalink").unwrap()
}

/// Token dump with one page containing a single reference.
fn dump_with_reference() -> tempfile::NamedTempFile {
    let dump = serde_json::json!([{
        "width": 1000.0,
        "height": 800.0,
        "text": "continues on sheet /12.3-A near the feeder",
        "tokens": [
            { "text": "continues", "bbox": { "x0": 10.0, "top": 100.0, "x1": 80.0, "bottom": 112.0 } },
            { "text": "/12.3-A", "bbox": { "x0": 200.0, "top": 100.0, "x1": 260.0, "bottom": 112.0 } }
        ]
    }]);
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(dump.to_string().as_bytes()).unwrap();
    tmp
}

#[test]
fn detect_text_format_lists_reference() {
    let dump = dump_with_reference();
    cmd()
        .args(["detect", dump.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("/12.3-A"))
        .stdout(predicate::str::contains("continues on sheet"));
}

#[test]
fn detect_json_format_decodes_tokens() {
    let dump = dump_with_reference();
    let output = cmd()
        .args(["detect", dump.path().to_str().unwrap(), "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let refs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let refs = refs.as_array().unwrap();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0]["target_page"], "12");
    assert_eq!(refs[0]["column"], "3");
    assert_eq!(refs[0]["row"], "A");
    assert_eq!(refs[0]["page"], 1);
    assert_eq!(refs[0]["instance"], 1);
}

#[test]
fn detect_csv_format_has_header() {
    let dump = dump_with_reference();
    cmd()
        .args(["detect", dump.path().to_str().unwrap(), "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "page,literal,target,column,row,instance,context",
        ));
}

#[test]
fn detect_with_custom_template() {
    let dump = serde_json::json!([{
        "width": 1000.0,
        "height": 800.0,
        "text": "goto REF-4.2.B end",
        "tokens": [
            { "text": "REF-4.2.B", "bbox": { "x0": 50.0, "top": 100.0, "x1": 140.0, "bottom": 112.0 } }
        ]
    }]);
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(dump.to_string().as_bytes()).unwrap();

    let output = cmd()
        .args([
            "detect",
            tmp.path().to_str().unwrap(),
            "--template",
            "REF-{P}.{C}.{F}",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let refs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(refs[0]["target_page"], "4");
    assert_eq!(refs[0]["row"], "B");
}

#[test]
fn detect_missing_dump_fails() {
    cmd()
        .args(["detect", "no-such-dump.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn detect_unknown_style_fails() {
    let dump = dump_with_reference();
    cmd()
        .args([
            "detect",
            dump.path().to_str().unwrap(),
            "--style",
            "no-such-style",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown style"));
}
