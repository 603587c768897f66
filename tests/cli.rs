//! End-to-end CLI tests driving the `pagenum-infer` binary (§6.1).

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn ocr_doc(numbers: &[&str]) -> String {
    let pages: Vec<String> = numbers
        .iter()
        .map(|n| {
            if n.is_empty() {
                r#"{"width": 200.0, "height": 300.0, "words": []}"#.to_string()
            } else {
                format!(
                    r#"{{"width": 200.0, "height": 300.0, "words": [{{"text": "{n}", "bbox": [10.0, 280.0, 30.0, 295.0], "fontsize": 9.0, "confidence": 92}}]}}"#
                )
            }
        })
        .collect();
    format!(r#"{{"pages": [{}]}}"#, pages.join(","))
}

#[test]
fn test_cli_writes_output_json_and_prints_summary() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("in.json");
    let outfile = dir.path().join("out.json");
    fs::write(&infile, ocr_doc(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"])).unwrap();

    Command::cargo_bin("pagenum-infer")
        .unwrap()
        .arg(&infile)
        .arg(&outfile)
        .arg("--no-two-pass")
        .assert()
        .success()
        .stdout(predicate::str::contains("confidence="));

    let written = fs::read_to_string(&outfile).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(doc["format-version"], "2");
    assert_eq!(doc["pages"].as_array().unwrap().len(), 10);
    assert_eq!(doc["pages"][0]["pageNumber"], "1");
}

#[test]
fn test_cli_identifier_override() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("in.json");
    let outfile = dir.path().join("out.json");
    fs::write(&infile, ocr_doc(&["1", "2"])).unwrap();

    Command::cargo_bin("pagenum-infer")
        .unwrap()
        .arg(&infile)
        .arg(&outfile)
        .arg("--identifier")
        .arg("book42")
        .assert()
        .success();

    let written = fs::read_to_string(&outfile).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(doc["identifier"], "book42");
}

#[test]
fn test_cli_missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("does-not-exist.json");
    let outfile = dir.path().join("out.json");

    Command::cargo_bin("pagenum-infer").unwrap().arg(&infile).arg(&outfile).assert().failure();
}

#[test]
fn test_cli_config_file_sets_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let infile = dir.path().join("in.json");
    let outfile = dir.path().join("out.json");
    let config = dir.path().join("config.toml");
    fs::write(&infile, ocr_doc(&["1", "2", "3"])).unwrap();
    fs::write(&config, "two_pass = false\nidentifier = \"from-config\"\n").unwrap();

    Command::cargo_bin("pagenum-infer").unwrap().arg(&infile).arg(&outfile).arg("--config").arg(&config).assert().success();

    let written = fs::read_to_string(&outfile).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(doc["identifier"], "from-config");
}
