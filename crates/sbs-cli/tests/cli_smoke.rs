//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `sbs` binary end-to-end: argument
//! parsing, input validation, and the written selection output.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("sbs").unwrap()
}

/// Column `a` separates the two classes; `b` and `c` repeat per class pair.
fn write_classification_csv(dir: &Path) -> PathBuf {
    let mut content = String::from("a,b,c,label\n");
    for i in 0..12 {
        let class = i % 2;
        let a = class as f64 * 10.0 + (i % 3) as f64 * 0.1;
        let b = (i / 2) % 3;
        let c = ((i / 2) % 2) * 2;
        content.push_str(&format!("{},{},{},{}\n", a, b, c, class));
    }
    let path = dir.join("data.csv");
    std::fs::write(&path, content).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("select"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sbs"));
}

// ---------------------------------------------------------------------------
// select subcommand
// ---------------------------------------------------------------------------

#[test]
fn select_no_data_errors() {
    cmd().arg("select").assert().failure();
}

#[test]
fn select_nonexistent_data_errors() {
    cmd()
        .args(["select", "/nonexistent/data.csv"])
        .assert()
        .failure();
}

#[test]
fn select_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();
    cmd()
        .arg("select")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(".tsv or .csv"));
}

#[test]
fn select_unknown_model_errors() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_classification_csv(dir.path());
    cmd()
        .arg("select")
        .arg(&data)
        .args(["--model", "random-forest"])
        .assert()
        .failure();
}

#[test]
fn select_prints_json_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_classification_csv(dir.path());
    cmd()
        .arg("select")
        .arg(&data)
        .args(["--folds", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"featureSize\": 3"))
        .stdout(predicate::str::contains("\"featureNames\""))
        .stderr(predicate::str::contains("No config provided"));
}

#[test]
fn select_writes_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_classification_csv(dir.path());
    let out = dir.path().join("result.json");
    cmd()
        .arg("select")
        .arg(&data)
        .args(["--folds", "3", "--parallel", "-o"])
        .arg(&out)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let levels = json.as_array().unwrap();
    assert_eq!(levels.len(), 3);
    assert_eq!(levels[2]["featureSize"], 1);
    assert_eq!(levels[2]["featureNames"], serde_json::json!(["a"]));
}

#[test]
fn select_writes_csv_file_with_config() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_classification_csv(dir.path());
    let config = dir.path().join("config.json");
    std::fs::write(
        &config,
        r#"{"selector": {"reduced_feature_size": 2, "scoring": "direct"}}"#,
    )
    .unwrap();
    let out = dir.path().join("result.csv");

    cmd()
        .arg("select")
        .arg(&data)
        .arg(&config)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "feature_size,score,features,feature_names");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("3,"));
    assert!(lines[2].starts_with("2,"));
}

#[test]
fn select_invalid_reduced_size_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_classification_csv(dir.path());
    cmd()
        .arg("select")
        .arg(&data)
        .args(["--reduced-size", "0", "--direct"])
        .env("SBS_LOG", "error")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Selection failed"));
}

#[test]
fn select_unknown_target_column_errors() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_classification_csv(dir.path());
    cmd()
        .arg("select")
        .arg(&data)
        .args(["--target", "missing"])
        .assert()
        .failure();
}
