//! End-to-end tests of the `lintfix` binary.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn lintfix() -> Command {
    Command::cargo_bin("lintfix").expect("lintfix binary")
}

const REPORT: &str = r#"{
  "files": {
    "src/App.groovy": {
      "violations": [
        { "id": 1, "rule": "UnnecessarySemicolon", "line": 1, "message": "Semicolons as line endings can be removed safely", "severity": "warning" },
        { "id": 2, "rule": "TrailingWhitespace", "line": 2, "message": "Line ends with whitespace characters", "severity": "info" },
        { "id": 3, "rule": "NotFixable", "line": 3, "message": "no remedy", "severity": "error" }
      ]
    }
  }
}"#;

const SOURCE: &str = "def a = 1;\nprintln a   \nassert a\n";

fn create_temp_project() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let root = td.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/App.groovy"), SOURCE).unwrap();
    fs::write(root.join("report.json"), REPORT).unwrap();
    td
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn fix_without_save_attaches_updated_source() {
    let temp = create_temp_project();

    lintfix()
        .current_dir(temp.path())
        .args(["fix", "--report", "report.json", "--out", "fixed.json"])
        .assert()
        .success();

    let out = read_json(&temp.path().join("fixed.json"));
    let file = &out["files"]["src/App.groovy"];
    assert_eq!(file["updated_source"], "def a = 1\nprintln a\nassert a\n");
    assert_eq!(file["violations"][0]["fixed"], true);
    assert_eq!(file["violations"][1]["fixed"], true);
    assert_eq!(file["violations"][2]["fixed"], false);
    assert_eq!(out["summary"]["remaining"]["error"], 1);
    assert_eq!(out["summary"]["fixed"]["warning"], 1);

    // Source untouched.
    assert_eq!(
        fs::read_to_string(temp.path().join("src/App.groovy")).unwrap(),
        SOURCE
    );
}

#[test]
fn fix_with_save_rewrites_sources() {
    let temp = create_temp_project();

    lintfix()
        .current_dir(temp.path())
        .args(["fix", "--report", "report.json", "--save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fixed 2 of 3 violation(s)"))
        .stdout(predicate::str::contains("1 saved"));

    assert_eq!(
        fs::read_to_string(temp.path().join("src/App.groovy")).unwrap(),
        "def a = 1\nprintln a\nassert a\n"
    );
}

#[test]
fn fixrules_flag_limits_rules() {
    let temp = create_temp_project();

    lintfix()
        .current_dir(temp.path())
        .args([
            "fix",
            "--report",
            "report.json",
            "--fixrules",
            "TrailingWhitespace",
            "--out",
            "fixed.json",
        ])
        .assert()
        .success();

    let out = read_json(&temp.path().join("fixed.json"));
    let file = &out["files"]["src/App.groovy"];
    assert_eq!(file["updated_source"], "def a = 1;\nprintln a\nassert a\n");
    assert_eq!(file["violations"][0]["fixed"], false);
}

#[test]
fn config_file_enables_save() {
    let temp = create_temp_project();
    fs::write(temp.path().join("lintfix.toml"), "[fix]\nsave = true\n").unwrap();

    lintfix()
        .current_dir(temp.path())
        .args(["fix", "--report", "report.json"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("src/App.groovy")).unwrap(),
        "def a = 1\nprintln a\nassert a\n"
    );
}

#[test]
fn ids_flag_limits_violations() {
    let temp = create_temp_project();

    lintfix()
        .current_dir(temp.path())
        .args(["fix", "--report", "report.json", "--ids", "2", "--out", "fixed.json"])
        .assert()
        .success();

    let out = read_json(&temp.path().join("fixed.json"));
    assert_eq!(
        out["files"]["src/App.groovy"]["updated_source"],
        "def a = 1;\nprintln a\nassert a\n"
    );
}

#[test]
fn diff_flag_prints_patch() {
    let temp = create_temp_project();

    lintfix()
        .current_dir(temp.path())
        .args(["fix", "--report", "report.json", "--diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "diff --git a/src/App.groovy b/src/App.groovy",
        ))
        .stdout(predicate::str::contains("-def a = 1;\n+def a = 1\n"));
}

#[test]
fn custom_catalog_replaces_builtin_rules() {
    let temp = create_temp_project();
    fs::write(
        temp.path().join("rules.toml"),
        r#"
[rules.NotFixable]
priority = 1
fix = { type = "replace", before = "assert a", after = "assert a != null" }
"#,
    )
    .unwrap();

    lintfix()
        .current_dir(temp.path())
        .args([
            "fix",
            "--report",
            "report.json",
            "--catalog",
            "rules.toml",
            "--out",
            "fixed.json",
        ])
        .assert()
        .success();

    let out = read_json(&temp.path().join("fixed.json"));
    let file = &out["files"]["src/App.groovy"];
    assert_eq!(
        file["updated_source"],
        "def a = 1;\nprintln a   \nassert a != null\n"
    );
    assert_eq!(out["summary"]["fixed"]["error"], 1);
}

#[test]
fn missing_source_fails_with_nonzero_exit() {
    let temp = create_temp_project();
    fs::remove_file(temp.path().join("src/App.groovy")).unwrap();

    lintfix()
        .current_dir(temp.path())
        .args(["fix", "--report", "report.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not be fixed"));
}

#[test]
fn missing_report_is_an_error() {
    let temp = tempfile::tempdir().unwrap();

    lintfix()
        .current_dir(temp.path())
        .args(["fix", "--report", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn list_rules_text_and_json() {
    lintfix()
        .args(["list-rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TrailingWhitespace"))
        .stdout(predicate::str::contains("NoTabCharacter"));

    let output = lintfix()
        .args(["list-rules", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rules.as_array().unwrap().len(), 6);
}

#[test]
fn explain_known_and_unknown_rules() {
    lintfix()
        .args(["explain", "UnnecessarySemicolon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RULE: UnnecessarySemicolon"))
        .stdout(predicate::str::contains("TrailingWhitespace"));

    lintfix()
        .args(["explain", "NoSuchRule"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown rule: 'NoSuchRule'"));
}
