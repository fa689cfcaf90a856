//! Catalog file loading tests.

use camino::Utf8PathBuf;
use lintfix_catalog::{Catalog, FixScope, RuleCatalog, load_catalog};
use std::fs;
use tempfile::TempDir;

fn write_catalog(temp: &TempDir, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(temp.path().join("catalog.toml")).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loaded_catalog_replaces_builtin_rules() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_catalog(
        &temp,
        r#"
[rules.OnlyRule]
scope = "file"
unitary = true
priority = 2
fix = { type = "transform", name = "ensure_final_newline" }
description = "custom"
"#,
    );

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.descriptor("TrailingWhitespace").is_none());

    let d = catalog.descriptor("OnlyRule").unwrap();
    assert_eq!(d.scope, FixScope::File);
    assert!(d.unitary);
    assert_eq!(d.description.as_deref(), Some("custom"));
}

#[test]
fn missing_file_reports_path() {
    let temp = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(temp.path().join("absent.toml")).unwrap();
    let err = load_catalog(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn invalid_toml_is_an_error() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_catalog(&temp, "[rules.X\nfix = 1");
    assert!(load_catalog(&path).is_err());
}

#[test]
fn builtin_catalog_declares_semicolon_trigger() {
    let catalog = Catalog::builtin();
    let semi = catalog.descriptor("UnnecessarySemicolon").unwrap();
    assert_eq!(semi.triggers, vec!["TrailingWhitespace".to_string()]);
    assert!(catalog.descriptor("TrailingWhitespace").is_some());
}
