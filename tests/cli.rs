#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn qattr_cmd(temp: &Path) -> Command {
    let mut cmd = Command::cargo_bin("qattr").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("QATTR_FALLBACK_THEME")
        .env_remove("QATTR_PLUGIN_CATEGORY")
        .arg("--config")
        .arg(temp.join("qattr.toml"));
    cmd
}

fn write_bundle(temp: &TempDir) -> PathBuf {
    let bundle = json!({
        "question_types": {
            "T": {
                "question_template": {"inputtype": "question_template", "category": "General", "default": "core"},
                "prefix": {"inputtype": "text", "category": "Display", "i18n": true, "default": ""},
                "maximum_chars": {"inputtype": "integer", "category": "Input", "default": ""}
            }
        },
        "themes": {
            "core": {"T": {}},
            "stars": {"T": {"star_count": {"inputtype": "integer", "category": "Display", "default": 5}}}
        },
        "plugins": [
            {"name": "score", "types": "LT", "inputtype": "integer", "default": 1},
            {"name": "mood", "types": "M", "inputtype": "text"}
        ],
        "values": {
            "1": {"prefix": {"en": "Q:"}}
        },
        "surveys": {"10": ["en", "fr"]},
        "questions": [
            {"id": 1, "type": "T", "survey_id": 10},
            {"id": 2, "type": "T"}
        ]
    });
    let path = temp.path().join("bundle.json");
    fs::write(&path, bundle.to_string()).unwrap();
    path
}

#[test]
fn resolve_prints_json_map() {
    let temp = TempDir::new().unwrap();
    let bundle = write_bundle(&temp);

    let output = qattr_cmd(temp.path())
        .args(["resolve", bundle.to_str().unwrap(), "--question", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let resolved: Value = serde_json::from_slice(&output.stdout).unwrap();
    let keys: Vec<&str> = resolved
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["question_template", "prefix", "maximum_chars", "score"]);
    assert_eq!(resolved["prefix"]["en"]["value"], json!("Q:"));
    assert_eq!(resolved["prefix"]["fr"]["value"], json!(""));
    assert_eq!(resolved["score"]["category"], json!("Plugin"));
}

#[test]
fn resolve_with_theme_override_and_locale() {
    let temp = TempDir::new().unwrap();
    let bundle = write_bundle(&temp);

    let output = qattr_cmd(temp.path())
        .args([
            "resolve",
            bundle.to_str().unwrap(),
            "--question",
            "1",
            "--theme",
            "stars",
            "--locale",
            "fr",
            "--advanced",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let resolved: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(resolved["star_count"]["value"], json!(5));
    assert!(resolved.get("question_template").is_none());
    assert!(resolved["prefix"].get("en").is_none());
    assert_eq!(resolved["prefix"]["fr"]["value"], json!(""));
}

#[test]
fn resolve_grouped_lists_categories() {
    let temp = TempDir::new().unwrap();
    let bundle = write_bundle(&temp);

    qattr_cmd(temp.path())
        .env("NO_COLOR", "1")
        .args(["resolve", bundle.to_str().unwrap(), "-q", "1", "--grouped"])
        .assert()
        .success()
        .stdout(predicate::str::contains("General"))
        .stdout(predicate::str::contains("Display"))
        .stdout(predicate::str::contains("en: Q:"))
        .stdout(predicate::str::contains("Plugin"));
}

#[test]
fn orphan_question_exits_with_error() {
    let temp = TempDir::new().unwrap();
    let bundle = write_bundle(&temp);

    qattr_cmd(temp.path())
        .args(["resolve", bundle.to_str().unwrap(), "--question", "2"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Question 2 has no survey"));
}

#[test]
fn unknown_question_exits_with_error() {
    let temp = TempDir::new().unwrap();
    let bundle = write_bundle(&temp);

    qattr_cmd(temp.path())
        .args(["resolve", bundle.to_str().unwrap(), "--question", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Question 99 not found"));
}

#[test]
fn config_file_changes_fallback_theme() {
    let temp = TempDir::new().unwrap();
    let bundle = write_bundle(&temp);
    fs::write(temp.path().join("qattr.toml"), "fallback_theme = \"stars\"\n").unwrap();

    let output = qattr_cmd(temp.path())
        .args(["resolve", bundle.to_str().unwrap(), "--question", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let resolved: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(resolved["star_count"]["value"], json!(5));
}

#[test]
fn plugins_lists_applicable_attributes() {
    let temp = TempDir::new().unwrap();
    let bundle = write_bundle(&temp);

    let output = qattr_cmd(temp.path())
        .args(["plugins", bundle.to_str().unwrap(), "--type", "T"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plugins: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(plugins.get("score").is_some());
    assert!(plugins.get("mood").is_none());
    assert_eq!(plugins["score"]["category"], json!("Plugin"));
}

#[test]
fn sanitize_prints_canonical_set() {
    let temp = TempDir::new().unwrap();
    let raw = temp.path().join("raw.json");
    fs::write(
        &raw,
        json!({
            "cssclass": {"inputtype": "text", "help": []},
            "0": {"inputtype": "text"}
        })
        .to_string(),
    )
    .unwrap();

    let output = qattr_cmd(temp.path())
        .args(["sanitize", raw.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let sanitized: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(sanitized.as_object().unwrap().len(), 1);
    assert_eq!(sanitized["cssclass"]["name"], json!("cssclass"));
    assert_eq!(sanitized["cssclass"]["help"], Value::Null);
}

#[test]
fn missing_bundle_reports_io_error() {
    let temp = TempDir::new().unwrap();

    qattr_cmd(temp.path())
        .args(["plugins", temp.path().join("nope.json").to_str().unwrap(), "--type", "T"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: IO error"));
}
