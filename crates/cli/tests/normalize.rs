// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI tests for `bp normalize`

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use common::{Project, DEMO_BLUEPRINT};
use predicates::prelude::*;
use serde_json::{json, Value};

#[test]
fn normalize_prints_pretty_json() {
    let project = Project::empty();
    project.file("demo.yaml", DEMO_BLUEPRINT);

    let output = project
        .bp()
        .args(["normalize", "demo.yaml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["id"], json!("demo"));
    assert_eq!(value["title"], json!("Demo"));
    assert_eq!(value["models"], json!(["gpt-4"]));
    assert_eq!(value["prompts"].as_array().unwrap().len(), 2);
    assert_eq!(
        value["prompts"][1]["points"],
        json!([{"fn": "icontains", "fnArgs": "paris", "multiplier": 2.0}])
    );
    assert!(String::from_utf8(output).unwrap().contains("\n  \"id\""));
}

#[test]
fn normalize_compact_json_is_single_line() {
    let project = Project::empty();
    project.file("demo.yml", DEMO_BLUEPRINT);

    project
        .bp()
        .args(["normalize", "demo.yml", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{\"id\":\"demo\""))
        .stdout(predicate::str::contains("\n").count(1));
}

#[test]
fn normalize_yaml_output() {
    let project = Project::empty();
    project.file("demo.yaml", DEMO_BLUEPRINT);

    project
        .bp()
        .args(["normalize", "demo.yaml", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id: demo"))
        .stdout(predicate::str::contains("- id: capital"));
}

#[test]
fn normalize_json_blueprint() {
    let project = Project::empty();
    project.file(
        "legacy.json",
        r#"{"configId": "legacy", "prompts": [{"id": "q", "promptText": "2+2?"}]}"#,
    );

    project
        .bp()
        .args(["normalize", "legacy.json", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":\"legacy\""))
        .stdout(predicate::str::contains(
            r#""messages":[{"role":"user","content":"2+2?"}]"#,
        ));
}

#[test]
fn normalize_type_flag_overrides_extension() {
    let project = Project::empty();
    project.file("blueprint.txt", DEMO_BLUEPRINT);

    project
        .bp()
        .args(["normalize", "blueprint.txt", "--type", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"capital\""));
}

#[test]
fn normalize_unknown_extension_suggests_type_flag() {
    let project = Project::empty();
    project.file("blueprint.txt", DEMO_BLUEPRINT);

    project
        .bp()
        .args(["normalize", "blueprint.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: Cannot tell whether"))
        .stderr(predicate::str::contains("--type yaml"));
}

#[test]
fn normalize_invalid_point_reports_prompt() {
    let project = Project::empty();
    project.file(
        "bad.yaml",
        "- id: broken\n  prompt: x\n  should:\n    - weight: 2\n",
    );

    project
        .bp()
        .args(["normalize", "bad.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid blueprint"))
        .stderr(predicate::str::contains("prompt 'broken'"));
}

#[test]
fn normalize_missing_file() {
    let project = Project::empty();

    project
        .bp()
        .args(["normalize", "nowhere.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn normalize_output_is_stable() {
    let project = Project::empty();
    project.file("demo.yaml", DEMO_BLUEPRINT);

    let first = project
        .bp()
        .args(["normalize", "demo.yaml"])
        .output()
        .unwrap();
    let second = project
        .bp()
        .args(["normalize", "demo.yaml"])
        .output()
        .unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn normalize_yaml_output_loads_back() {
    let project = Project::empty();
    project.file(
        "stale.yaml",
        "id: demo\nprompts:\n  - prompt: stale\n---\n- prompt: kept\n",
    );

    let output = project
        .bp()
        .args(["normalize", "stale.yaml", "--format", "yaml"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_yaml::Value = serde_yaml::from_slice(&output).unwrap();
    let prompts = value.get("prompts").and_then(|p| p.as_sequence()).unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(!String::from_utf8(output).unwrap().contains("stale"));
}

#[test]
fn normalize_rejects_infinite_weight() {
    let project = Project::empty();
    project.file("inf.yaml", "- prompt: q\n  should:\n    - text: a\n      weight: .inf\n");

    project
        .bp()
        .args(["normalize", "inf.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("non-finite number .inf"));
}
