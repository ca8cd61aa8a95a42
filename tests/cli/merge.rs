use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, output_text};

const APP_DOC: &str = r#"{
  "name": "app",
  "children": [
    {
      "kind": "externalModule",
      "name": "\"src/a\"",
      "comment": "Helpers for A.\n@module Foo\n@preferred",
      "children": [{ "kind": "function", "name": "c" }]
    },
    {
      "kind": "externalModule",
      "name": "\"src/b\"",
      "comment": "@module Foo",
      "children": [{ "kind": "class", "name": "d" }]
    },
    {
      "kind": "externalModule",
      "name": "\"src/e\"",
      "comment": "@module Bar"
    }
  ]
}"#;

const PLAIN_DOC: &str = r#"{
  "name": "plain",
  "children": [{ "kind": "externalModule", "name": "\"x\"" }]
}"#;

// ============================================================
// Dry Run
// ============================================================

#[test]
fn test_merge_dry_run_reports_outcomes() -> Result<()> {
    let test = CliTest::with_file("api/app.json", APP_DOC)?;

    let output = test.merge_command().output()?;
    let (stdout, stderr) = output_text(&output);

    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stdout.contains("api/app.json"));
    assert!(stdout.contains("renamed \"src/a\" -> Foo"));
    assert!(stdout.contains("merged  \"src/b\" -> Foo (1 declaration moved)"));
    assert!(stdout.contains("renamed \"src/e\" -> Bar"));
    assert!(stdout.contains("Checked 1 document: 2 renames, 1 merge"));
    assert!(stdout.contains("Run with --apply"));
    assert!(!test.root().join("resolved").exists());

    Ok(())
}

#[test]
fn test_merge_without_directives() -> Result<()> {
    let test = CliTest::with_file("plain.json", PLAIN_DOC)?;

    let output = test.merge_command().output()?;
    let (stdout, _) = output_text(&output);

    assert!(output.status.success());
    assert!(stdout.contains("Checked 1 document: 0 renames, 0 merges"));
    assert!(!stdout.contains("plain.json"));
    assert!(!stdout.contains("--apply"));

    Ok(())
}

#[test]
fn test_merge_empty_project() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.merge_command().output()?;
    let (stdout, _) = output_text(&output);

    assert!(output.status.success());
    assert!(stdout.contains("no declaration documents found"));

    Ok(())
}

// ============================================================
// Apply
// ============================================================

#[test]
fn test_merge_apply_writes_resolved_documents() -> Result<()> {
    let test = CliTest::with_file("api/app.json", APP_DOC)?;
    test.write_file("plain.json", PLAIN_DOC)?;

    let output = test.merge_command().arg("--apply").output()?;
    let (stdout, stderr) = output_text(&output);

    assert!(output.status.success(), "stderr: {}", stderr);
    assert!(stdout.contains("Wrote 2 resolved documents to"));

    let resolved: Value = serde_json::from_str(&test.read_file("resolved/api/app.json")?)?;
    let children = resolved["children"].as_array().unwrap();
    let names: Vec<&str> = children
        .iter()
        .map(|child| child["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Foo", "Bar"]);

    let foo = &children[0];
    let members: Vec<&str> = foo["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|child| child["name"].as_str().unwrap())
        .collect();
    assert_eq!(members, vec!["c", "d"]);
    // Directive tags are stripped from the merge target.
    assert_eq!(foo["comment"]["shortText"], "Helpers for A.");
    assert!(foo["comment"].get("tags").is_none());

    assert!(test.root().join("resolved/plain.json").exists());

    Ok(())
}

#[test]
fn test_merge_apply_is_stable_across_runs() -> Result<()> {
    let test = CliTest::with_file("app.json", APP_DOC)?;

    test.merge_command().arg("--apply").output()?;
    let first = test.read_file("resolved/app.json")?;

    let output = test.merge_command().arg("--apply").output()?;
    assert!(output.status.success());
    let second = test.read_file("resolved/app.json")?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_merge_apply_with_out_dir() -> Result<()> {
    let test = CliTest::with_file("app.json", APP_DOC)?;

    let output = test
        .merge_command()
        .args(["--apply", "--out-dir", "build/api"])
        .output()?;

    assert!(output.status.success());
    assert!(test.root().join("build/api/app.json").exists());
    assert!(!test.root().join("resolved").exists());

    Ok(())
}

// ============================================================
// Errors And Configuration
// ============================================================

#[test]
fn test_merge_parse_error_exits_with_failure() -> Result<()> {
    let test = CliTest::with_file("app.json", APP_DOC)?;
    test.write_file("broken.json", "{ not json")?;

    let output = test.merge_command().output()?;
    let (stdout, stderr) = output_text(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("error: broken.json"));
    assert!(stdout.contains("Checked 2 documents"));

    Ok(())
}

#[test]
fn test_merge_invalid_config_is_fatal() -> Result<()> {
    let test = CliTest::with_file("app.json", APP_DOC)?;
    test.write_file(".declmergerc.json", r#"{ "directiveTag": "@module" }"#)?;

    let output = test.merge_command().output()?;
    let (_, stderr) = output_text(&output);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("directiveTag"));

    Ok(())
}

#[test]
fn test_merge_with_custom_tags() -> Result<()> {
    let test = CliTest::with_file(
        "app.json",
        r#"{
  "name": "app",
  "children": [
    { "kind": "externalModule", "name": "\"a\"", "comment": "@merge Core" },
    { "kind": "externalModule", "name": "\"b\"", "comment": "@module Ignored" }
  ]
}"#,
    )?;
    test.write_file(
        ".declmergerc.json",
        r#"{ "directiveTag": "merge", "preferredTag": "primary" }"#,
    )?;

    let output = test.merge_command().output()?;
    let (stdout, _) = output_text(&output);

    assert!(output.status.success());
    assert!(stdout.contains("renamed \"a\" -> Core"));
    assert!(!stdout.contains("Ignored"));

    Ok(())
}

#[test]
fn test_merge_only_mergeable_kind() -> Result<()> {
    let test = CliTest::with_file(
        "app.json",
        r#"{
  "name": "app",
  "children": [
    { "kind": "namespace", "name": "N", "comment": "@module Foo" }
  ]
}"#,
    )?;

    let output = test.merge_command().output()?;
    let (stdout, _) = output_text(&output);

    assert!(output.status.success());
    assert!(stdout.contains("0 renames, 0 merges"));

    Ok(())
}
