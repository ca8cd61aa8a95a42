use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, output_text};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["includes", "ignores", "outDir", "mergeableKind", "directiveTag", "preferredTag"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["directiveTag"], "module");
    assert_eq!(parsed["preferredTag"], "preferred");

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    let (stdout, _) = output_text(&output);

    assert!(output.status.success());
    assert!(stdout.contains("Created .declmergerc.json"));
    assert!(test.root().join(".declmergerc.json").exists());

    let content = test.read_file(".declmergerc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".declmergerc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    let (_, stderr) = output_text(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains(".declmergerc.json already exists"));
    assert_eq!(test.read_file(".declmergerc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file(
        "api/app.json",
        r#"{ "name": "app", "children": [{ "kind": "externalModule", "name": "\"a\"", "comment": "@module A" }] }"#,
    )?;

    let output = test.merge_command().output()?;
    let (stdout, stderr) = output_text(&output);
    assert!(
        output.status.success(),
        "Merge command should work with initialized config. stderr: {}",
        stderr
    );
    assert!(stdout.contains("Checked 1 document: 1 rename, 0 merges"));

    Ok(())
}
