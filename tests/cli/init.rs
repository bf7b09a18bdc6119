use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["strategy"], "sequential");
    assert_eq!(parsed["output"], "json");
    assert_eq!(parsed["timeoutSecs"], 30);
    assert_eq!(parsed["pageSize"], 100);
    assert!(
        parsed.get("kubeconfigAliases").is_some(),
        "Config should have 'kubeconfigAliases' field"
    );

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
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Created .kimagesrc.json"));

    assert!(test.root().join(".kimagesrc.json").exists());
    let content = test.read_file(".kimagesrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".kimagesrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: .kimagesrc.json already exists"));
    assert_eq!(test.read_file(".kimagesrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_pods()?;

    test.command().arg("init").output()?;

    let output = test.list_pods(&[])?;
    assert!(
        output.status.success(),
        "List command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
