use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{BASE_CATALOG, CliTest, stderr};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in [
        "i18nFilePath",
        "baseLanguage",
        "scriptI18nCall",
        "templateI18nCall",
        "excludedExtensions",
    ] {
        assert!(parsed.get(field).is_some(), "Config should have '{field}'");
    }
    assert_eq!(parsed["baseLanguage"], "zh");

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config_and_catalogs() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created automatically-i18n-config.json
    ✓ Created src/i18n/locale/zh.json
    ✓ Created src/i18n/locale/en.json

    ----- stderr -----
    ");

    let content = test.read_file("automatically-i18n-config.json")?;
    assert_config_content(&content)?;

    assert_eq!(test.read_file(BASE_CATALOG)?, "{}\n");
    assert_eq!(test.read_file("src/i18n/locale/en.json")?, "{}\n");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("automatically-i18n-config.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: automatically-i18n-config.json already exists
    ");
    assert_eq!(test.read_file("automatically-i18n-config.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_keeps_existing_catalogs() -> Result<()> {
    let test = CliTest::with_file(BASE_CATALOG, "{\n  \"k\": \"值\"\n}\n")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created automatically-i18n-config.json
    ✓ Created src/i18n/locale/en.json

    ----- stderr -----
    ");
    assert_eq!(test.read_file(BASE_CATALOG)?, "{\n  \"k\": \"值\"\n}\n");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;
    test.write_file("src/app.js", "export const title = '标题';\n")?;

    let output = test.run(&["scan", "src/app.js"])?;
    assert!(
        output.status.success(),
        "Scan should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert_eq!(test.read_json(BASE_CATALOG)?["i18n-auto-32c65d8d"], "标题");

    Ok(())
}
