use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{BASE_CATALOG, CliTest};

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        BASE_CATALOG,
        "{\n  \"k1\": \"你好\",\n  \"k2\": \"谢谢\"\n}\n",
    )?;
    test.write_file(
        "src/i18n/locale/en.json",
        "{\n  \"k1\": \"Hello\",\n  \"k2\": \"\"\n}\n",
    )?;
    Ok(test)
}

#[test]
fn test_switch_lists_catalogs() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.command().arg("switch"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Available catalogs:
      en
      zh (base)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_switch_previews_catalog() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.command().args(["switch", "en"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    [en] 1/2 translated (50%)
      k1  Hello
      k2  (empty)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_switch_unknown_language() -> Result<()> {
    let test = project()?;

    assert_cmd_snapshot!(test.command().args(["switch", "fr"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Available catalogs:
      en
      zh (base)

    ----- stderr -----
    Error: No catalog for language: fr
    ");

    Ok(())
}

#[test]
fn test_switch_without_catalogs() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("switch"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    No catalogs found. Run i18n-auto scan first.

    ----- stderr -----
    ");

    Ok(())
}
