use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{BASE_CATALOG, CliTest, stderr};

const EN_CATALOG: &str = "src/i18n/locale/en.json";

fn project_with_base() -> Result<CliTest> {
    CliTest::with_file(
        BASE_CATALOG,
        "{\n  \"k1\": \"你好\",\n  \"k2\": \"谢谢\"\n}\n",
    )
}

#[test]
fn test_generate_without_base_catalog() -> Result<()> {
    let test = CliTest::new()?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.command().args(["generate", "--no-translate"]), @r"
        success: false
        exit_code: 1
        ----- stdout -----

        ----- stderr -----
        Error: Base catalog not found: [ROOT]/src/i18n/locale/zh.json. Run i18n-auto batch first.
        ");
    });

    Ok(())
}

#[test]
fn test_generate_template_preserves_existing() -> Result<()> {
    let test = project_with_base()?;
    test.write_file(EN_CATALOG, "{\n  \"k1\": \"Hello\"\n}\n")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.command().args(["generate", "--no-translate"]), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ [en] [ROOT]/src/i18n/locale/en.json
            1 preserved, 0 translated, 1 untranslated

        ----- stderr -----
        ");
    });

    assert_eq!(
        test.read_file(EN_CATALOG)?,
        "{\n  \"k1\": \"Hello\",\n  \"k2\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_generate_multiple_languages() -> Result<()> {
    let test = project_with_base()?;

    let output = test.run(&["generate", "--no-translate", "-l", "ja", "-l", "ko"])?;
    assert!(output.status.success(), "{}", stderr(&output));

    for language in ["ja", "ko"] {
        let catalog = test.read_json(&format!("src/i18n/locale/{language}.json"))?;
        assert_eq!(catalog["k1"], "");
        assert_eq!(catalog["k2"], "");
    }
    assert!(!test.root().join(EN_CATALOG).exists());

    Ok(())
}

#[test]
fn test_generate_skips_base_language() -> Result<()> {
    let test = project_with_base()?;

    assert_cmd_snapshot!(test.command().args(["generate", "--no-translate", "-l", "zh"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    warning: skipping zh: it is the base language
    ");
    assert_eq!(
        test.read_file(BASE_CATALOG)?,
        "{\n  \"k1\": \"你好\",\n  \"k2\": \"谢谢\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_generate_rejects_invalid_language() -> Result<()> {
    let test = project_with_base()?;

    assert_cmd_snapshot!(test.command().args(["generate", "--no-translate", "-l", "../en"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: Invalid language code: ../en
    ");

    Ok(())
}

#[test]
fn test_generate_without_configured_service() -> Result<()> {
    let test = project_with_base()?;
    test.write_file("automatically-i18n-config.json", r#"{ "freeGoogle": false }"#)?;

    assert_cmd_snapshot!(test.command().arg("generate"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: No translation service configured (enable freeGoogle, or set baidu / deepl credentials)
    ");
    assert!(!test.root().join(EN_CATALOG).exists());

    Ok(())
}

#[test]
fn test_generate_empty_base_catalog() -> Result<()> {
    let test = CliTest::with_file(BASE_CATALOG, "{}\n")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.command().args(["generate", "--no-translate"]), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Base catalog [ROOT]/src/i18n/locale/zh.json is empty, nothing to generate

        ----- stderr -----
        ");
    });

    Ok(())
}
