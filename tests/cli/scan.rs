use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{BASE_CATALOG, CliTest, stdout};

#[test]
fn test_scan_rewrites_script_and_records_catalog() -> Result<()> {
    let test = CliTest::with_file("src/a.js", "const a = \"你好\";\nconst b = \"你好\";\n")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.command().args(["scan", "src/a.js"]), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ src/a.js (2 changes)
        ✓ Processed 1 file: 1 succeeded, 0 failed
          2 replacements in 1 file, catalog: [ROOT]/src/i18n/locale/zh.json

        ----- stderr -----
        ");
    });

    assert_eq!(
        test.read_file("src/a.js")?,
        "import i18n from '@/i18n';\n\
         const a = i18n.global.t('i18n-auto-7eca689f');\n\
         const b = i18n.global.t('i18n-auto-7eca689f');\n"
    );
    assert_eq!(
        test.read_file(BASE_CATALOG)?,
        "{\n  \"i18n-auto-7eca689f\": \"你好\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_scan_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("src/a.ts", "export const msg: string = '保存';\n")?;

    test.run(&["scan", "src/a.ts"])?;
    let first = test.read_file("src/a.ts")?;
    let catalog = test.read_file(BASE_CATALOG)?;

    assert_cmd_snapshot!(test.command().args(["scan", "src/a.ts"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
      src/a.ts (no changes)
    ✓ Processed 1 file: 1 succeeded, 0 failed

    ----- stderr -----
    ");
    assert_eq!(test.read_file("src/a.ts")?, first);
    assert_eq!(test.read_file(BASE_CATALOG)?, catalog);

    Ok(())
}

#[test]
fn test_scan_byte_order_mark_file() -> Result<()> {
    let test = CliTest::with_file(
        "automatically-i18n-config.json",
        r#"{ "scriptI18nCall": "t", "autoImportI18n": false }"#,
    )?;
    test.write_file("src/a.js", "\u{feff}const a = '你好';\n")?;

    let output = test.run(&["scan", "src/a.js"])?;
    assert!(output.status.success());
    assert_eq!(
        test.read_file("src/a.js")?,
        "\u{feff}const a = t('i18n-auto-7eca689f');\n"
    );

    Ok(())
}

#[test]
fn test_scan_component_template() -> Result<()> {
    let test = CliTest::with_file(
        "src/Hello.vue",
        "<template>\n  <div title=\"欢迎\">你好</div>\n</template>\n",
    )?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.command().args(["scan", "src/Hello.vue"]), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ src/Hello.vue (2 changes)
        ✓ Processed 1 file: 1 succeeded, 0 failed
          2 replacements in 1 file, catalog: [ROOT]/src/i18n/locale/zh.json

        ----- stderr -----
        ");
    });
    assert_eq!(
        test.read_file("src/Hello.vue")?,
        "<template>\n  <div :title=\"$t('i18n-auto-47781b8a')\">{{ $t('i18n-auto-7eca689f') }}</div>\n</template>\n"
    );

    let catalog = test.read_json(BASE_CATALOG)?;
    assert_eq!(catalog["i18n-auto-47781b8a"], "欢迎");
    assert_eq!(catalog["i18n-auto-7eca689f"], "你好");

    let rerun = test.run(&["scan", "src/Hello.vue"])?;
    assert!(stdout(&rerun).contains("(no changes)"));

    Ok(())
}

#[test]
fn test_scan_uses_configured_call_names() -> Result<()> {
    let test = CliTest::with_file(
        "automatically-i18n-config.json",
        r#"{ "templateI18nCall": "t", "scriptI18nCall": "t", "autoImportI18n": false }"#,
    )?;
    test.write_file("src/a.vue", "<template><input placeholder=\"欢迎\" /></template>\n")?;

    let output = test.run(&["scan", "src/a.vue"])?;
    assert!(output.status.success());
    assert_eq!(
        test.read_file("src/a.vue")?,
        "<template><input :placeholder=\"t('i18n-auto-47781b8a')\" /></template>\n"
    );

    Ok(())
}

#[test]
fn test_scan_parse_error_leaves_file_untouched() -> Result<()> {
    let test = CliTest::with_file("src/bad.js", "const = '你好';\n")?;

    let output = test.run(&["scan", "src/bad.js"])?;
    assert_eq!(output.status.code(), Some(1));
    // The parser's own message is not stable enough to snapshot.
    let out = stdout(&output);
    assert!(out.starts_with("\u{2718} src/bad.js\n    error: Failed to parse script"));
    assert!(out.ends_with("\u{2718} Processed 1 file: 0 succeeded, 1 failed\n"));
    assert_eq!(test.read_file("src/bad.js")?, "const = '你好';\n");
    assert!(!test.root().join(BASE_CATALOG).exists());

    Ok(())
}

#[test]
fn test_scan_partial_failure_still_succeeds() -> Result<()> {
    let test = CliTest::with_file("src/ok.js", "const a = '谢谢';\n")?;
    test.write_file("src/style.css", ".a { content: '你好'; }\n")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(
            test.command().args(["scan", "src/ok.js", "src/style.css", "src/missing.js"]),
            @r"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ src/ok.js (1 change)
        ✘ src/style.css
            error: Excluded file type: .css
        ✘ src/missing.js
            error: File not found: src/missing.js
        ✘ Processed 3 files: 1 succeeded, 2 failed
          1 replacement in 1 file, catalog: [ROOT]/src/i18n/locale/zh.json

        ----- stderr -----
        "
        );
    });
    assert_eq!(test.read_json(BASE_CATALOG)?["i18n-auto-a34490b5"], "谢谢");

    Ok(())
}
