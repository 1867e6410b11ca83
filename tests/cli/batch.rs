use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{BASE_CATALOG, CliTest, stdout};

fn project() -> Result<CliTest> {
    let test = CliTest::with_file("src/a.js", "export const a = '你好';\n")?;
    test.write_file(
        "src/components/B.vue",
        "<template>\n  <h1>欢迎</h1>\n</template>\n",
    )?;
    test.write_file("src/plain.ts", "export const n = 1;\n")?;
    test.write_file("src/legacy/old.js", "const c = '取消';\n")?;
    test.write_file("node_modules/lib/index.js", "const t = '谢谢';\n")?;
    test.write_file(".cache/gen.js", "const s = '保存';\n")?;
    Ok(test)
}

#[test]
fn test_batch_processes_supported_files() -> Result<()> {
    let test = project()?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.command().args(["batch", "--exclude", "legacy"]), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Found 3 file(s) in [ROOT]
        ✓ [ROOT]/src/a.js (1 change)
        ✓ [ROOT]/src/components/B.vue (1 change)
          [ROOT]/src/plain.ts (no changes)
        ✓ Processed 3 files: 3 succeeded, 0 failed
          2 replacements in 2 files, catalog: [ROOT]/src/i18n/locale/zh.json

        ----- stderr -----
        ");
    });

    assert_eq!(
        test.read_file("src/components/B.vue")?,
        "<template>\n  <h1>{{ $t('i18n-auto-47781b8a') }}</h1>\n</template>\n"
    );
    assert!(test.read_file("src/a.js")?.contains("i18n.global.t('i18n-auto-7eca689f')"));

    assert_eq!(test.read_file("src/legacy/old.js")?, "const c = '取消';\n");
    assert_eq!(test.read_file("node_modules/lib/index.js")?, "const t = '谢谢';\n");
    assert_eq!(test.read_file(".cache/gen.js")?, "const s = '保存';\n");

    let catalog = test.read_json(BASE_CATALOG)?;
    let keys: Vec<&String> = catalog.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["i18n-auto-7eca689f", "i18n-auto-47781b8a"]);

    Ok(())
}

#[test]
fn test_batch_glob_exclude() -> Result<()> {
    let test = project()?;

    let output = test.run(&["batch", "--exclude", "**/*.vue", "--exclude", "legacy"])?;
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Found 2 file(s)"));
    assert_eq!(
        test.read_file("src/components/B.vue")?,
        "<template>\n  <h1>欢迎</h1>\n</template>\n"
    );

    Ok(())
}

#[test]
fn test_batch_dir_option() -> Result<()> {
    let test = project()?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.command().args(["batch", "--dir", "src/components"]), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Found 1 file(s) in src/components
        ✓ src/components/B.vue (1 change)
        ✓ Processed 1 file: 1 succeeded, 0 failed
          1 replacement in 1 file, catalog: [ROOT]/src/i18n/locale/zh.json

        ----- stderr -----
        ");
    });
    assert_eq!(test.read_file("src/a.js")?, "export const a = '你好';\n");

    Ok(())
}

#[test]
fn test_batch_empty_project() -> Result<()> {
    let test = CliTest::with_file("README.md", "# 项目\n")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.command().arg("batch"), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        No supported files found in [ROOT]

        ----- stderr -----
        ");
    });
    assert!(!test.root().join(BASE_CATALOG).exists());

    Ok(())
}

#[test]
fn test_batch_all_files_failing_is_a_failure() -> Result<()> {
    let test = CliTest::with_file("src/bad.js", "const = '你好';\n")?;

    let output = test.run(&["batch"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).ends_with("Processed 1 file: 0 succeeded, 1 failed\n"));

    Ok(())
}

#[test]
fn test_batch_missing_dir() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().args(["batch", "--dir", "nope"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: Not a directory: nope
    ");

    Ok(())
}
