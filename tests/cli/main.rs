use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::{assert_cmd_snapshot, get_cargo_bin};
use serde_json::Value;
use tempfile::TempDir;

mod batch;
mod generate;
mod init;
mod scan;
mod switch;

const BIN_NAME: &str = "i18n-auto";

/// Base catalog location under the default config.
pub const BASE_CATALOG: &str = "src/i18n/locale/zh.json";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
    root_filter: String,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops the config search from leaving the project.
        fs::create_dir(project_dir.join(".git"))?;
        let root_filter = regex::escape(&project_dir.display().to_string());
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            root_filter,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    /// Snapshot filters replacing the temporary project path with `[ROOT]`.
    pub fn filters(&self) -> Vec<(&str, &str)> {
        vec![(self.root_filter.as_str(), "[ROOT]")]
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<Output> {
        let output = self.command().args(args).output()?;
        Ok(output)
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&["--help"])?;

    assert!(output.status.success());
    let out = stdout(&output);
    for command in ["init", "config", "scan", "batch", "generate", "switch"] {
        assert!(out.contains(command), "missing {command} in help:\n{out}");
    }
    Ok(())
}

#[test]
fn test_invalid_config_is_an_internal_error() -> Result<()> {
    let test = CliTest::with_file(
        "automatically-i18n-config.json",
        r#"{ "scriptI18nCall": "i18n-global-t" }"#,
    )?;

    let output = test.run(&["config"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("scriptI18nCall"));
    Ok(())
}

#[test]
fn test_config_shows_effective_values() -> Result<()> {
    let test = CliTest::with_file(
        "automatically-i18n-config.json",
        r#"{ "templateI18nCall": "t", "baseLanguage": "zh" }"#,
    )?;

    let output = test.run(&["config"])?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with(&format!(
        "Config file: {}\nCatalogs: {}\n",
        test.root().join("automatically-i18n-config.json").display(),
        test.root().join("src/i18n/locale").display()
    )));
    assert!(out.contains(r#""templateI18nCall": "t""#));
    assert!(out.contains(r#""scriptI18nCall": "i18n.global.t""#));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_config_edit_passes_file_to_editor() -> Result<()> {
    let test = CliTest::with_file("edited.json", "{ \"baseLanguage\": \"zh-CN\" }\n")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(
            test.command()
                .args(["config", "--edit"])
                .env("PATH", std::env::var_os("PATH").unwrap_or_default())
                .env("EDITOR", "cp edited.json"),
            @r"
        success: true
        exit_code: 0
        ----- stdout -----
        ✓ Created automatically-i18n-config.json
        Opening [ROOT]/automatically-i18n-config.json with cp

        ----- stderr -----
        "
        );
    });

    assert_eq!(
        test.read_file("automatically-i18n-config.json")?,
        "{ \"baseLanguage\": \"zh-CN\" }\n"
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_config_edit_reports_editor_failure() -> Result<()> {
    let test = CliTest::with_file("automatically-i18n-config.json", "{}\n")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(
            test.command()
                .args(["config", "--edit"])
                .env("PATH", std::env::var_os("PATH").unwrap_or_default())
                .env("EDITOR", "false"),
            @r"
        success: false
        exit_code: 1
        ----- stdout -----
        Opening [ROOT]/automatically-i18n-config.json with false

        ----- stderr -----
        Error: false exited with exit status: 1
        "
        );
    });

    assert_eq!(test.read_file("automatically-i18n-config.json")?, "{}\n");
    Ok(())
}
