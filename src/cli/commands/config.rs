use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::ConfigCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use super::Project;
use crate::config::{CONFIG_FILE_NAME, write_default_config};

/// Used when `$EDITOR` is unset or blank.
const DEFAULT_EDITOR: &str = if cfg!(windows) { "notepad" } else { "nano" };

/// Print where the config came from and the effective values, or open the
/// file in an editor with `--edit`.
pub fn config(cmd: ConfigCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    if cmd.edit {
        return edit(&project);
    }

    match &project.config_path {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none, using defaults)"),
    }
    println!("Catalogs: {}", project.locale_dir().display());
    println!(
        "{}",
        serde_json::to_string_pretty(&project.config).context("Failed to serialize config")?
    );

    Ok(ExitStatus::Success)
}

fn edit(project: &Project) -> Result<ExitStatus> {
    let path = match &project.config_path {
        Some(path) => path.clone(),
        None => {
            let path = project.root.join(CONFIG_FILE_NAME);
            write_default_config(&path)?;
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Created {}", CONFIG_FILE_NAME).green()
            );
            path
        }
    };

    let (program, args) = editor_command(std::env::var("EDITOR").ok().as_deref());
    println!("Opening {} with {}", path.display(), program);
    launch(&program, &args, &path)
}

/// Editor argv from `$EDITOR`, which may carry its own arguments
/// (`code --wait`).
fn editor_command(editor: Option<&str>) -> (String, Vec<String>) {
    let mut parts = editor.into_iter().flat_map(str::split_whitespace);
    match parts.next() {
        Some(program) => (program.to_string(), parts.map(str::to_string).collect()),
        None => (DEFAULT_EDITOR.to_string(), Vec::new()),
    }
}

fn launch(program: &str, args: &[String], path: &Path) -> Result<ExitStatus> {
    match Command::new(program).args(args).arg(path).status() {
        Ok(status) if status.success() => Ok(ExitStatus::Success),
        Ok(status) => {
            eprintln!("Error: {} exited with {}", program, status);
            Ok(ExitStatus::Failure)
        }
        Err(err) => {
            eprintln!("Error: Failed to launch {}: {}", program, err);
            eprintln!("Edit the file manually: {}", path.display());
            Ok(ExitStatus::Failure)
        }
    }
}
