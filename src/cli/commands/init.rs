use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::InitCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, Config, write_default_config};
use crate::core::catalog::{Catalog, catalog_path};

/// Languages that get an empty catalog on init, besides the base language.
const INITIAL_TARGETS: &[&str] = &["en"];

pub fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let root = &cmd.common.root;
    let config_path = root.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create directory: {}", root.display()))?;
    write_default_config(&config_path)?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    let config = Config::default();
    let locale_dir = config.locale_dir(root);
    let languages = std::iter::once(config.base_language.as_str())
        .chain(INITIAL_TARGETS.iter().copied().filter(|l| *l != config.base_language));
    for language in languages {
        let path = catalog_path(&locale_dir, language);
        if path.exists() {
            continue;
        }
        Catalog::new().save(&path)?;
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", path.strip_prefix(root).unwrap_or(&path).display()).green()
        );
    }

    Ok(ExitStatus::Success)
}
