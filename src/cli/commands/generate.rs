use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use tracing::warn;

use super::super::args::GenerateCommand;
use super::super::exit_status::ExitStatus;
use super::super::report;
use super::Project;
use crate::core::catalog::{Catalog, catalog_path, is_language_code};
use crate::core::{GenerateOptions, generate_catalog};
use crate::translate::{Translator, TranslatorBackend, select_backend};

const DEFAULT_TARGETS: &[&str] = &["en"];

pub fn generate(cmd: GenerateCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    let config = &project.config;
    let locale_dir = project.locale_dir();

    let base_path = catalog_path(&locale_dir, &config.base_language);
    if !base_path.exists() {
        eprintln!(
            "Error: Base catalog not found: {}. Run {} first.",
            base_path.display(),
            "i18n-auto batch".cyan()
        );
        return Ok(ExitStatus::Failure);
    }
    let base = Catalog::load(&base_path)?;
    if base.is_empty() {
        println!("Base catalog {} is empty, nothing to generate", base_path.display());
        return Ok(ExitStatus::Success);
    }

    let languages: Vec<String> = if cmd.languages.is_empty() {
        DEFAULT_TARGETS.iter().map(|l| l.to_string()).collect()
    } else {
        cmd.languages.clone()
    };
    if let Some(invalid) = languages.iter().find(|l| !is_language_code(l)) {
        eprintln!("Error: Invalid language code: {}", invalid);
        return Ok(ExitStatus::Failure);
    }

    let backend: Option<TranslatorBackend> = if cmd.no_translate {
        None
    } else {
        match select_backend(cmd.service, config) {
            Ok(backend) => Some(backend),
            Err(err) => {
                eprintln!("Error: {}", err);
                return Ok(ExitStatus::Failure);
            }
        }
    };
    let translator = backend.as_ref().map(|b| b as &dyn Translator);
    if let Some(translator) = translator {
        println!("Translating with {}", translator.name());
    }

    let options = GenerateOptions::default();
    for language in &languages {
        if *language == config.base_language {
            eprintln!(
                "{} skipping {}: it is the base language",
                "warning:".bold().yellow(),
                language
            );
            continue;
        }

        let path = catalog_path(&locale_dir, language);
        let existing = load_existing(&path);
        let generated = generate_catalog(language, &base, translator, &existing, &options);
        generated.catalog.save(&path)?;
        report::print_generated(&generated, &path);
    }

    Ok(ExitStatus::Success)
}

/// An existing target catalog, or an empty one if it is missing or unreadable.
fn load_existing(path: &Path) -> Catalog {
    if !path.exists() {
        return Catalog::new();
    }
    Catalog::load(path).unwrap_or_else(|err| {
        warn!("{:#}; regenerating from scratch", err);
        Catalog::new()
    })
}
