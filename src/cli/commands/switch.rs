use anyhow::Result;

use super::super::args::SwitchCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{self, CatalogPreview};
use super::Project;
use crate::core::catalog::{Catalog, catalog_path, list_languages};

/// Entries shown in a catalog preview.
const PREVIEW_ENTRIES: usize = 10;

/// List catalogs, or preview one with its translation progress against the
/// base catalog.
pub fn switch(cmd: SwitchCommand) -> Result<ExitStatus> {
    let project = Project::load(&cmd.common)?;
    let locale_dir = project.locale_dir();
    let languages = list_languages(&locale_dir)?;
    let base_language = &project.config.base_language;

    let Some(language) = cmd.language else {
        report::print_languages(&languages, base_language);
        return Ok(ExitStatus::Success);
    };

    if !languages.contains(&language) {
        eprintln!("Error: No catalog for language: {}", language);
        report::print_languages(&languages, base_language);
        return Ok(ExitStatus::Failure);
    }

    let catalog = Catalog::load(&catalog_path(&locale_dir, &language))?;
    let base = if language == *base_language {
        catalog.clone()
    } else {
        let path = catalog_path(&locale_dir, base_language);
        if path.exists() { Catalog::load(&path)? } else { Catalog::new() }
    };

    let preview = CatalogPreview {
        language: &language,
        total: base.len(),
        translated: translated_count(&base, &catalog),
        entries: catalog.entries().take(PREVIEW_ENTRIES).collect(),
    };
    report::print_preview(&preview);

    Ok(ExitStatus::Success)
}

/// Base keys that have a non-blank value in `catalog`.
fn translated_count(base: &Catalog, catalog: &Catalog) -> usize {
    base.entries()
        .filter(|(key, _)| catalog.get(key).is_some_and(|v| !v.trim().is_empty()))
        .count()
}
