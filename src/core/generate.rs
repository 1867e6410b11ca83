//! Build target-language catalogs from the base catalog.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use super::catalog::Catalog;
use crate::translate::Translator;

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub batch_size: usize,
    /// Pause between consecutive translation batches.
    pub batch_delay: Duration,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            batch_size: 20,
            batch_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateStats {
    /// Non-blank values kept from the existing catalog.
    pub preserved: usize,
    pub translated: usize,
    /// Entries that received the base text because translation failed.
    pub fallback: usize,
    /// Entries left empty because no translator was used.
    pub untranslated: usize,
}

#[derive(Debug)]
pub struct GeneratedCatalog {
    pub language: String,
    pub catalog: Catalog,
    pub stats: GenerateStats,
}

/// Produce the `language` catalog for `base`.
///
/// Keys follow base order. Keys only present in `existing` are kept after
/// them; catalogs are never pruned here.
pub fn generate_catalog(
    language: &str,
    base: &Catalog,
    translator: Option<&dyn Translator>,
    existing: &Catalog,
    options: &GenerateOptions,
) -> GeneratedCatalog {
    let mut stats = GenerateStats::default();
    let mut catalog = Catalog::new();
    let mut queue: Vec<(&str, &str)> = Vec::new();

    for (key, text) in base.entries() {
        match existing.get(key) {
            Some(value) if !value.trim().is_empty() => {
                catalog.insert(key, value);
                stats.preserved += 1;
            }
            _ => {
                // Placeholder keeps base order; filled in below.
                catalog.insert(key, "");
                queue.push((key, text));
            }
        }
    }

    match translator {
        None => stats.untranslated = queue.len(),
        Some(translator) => {
            translate_queue(language, &queue, translator, options, &mut catalog, &mut stats)
        }
    }

    catalog.merge_missing(existing);

    GeneratedCatalog {
        language: language.to_string(),
        catalog,
        stats,
    }
}

fn translate_queue(
    language: &str,
    queue: &[(&str, &str)],
    translator: &dyn Translator,
    options: &GenerateOptions,
    catalog: &mut Catalog,
    stats: &mut GenerateStats,
) {
    let batch_size = options.batch_size.max(1);
    for (index, batch) in queue.chunks(batch_size).enumerate() {
        if index > 0 && !options.batch_delay.is_zero() {
            thread::sleep(options.batch_delay);
        }

        let texts: Vec<String> = batch.iter().map(|(_, text)| text.to_string()).collect();
        debug!(language, size = texts.len(), translator = translator.name(), "translating batch");

        let translations = match translator.translate_batch(&texts, language) {
            Ok(translations) if translations.len() == texts.len() => Some(translations),
            Ok(translations) => {
                warn!(
                    language,
                    "{} returned {} translations for {} texts; using source text",
                    translator.name(),
                    translations.len(),
                    texts.len()
                );
                None
            }
            Err(err) => {
                warn!(language, "{} batch failed: {:#}; using source text", translator.name(), err);
                None
            }
        };

        for (position, (key, text)) in batch.iter().enumerate() {
            match translations.as_ref().map(|t| t[position].trim()) {
                Some(translated) if !translated.is_empty() => {
                    catalog.insert(*key, translated);
                    stats.translated += 1;
                }
                _ => {
                    catalog.insert(*key, *text);
                    stats.fallback += 1;
                }
            }
        }
    }
}
