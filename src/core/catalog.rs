//! Per-language key/text catalogs.
//!
//! A catalog is a flat JSON object (`{"i18n-auto-7eca689f": "你好"}`) stored as
//! `{locale_dir}/{language}.json`. Rewriters never write to the store directly:
//! they record into a [`CatalogSink`], normally a [`StagedCatalog`] that is
//! committed once the whole file has been processed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Outcome of recording one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The key was not known before.
    Added,
    /// The key already maps to the same text.
    Existing,
    /// The key already maps to different text; the old value is kept.
    Conflict,
}

/// Anything the rewriters can record extracted text into.
pub trait CatalogSink {
    fn record(&mut self, key: &str, text: &str) -> RecordOutcome;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Map<String, Value>);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a catalog file. The root must be a JSON object.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => bail!("Root of catalog must be an object: {}", path.display()),
        }
    }

    /// Write with 2-space indentation and a trailing newline, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(&self.0).context("Failed to serialize JSON")?;

        fs::write(path, format!("{}\n", content))
            .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

        Ok(())
    }

    /// String value for `key`. Non-string values read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.0.insert(key.into(), Value::String(text.into()));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.as_str(), s)))
    }

    /// Copy every entry of `other` whose key is not present yet.
    /// Returns how many entries were added.
    pub fn merge_missing(&mut self, other: &Catalog) -> usize {
        let mut added = 0;
        for (key, value) in &other.0 {
            if !self.0.contains_key(key) {
                self.0.insert(key.clone(), value.clone());
                added += 1;
            }
        }
        added
    }
}

fn compare_existing(key: &str, existing: &Value, text: &str) -> RecordOutcome {
    match existing.as_str() {
        Some(value) if value == text => RecordOutcome::Existing,
        // An empty placeholder is filled rather than treated as a clash.
        Some(value) if value.trim().is_empty() => RecordOutcome::Added,
        _ => {
            warn!(key, text, "catalog key already maps to different text; keeping existing value");
            RecordOutcome::Conflict
        }
    }
}

impl CatalogSink for Catalog {
    fn record(&mut self, key: &str, text: &str) -> RecordOutcome {
        let outcome = match self.0.get(key) {
            None => RecordOutcome::Added,
            Some(existing) => compare_existing(key, existing, text),
        };
        if outcome == RecordOutcome::Added {
            self.insert(key, text);
        }
        outcome
    }
}

/// The base-language catalog of a project, bound to its file.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    catalog: Catalog,
}

impl CatalogStore {
    /// Open `{locale_dir}/{language}.json`.
    ///
    /// A missing file yields an empty catalog. An unreadable or corrupt file
    /// also yields an empty catalog, with a warning, so extraction can proceed.
    pub fn open(locale_dir: &Path, language: &str) -> Self {
        let path = catalog_path(locale_dir, language);
        let catalog = if path.exists() {
            match Catalog::load(&path) {
                Ok(catalog) => catalog,
                Err(err) => {
                    warn!("{:#}; starting from an empty catalog", err);
                    Catalog::new()
                }
            }
        } else {
            Catalog::new()
        };
        Self { path, catalog }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Start staging entries for one file.
    pub fn stage(&self) -> StagedCatalog<'_> {
        StagedCatalog {
            base: &self.catalog,
            staged: Catalog::new(),
        }
    }

    /// Merge staged entries. Returns how many keys were added.
    pub fn commit(&mut self, staged: Catalog) -> usize {
        let mut added = 0;
        for (key, text) in staged.entries() {
            match self.catalog.get(key) {
                Some(existing) if !existing.trim().is_empty() => {}
                _ => {
                    self.catalog.insert(key, text);
                    added += 1;
                }
            }
        }
        added
    }

    pub fn save(&self) -> Result<()> {
        self.catalog.save(&self.path)
    }

    /// Commit staged entries and persist them. If the write fails the
    /// in-memory catalog is rolled back as well.
    pub fn commit_and_save(&mut self, staged: Catalog) -> Result<usize> {
        let previous = self.catalog.clone();
        let added = self.commit(staged);
        if added > 0
            && let Err(err) = self.save()
        {
            self.catalog = previous;
            return Err(err);
        }
        Ok(added)
    }
}

impl CatalogSink for CatalogStore {
    fn record(&mut self, key: &str, text: &str) -> RecordOutcome {
        self.catalog.record(key, text)
    }
}

/// Entries recorded while processing a single file.
///
/// Lookups consult the store's catalog first, so a key already on disk reads
/// as [`RecordOutcome::Existing`] without being staged again.
pub struct StagedCatalog<'a> {
    base: &'a Catalog,
    staged: Catalog,
}

impl StagedCatalog<'_> {
    pub fn into_entries(self) -> Catalog {
        self.staged
    }
}

impl CatalogSink for StagedCatalog<'_> {
    fn record(&mut self, key: &str, text: &str) -> RecordOutcome {
        if let Some(existing) = self.base.0.get(key) {
            let outcome = compare_existing(key, existing, text);
            if outcome != RecordOutcome::Added {
                return outcome;
            }
        }
        self.staged.record(key, text)
    }
}

static LANGUAGE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").unwrap());

/// Whether `language` looks like a language tag (`en`, `zh-TW`, `yue`).
/// Catalog file names are built from it, so anything else is rejected.
pub fn is_language_code(language: &str) -> bool {
    LANGUAGE_CODE.is_match(language)
}

pub fn catalog_path(locale_dir: &Path, language: &str) -> PathBuf {
    locale_dir.join(format!("{}.json", language))
}

/// Languages with a catalog file in `locale_dir`, sorted by name.
pub fn list_languages(locale_dir: &Path) -> Result<Vec<String>> {
    if !locale_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut languages = Vec::new();
    let entries = fs::read_dir(locale_dir)
        .with_context(|| format!("Failed to read directory: {}", locale_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            languages.push(stem.to_string());
        }
    }
    languages.sort();
    Ok(languages)
}
