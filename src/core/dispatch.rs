//! Per-file processing: pick a rewriter, commit catalog entries, write back.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::catalog::{Catalog, CatalogStore};
use super::parsers::script::ScriptKind;
use super::rewrite::{RewriteContext, RewriteResult, rewrite_component, rewrite_script};

/// What kind of source a file holds, from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Script(ScriptKind),
    /// Single-file component (`.vue`).
    Component,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "vue" {
            return Some(Self::Component);
        }
        ScriptKind::from_extension(&ext).map(Self::Script)
    }
}

/// Rewrite one file in place.
///
/// Catalog entries are staged while the file is processed. Only when the
/// file succeeds with changes are they committed and the catalog saved, and
/// only after that save is the source overwritten. Every failure ends up in
/// `errors`; nothing here panics or aborts a batch.
pub fn process_file(path: &Path, ctx: &RewriteContext, store: &mut CatalogStore) -> RewriteResult {
    let original = match check_and_read(path, ctx) {
        Ok(content) => content,
        Err(err) => return RewriteResult::failed("", format!("{:#}", err)),
    };
    let Some(kind) = FileKind::from_path(path) else {
        return RewriteResult::failed(&original, "Unsupported file type");
    };

    let (result, staged) = {
        let mut staged = store.stage();
        let result = match kind {
            FileKind::Script(script) => rewrite_script(&original, script, ctx, &mut staged),
            FileKind::Component => rewrite_component(&original, ctx, &mut staged),
        };
        (result, staged.into_entries())
    };

    if !result.success || result.changes == 0 {
        return result;
    }

    if let Err(err) = commit_and_write(path, &original, &result, staged, store) {
        return RewriteResult::failed(&original, format!("{:#}", err));
    }
    result
}

fn check_and_read(path: &Path, ctx: &RewriteContext) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }
    if let Some(ext) = path.extension().and_then(|e| e.to_str())
        && ctx.config.is_excluded_extension(&format!(".{}", ext))
    {
        anyhow::bail!("Excluded file type: .{}", ext);
    }
    if FileKind::from_path(path).is_none() {
        anyhow::bail!("Unsupported file type: {}", path.display());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn commit_and_write(
    path: &Path,
    original: &str,
    result: &RewriteResult,
    staged: Catalog,
    store: &mut CatalogStore,
) -> Result<()> {
    let added = store.commit_and_save(staged)?;
    if added > 0 {
        debug!(added, catalog = %store.path().display(), "catalog updated");
    }
    if result.content != original {
        fs::write(path, &result.content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
    }
    Ok(())
}
