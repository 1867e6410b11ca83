pub mod batch;
pub mod config;
pub mod generate;
pub mod init;
pub mod scan;
pub mod switch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::args::CommonArgs;
use super::exit_status::ExitStatus;
use super::report::{self, RunSummary};
use crate::config::{Config, load_config};
use crate::core::catalog::CatalogStore;
use crate::core::format::formatter_from_config;
use crate::core::{RewriteContext, process_file};

/// A loaded project: where it lives and how it is configured.
pub struct Project {
    /// Directory catalog paths are resolved against: the directory holding
    /// the config file, or `--root` when running on defaults.
    pub root: PathBuf,
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl Project {
    pub fn load(common: &CommonArgs) -> Result<Self> {
        // Absolute, so the config search can walk past the working directory.
        let start = std::path::absolute(&common.root)
            .with_context(|| format!("Invalid root: {}", common.root.display()))?;
        let loaded = load_config(&start)?;
        let root = loaded
            .path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or(start);
        debug!(root = %root.display(), from_file = loaded.from_file, "project loaded");
        Ok(Self {
            root,
            config: loaded.config,
            config_path: loaded.path,
        })
    }

    pub fn locale_dir(&self) -> PathBuf {
        self.config.locale_dir(&self.root)
    }

    pub fn base_store(&self) -> CatalogStore {
        CatalogStore::open(&self.locale_dir(), &self.config.base_language)
    }
}

/// Rewrite `files` one after another against the base catalog, printing a
/// line per file and a closing summary.
pub(super) fn process_files(project: &Project, files: &[PathBuf]) -> ExitStatus {
    let formatter = formatter_from_config(&project.config);
    let ctx = RewriteContext {
        config: &project.config,
        formatter: formatter.as_ref(),
    };
    let mut store = project.base_store();
    let mut summary = RunSummary::default();

    for file in files {
        let result = process_file(file, &ctx, &mut store);
        report::print_file_result(file, &result);
        summary.add(&result);
    }

    report::print_summary(&summary, store.path());
    ExitStatus::from_counts(summary.succeeded, summary.attempted())
}
