use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use super::dispatch::FileKind;
use crate::config::Config;

/// Directories never descended into. Any other directory whose name starts
/// with `.` is skipped too.
pub const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "coverage",
    "out",
    "temp",
    "tmp",
    "vendor",
    "logs",
    "public",
    "static",
];

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards match as plain substrings of the path.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

enum ExcludePattern {
    Glob(Pattern),
    Substring(String),
}

impl ExcludePattern {
    fn matches(&self, relative_path: &str) -> bool {
        match self {
            Self::Glob(pattern) => pattern.matches(relative_path),
            Self::Substring(needle) => relative_path.contains(needle.as_str()),
        }
    }
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Supported files, sorted by path.
    pub files: Vec<PathBuf>,
    /// Entries that could not be read.
    pub skipped_count: usize,
}

pub fn scan_files(base_dir: &Path, exclude_patterns: &[String], config: &Config) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    let mut patterns = Vec::new();
    for p in exclude_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => patterns.push(ExcludePattern::Glob(pattern)),
                Err(e) => warn!("Invalid exclude pattern '{}': {}", p, e),
            }
        } else {
            patterns.push(ExcludePattern::Substring(p.replace('\\', "/")));
        }
    }

    let walker = WalkDir::new(base_dir)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                warn!("Cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path
            .strip_prefix(base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        if patterns.iter().any(|p| p.matches(&relative)) {
            continue;
        }

        if is_candidate_file(path, config) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

fn is_candidate_file(path: &Path, config: &Config) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    !config.is_excluded_extension(&format!(".{}", ext)) && FileKind::from_path(path).is_some()
}
