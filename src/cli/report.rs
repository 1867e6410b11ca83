//! Report formatting and printing utilities.
//!
//! Kept apart from the engine so i18n-auto can be used as a library. Every
//! printer has a `_to` variant taking a writer, used by the tests.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{GeneratedCatalog, RewriteResult};
use crate::utils::truncate_to_width;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum display width of a value in catalog previews.
const PREVIEW_VALUE_WIDTH: usize = 40;

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

/// Totals over a run of `scan` or `batch`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub changes: usize,
    /// Files whose content was rewritten.
    pub modified: usize,
}

impl RunSummary {
    pub fn add(&mut self, result: &RewriteResult) {
        if result.success {
            self.succeeded += 1;
            self.changes += result.changes;
            if result.changes > 0 {
                self.modified += 1;
            }
        } else {
            self.failed += 1;
        }
    }

    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// One line per processed file; failures list their errors below.
pub fn print_file_result(path: &Path, result: &RewriteResult) {
    print_file_result_to(path, result, &mut io::stdout().lock());
}

pub fn print_file_result_to<W: Write>(path: &Path, result: &RewriteResult, writer: &mut W) {
    let path = path.display().to_string();
    if !result.success {
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), path.red());
        for error in &result.errors {
            let _ = writeln!(writer, "    {} {}", "error:".bold().red(), error);
        }
        return;
    }

    if result.changes == 0 {
        let _ = writeln!(writer, "  {} {}", path.dimmed(), "(no changes)".dimmed());
    } else {
        let _ = writeln!(
            writer,
            "{} {} ({} {})",
            SUCCESS_MARK.green(),
            path,
            result.changes,
            plural(result.changes, "change", "changes")
        );
    }
}

pub fn print_summary(summary: &RunSummary, catalog: &Path) {
    print_summary_to(summary, catalog, &mut io::stdout().lock());
}

pub fn print_summary_to<W: Write>(summary: &RunSummary, catalog: &Path, writer: &mut W) {
    let attempted = summary.attempted();
    let head = format!(
        "Processed {} {}: {} succeeded, {} failed",
        attempted,
        plural(attempted, "file", "files"),
        summary.succeeded,
        summary.failed
    );
    let head = if summary.failed == 0 {
        format!("{} {}", SUCCESS_MARK.green(), head.green())
    } else {
        format!("{} {}", FAILURE_MARK.yellow(), head.yellow())
    };
    let _ = writeln!(writer, "{}", head);

    if summary.changes > 0 {
        let _ = writeln!(
            writer,
            "  {} {} in {} {}, catalog: {}",
            summary.changes,
            plural(summary.changes, "replacement", "replacements"),
            summary.modified,
            plural(summary.modified, "file", "files"),
            catalog.display().to_string().cyan()
        );
    }
}

pub fn print_generated(generated: &GeneratedCatalog, path: &Path) {
    print_generated_to(generated, path, &mut io::stdout().lock());
}

pub fn print_generated_to<W: Write>(generated: &GeneratedCatalog, path: &Path, writer: &mut W) {
    let stats = &generated.stats;
    let mut parts = vec![
        format!("{} preserved", stats.preserved),
        format!("{} translated", stats.translated),
    ];
    if stats.fallback > 0 {
        parts.push(format!("{} fallback", stats.fallback).yellow().to_string());
    }
    if stats.untranslated > 0 {
        parts.push(format!("{} untranslated", stats.untranslated));
    }

    let _ = writeln!(
        writer,
        "{} {} {}",
        SUCCESS_MARK.green(),
        format!("[{}]", generated.language).bold(),
        path.display()
    );
    let _ = writeln!(writer, "    {}", parts.join(", "));
}

/// Available catalogs, base language first marked.
pub fn print_languages(languages: &[String], base: &str) {
    print_languages_to(languages, base, &mut io::stdout().lock());
}

pub fn print_languages_to<W: Write>(languages: &[String], base: &str, writer: &mut W) {
    if languages.is_empty() {
        let _ = writeln!(writer, "No catalogs found. Run {} first.", "i18n-auto scan".cyan());
        return;
    }

    let _ = writeln!(writer, "Available catalogs:");
    for language in languages {
        if language == base {
            let _ = writeln!(writer, "  {} {}", language.bold(), "(base)".dimmed());
        } else {
            let _ = writeln!(writer, "  {}", language);
        }
    }
}

/// Preview of a catalog: progress line and the first entries.
pub struct CatalogPreview<'a> {
    pub language: &'a str,
    pub total: usize,
    pub translated: usize,
    pub entries: Vec<(&'a str, &'a str)>,
}

pub fn print_preview(preview: &CatalogPreview) {
    print_preview_to(preview, &mut io::stdout().lock());
}

pub fn print_preview_to<W: Write>(preview: &CatalogPreview, writer: &mut W) {
    let percent = if preview.total == 0 {
        100
    } else {
        preview.translated * 100 / preview.total
    };
    let _ = writeln!(
        writer,
        "{} {}/{} translated ({}%)",
        format!("[{}]", preview.language).bold(),
        preview.translated,
        preview.total,
        percent
    );

    let key_width = preview
        .entries
        .iter()
        .map(|(key, _)| key.width())
        .max()
        .unwrap_or(0);
    for (key, value) in &preview.entries {
        let padding = " ".repeat(key_width - key.width());
        let value = if value.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            truncate_to_width(value, PREVIEW_VALUE_WIDTH)
        };
        let _ = writeln!(writer, "  {}{}  {}", key.cyan(), padding, value);
    }
}
