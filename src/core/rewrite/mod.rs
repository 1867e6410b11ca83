//! Source rewriting: find extractable text, record it, splice in calls.

pub mod edit;
pub mod script;
pub mod template;

use crate::config::Config;
use crate::core::catalog::{CatalogSink, RecordOutcome};
use crate::core::format::Formatter;
use crate::core::key::derive_key;

use tracing::debug;

use self::edit::{Edit, applicable, apply_edits};

pub use script::rewrite_script;
pub use template::{rewrite_component, rewrite_template};

/// Where an extracted fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// A string literal or expressionless template literal in script code.
    ScriptLiteral,
    /// An attribute value, in markup or JSX.
    AttributeValue,
    /// Text between tags, in markup or JSX.
    TextNode,
    /// A static part of a template literal with expressions. Recorded in the
    /// catalog but left in place.
    TemplateSegment,
}

/// One fragment found in a single parse pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionCandidate {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub kind: FragmentKind,
    pub key: String,
    /// Text spliced over `start..end`; `None` for record-only fragments.
    pub replacement: Option<String>,
}

impl ExtractionCandidate {
    /// A fragment replaced by `emit(key)`.
    pub fn replaced(
        start: usize,
        end: usize,
        text: impl Into<String>,
        kind: FragmentKind,
        emit: impl FnOnce(&str) -> String,
    ) -> Self {
        let text = text.into();
        let key = derive_key(&text);
        let replacement = Some(emit(&key));
        Self {
            start,
            end,
            text,
            kind,
            key,
            replacement,
        }
    }

    /// A fragment that is only recorded.
    pub fn recorded(text: impl Into<String>) -> Self {
        let text = text.into();
        let key = derive_key(&text);
        Self {
            start: 0,
            end: 0,
            text,
            kind: FragmentKind::TemplateSegment,
            key,
            replacement: None,
        }
    }
}

/// `{call}('{key}')`
pub fn call_expr(call_name: &str, key: &str) -> String {
    format!("{}('{}')", call_name, key)
}

/// Everything the rewriters need besides the text itself.
pub struct RewriteContext<'a> {
    pub config: &'a Config,
    pub formatter: &'a dyn Formatter,
}

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub success: bool,
    pub changes: usize,
    pub content: String,
    pub errors: Vec<String>,
}

impl RewriteResult {
    pub fn ok(content: String, changes: usize) -> Self {
        Self {
            success: true,
            changes,
            content,
            errors: Vec::new(),
        }
    }

    /// Failure that leaves the original text in place.
    pub fn failed(original: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            changes: 0,
            content: original.to_string(),
            errors: vec![error.into()],
        }
    }
}

/// Rewritten text of one region (a script block, a template, an attribute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRewrite {
    pub content: String,
    pub changes: usize,
    /// How many call sites were spliced in (record-only fragments excluded).
    pub replaced: usize,
}

/// Record every candidate into `sink` and splice the accepted ones into
/// `source`.
///
/// A candidate whose splice cannot apply (overlap, bad offsets) is neither
/// recorded nor counted. A candidate whose key already maps to different text
/// is left alone. Record-only candidates count as a change only when newly
/// added, so a second run over the same text reports nothing.
pub fn apply_candidates(
    source: &str,
    candidates: Vec<ExtractionCandidate>,
    sink: &mut dyn CatalogSink,
) -> RegionRewrite {
    let planned: Vec<Edit> = candidates
        .iter()
        .filter_map(|c| {
            c.replacement
                .as_ref()
                .map(|replacement| Edit::new(c.start, c.end, replacement.clone()))
        })
        .collect();
    let mut fits = applicable(source, &planned).into_iter();

    let mut edits = Vec::new();
    let mut recorded = 0;
    for candidate in candidates {
        if candidate.replacement.is_some() && !fits.next().unwrap_or(false) {
            debug!(
                kind = ?candidate.kind,
                start = candidate.start,
                end = candidate.end,
                "dropping candidate that cannot be spliced"
            );
            continue;
        }
        let outcome = sink.record(&candidate.key, &candidate.text);
        if outcome == RecordOutcome::Conflict {
            continue;
        }
        match candidate.replacement {
            Some(replacement) => edits.push(Edit::new(candidate.start, candidate.end, replacement)),
            None if outcome == RecordOutcome::Added => recorded += 1,
            None => {}
        }
    }

    let (content, replaced) = if edits.is_empty() {
        (source.to_string(), 0)
    } else {
        apply_edits(source, edits)
    };
    RegionRewrite {
        content,
        changes: replaced + recorded,
        replaced,
    }
}
