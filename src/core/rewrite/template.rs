//! Component template and single-file component rewriting.

use tracing::debug;

use super::edit::{Edit, apply_edits};
use super::script::{
    ExpressionCandidates, expression_candidates, insert_import, rewrite_script_region,
};
use super::{
    ExtractionCandidate, FragmentKind, RegionRewrite, RewriteContext, RewriteResult,
    apply_candidates, call_expr,
};
use crate::config::Config;
use crate::core::catalog::CatalogSink;
use crate::core::eligibility::is_eligible;
use crate::core::parsers::markup::{Attribute, Token, tokenize};
use crate::core::parsers::script::ScriptKind;
use crate::core::parsers::sfc::parse_sfc;

/// Rewrite the markup of a `<template>` block.
pub fn rewrite_template(
    markup: &str,
    config: &Config,
    sink: &mut dyn CatalogSink,
) -> RegionRewrite {
    let mut candidates = Vec::new();

    for token in tokenize(markup) {
        match token {
            Token::StartTag(tag) => {
                for attr in &tag.attributes {
                    attribute_candidates(attr, config, &mut candidates);
                }
            }
            Token::Text { start, end } => {
                text_candidates(markup, start, end, config, &mut candidates);
            }
            Token::EndTag => {}
        }
    }

    apply_candidates(markup, candidates, sink)
}

enum AttributeKind<'a> {
    Static,
    /// `:arg` or `v-bind:arg`
    Bound(&'a str),
    OtherDirective,
}

fn classify(name: &str) -> AttributeKind<'_> {
    if let Some(arg) = name.strip_prefix("v-bind:").or_else(|| name.strip_prefix(':'))
        && !arg.is_empty()
    {
        return AttributeKind::Bound(arg);
    }
    if name.starts_with("v-") || name.starts_with(['@', '#', ':']) {
        return AttributeKind::OtherDirective;
    }
    AttributeKind::Static
}

fn attribute_candidates(
    attr: &Attribute,
    config: &Config,
    candidates: &mut Vec<ExtractionCandidate>,
) {
    let Some(value) = &attr.value else {
        return;
    };

    let arg = match classify(&attr.name) {
        AttributeKind::OtherDirective => return,
        AttributeKind::Static => attr.name.as_str(),
        AttributeKind::Bound(arg) => match expression_candidates(&value.text, config) {
            ExpressionCandidates::Parsed(found) => {
                let single_quoted = value.quote == Some('\'');
                candidates.extend(found.into_iter().map(|mut candidate| {
                    candidate.start += value.start;
                    candidate.end += value.start;
                    if single_quoted {
                        candidate.replacement =
                            candidate.replacement.map(|r| r.replace('\'', "\""));
                    }
                    candidate
                }));
                return;
            }
            ExpressionCandidates::PlainText => arg,
        },
    };

    let text = value.text.trim();
    if !is_eligible(text, config) {
        return;
    }
    let call_name = &config.template_i18n_call;
    candidates.push(ExtractionCandidate::replaced(
        attr.start,
        attr.end,
        text,
        FragmentKind::AttributeValue,
        |key| format!(":{}=\"{}\"", arg, call_expr(call_name, key)),
    ));
}

/// Static segments of a text node, outside `{{ }}` interpolations.
fn static_segments(text: &str) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut outside_start = 0;

    loop {
        let Some(open) = text[outside_start..].find("{{").map(|i| outside_start + i) else {
            segments.push((outside_start, text.len()));
            break;
        };
        segments.push((outside_start, open));
        match text[open + 2..].find("}}") {
            Some(i) => outside_start = open + 2 + i + 2,
            // Unmatched: the rest of the node stays inside.
            None => break,
        }
    }
    segments
}

fn text_candidates(
    markup: &str,
    start: usize,
    end: usize,
    config: &Config,
    candidates: &mut Vec<ExtractionCandidate>,
) {
    let text = &markup[start..end];
    for (seg_start, seg_end) in static_segments(text) {
        let segment = &text[seg_start..seg_end];
        let trimmed = segment.trim();
        if !is_eligible(trimmed, config) {
            continue;
        }
        let lead = segment.len() - segment.trim_start().len();
        let abs_start = start + seg_start + lead;
        let call_name = &config.template_i18n_call;
        candidates.push(ExtractionCandidate::replaced(
            abs_start,
            abs_start + trimmed.len(),
            trimmed,
            FragmentKind::TextNode,
            |key| format!("{{{{ {} }}}}", call_expr(call_name, key)),
        ));
    }
}

/// Rewrite a whole single-file component.
///
/// Each script block is rewritten on its own; a syntax error in any of them
/// fails the file. Entries recorded before the failure are left in `sink`, so
/// callers pass a staged catalog and discard it on failure.
pub fn rewrite_component(
    source: &str,
    ctx: &RewriteContext,
    sink: &mut dyn CatalogSink,
) -> RewriteResult {
    let sfc = match parse_sfc(source) {
        Ok(sfc) => sfc,
        Err(err) => return RewriteResult::failed(source, err.to_string()),
    };

    let mut edits = Vec::new();
    let mut changes = 0;
    let mut rewritten_scripts = Vec::new();
    let mut has_import = false;

    for block in &sfc.scripts {
        if block.has_attr("src") {
            continue;
        }
        let Some(kind) = ScriptKind::from_lang(block.attr("lang")) else {
            debug!(lang = ?block.attr("lang"), "skipping script block");
            continue;
        };
        match rewrite_script_region(block.content(source), kind, ctx.config, sink) {
            Ok(rewrite) => {
                has_import |= rewrite.has_import;
                rewritten_scripts.push((block, rewrite.region));
            }
            Err(err) => {
                return RewriteResult::failed(source, format!("<script> block: {}", err));
            }
        }
    }

    // One import per component, in the first script that needs it.
    let mut import_pending = ctx.config.auto_import_i18n && !has_import;
    for (block, region) in rewritten_scripts {
        changes += region.changes;
        if region.replaced == 0 {
            continue;
        }
        let content = if import_pending {
            import_pending = false;
            insert_import(&region.content, ctx.config)
        } else {
            region.content
        };
        edits.push(Edit::new(block.content_start, block.content_end, content));
    }

    if let Some(template) = &sfc.template {
        let lang = template.attr("lang");
        if template.has_attr("src") || lang.is_some_and(|l| !l.eq_ignore_ascii_case("html")) {
            debug!(?lang, "skipping template block");
        } else {
            let region = rewrite_template(template.content(source), ctx.config, sink);
            changes += region.changes;
            if region.replaced > 0 {
                edits.push(Edit::new(
                    template.content_start,
                    template.content_end,
                    region.content,
                ));
            }
        }
    }

    // Blocks never overlap, so every edit applies.
    let (content, _) = apply_edits(source, edits);
    RewriteResult::ok(content, changes)
}
