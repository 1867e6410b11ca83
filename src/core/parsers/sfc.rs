//! Splits a single-file component into its top-level blocks.

use anyhow::{Result, bail};

use super::markup::{StartTag, find_close_tag, parse_start_tag};

/// A top-level `<template>` or `<script>` block.
#[derive(Debug, Clone)]
pub struct Block {
    pub tag: StartTag,
    /// Byte range of the content between the start and end tags.
    pub content_start: usize,
    pub content_end: usize,
}

impl Block {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.tag.attribute(name).and_then(|a| a.value_text())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.tag.attribute(name).is_some()
    }

    pub fn content<'a>(&self, source: &'a str) -> &'a str {
        &source[self.content_start..self.content_end]
    }
}

#[derive(Debug, Default)]
pub struct SfcDescriptor {
    pub template: Option<Block>,
    /// At most two: `<script>` and `<script setup>`, in source order.
    pub scripts: Vec<Block>,
}

/// Locate the blocks of a component file. Styles and custom blocks are
/// skipped over but not returned.
pub fn parse_sfc(source: &str) -> Result<SfcDescriptor> {
    let bytes = source.as_bytes();
    let mut descriptor = SfcDescriptor::default();
    let mut pos = 0;

    while let Some(offset) = source[pos..].find('<') {
        let at = pos + offset;
        let rest = &source[at..];

        if rest.starts_with("<!--") {
            pos = match source[at + 4..].find("-->") {
                Some(i) => at + 4 + i + 3,
                None => break,
            };
            continue;
        }
        if !bytes.get(at + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            pos = at + 1;
            continue;
        }

        let tag = parse_start_tag(source, at);
        let name = tag.name.to_ascii_lowercase();
        if tag.self_closing {
            pos = tag.end;
            continue;
        }

        let content_start = tag.end;
        let content_end = if name == "template" {
            find_template_end(source, content_start)
        } else {
            find_close_tag(source, content_start, &name)
        };
        let Some(content_end) = content_end else {
            bail!("Unclosed <{}> block", name);
        };
        pos = source[content_end..]
            .find('>')
            .map_or(source.len(), |i| content_end + i + 1);

        let block = Block {
            tag,
            content_start,
            content_end,
        };
        match name.as_str() {
            "template" => {
                if descriptor.template.is_some() {
                    bail!("Component has more than one top-level <template>");
                }
                descriptor.template = Some(block);
            }
            "script" => {
                if descriptor.scripts.len() == 2 {
                    bail!("Component has more than two <script> blocks");
                }
                descriptor.scripts.push(block);
            }
            _ => {}
        }
    }

    Ok(descriptor)
}

/// Find the `</template>` matching a top-level `<template>`, counting nested
/// `<template>` elements.
fn find_template_end(source: &str, from: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 1usize;
    let mut pos = from;

    while let Some(offset) = source[pos..].find('<') {
        let at = pos + offset;
        let rest = &source[at..];

        if rest.starts_with("<!--") {
            pos = at + 4 + source[at + 4..].find("-->")? + 3;
        } else if is_tag_at(rest, "</template") {
            depth -= 1;
            if depth == 0 {
                return Some(at);
            }
            pos = at + "</template".len();
        } else if is_tag_at(rest, "<template") {
            let tag = parse_start_tag(source, at);
            if !tag.self_closing {
                depth += 1;
            }
            pos = tag.end;
        } else if bytes.get(at + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            // Skip over other start tags so `>` inside attribute values
            // cannot be mistaken for markup.
            pos = parse_start_tag(source, at).end;
        } else {
            pos = at + 1;
        }
    }
    None
}

fn is_tag_at(rest: &str, prefix: &str) -> bool {
    rest.len() >= prefix.len()
        && rest[..prefix.len()].eq_ignore_ascii_case(prefix)
        && rest
            .as_bytes()
            .get(prefix.len())
            .is_none_or(|b| b.is_ascii_whitespace() || matches!(*b, b'>' | b'/'))
}
