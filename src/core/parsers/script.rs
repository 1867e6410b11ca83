use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, GLOBALS, Globals, SourceMap, Span, Spanned};
use swc_ecma_ast::{Expr, Module};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Script dialect, chosen from a file extension or a `<script lang>` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// `.js`, `.jsx`, `.mjs`, `.cjs`
    JavaScript,
    /// `.ts`, `.mts`, `.cts`
    TypeScript,
    /// `.tsx`
    Tsx,
}

impl ScriptKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Kind for a component `<script lang="...">` block. No `lang` means JS.
    pub fn from_lang(lang: Option<&str>) -> Option<Self> {
        match lang.map(str::to_ascii_lowercase).as_deref() {
            None | Some("js") | Some("javascript") | Some("jsx") => Some(Self::JavaScript),
            Some("ts") | Some("typescript") => Some(Self::TypeScript),
            Some("tsx") => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Synthetic file extension, used when handing text to a formatter.
    pub fn extension(self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::TypeScript => "ts",
            Self::Tsx => "tsx",
        }
    }

    fn syntax(self) -> Syntax {
        match self {
            Self::JavaScript => Syntax::Es(EsSyntax {
                jsx: true,
                decorators: true,
                ..Default::default()
            }),
            Self::TypeScript => Syntax::Typescript(TsSyntax {
                decorators: true,
                ..Default::default()
            }),
            Self::Tsx => Syntax::Typescript(TsSyntax {
                tsx: true,
                decorators: true,
                ..Default::default()
            }),
        }
    }
}

/// Converts AST spans back into byte offsets of the text handed to the parser.
///
/// The source map drops a leading byte order mark, so spans start after it;
/// `skipped` adds it back.
#[derive(Debug, Clone, Copy)]
pub struct SpanOffsets {
    start: BytePos,
    skipped: usize,
}

impl SpanOffsets {
    pub fn range(self, span: Span) -> (usize, usize) {
        (
            (span.lo - self.start).0 as usize + self.skipped,
            (span.hi - self.start).0 as usize + self.skipped,
        )
    }
}

/// Split off a leading UTF-8 byte order mark.
fn split_bom(code: &str) -> (usize, &str) {
    match code.strip_prefix('\u{feff}') {
        Some(rest) => (code.len() - rest.len(), rest),
        None => (0, code),
    }
}

pub struct ParsedScript {
    pub module: Module,
    pub offsets: SpanOffsets,
}

pub struct ParsedExpr {
    pub expr: Box<Expr>,
    pub offsets: SpanOffsets,
}

/// Parse script source into a module.
///
/// Only syntax errors fail; the module need not type-check or resolve.
pub fn parse_script(code: &str, kind: ScriptKind) -> Result<ParsedScript> {
    let (skipped, body) = split_bom(code);
    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file =
            source_map.new_source_file(FileName::Anon.into(), body.to_string());

        let mut parser = Parser::new(kind.syntax(), StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse script: {:?}", e))?;

        Ok(ParsedScript {
            module,
            offsets: SpanOffsets {
                start: source_file.start_pos,
                skipped,
            },
        })
    })
}

/// Parse a single expression, such as the value of a bound template attribute.
///
/// Fails unless the expression covers the whole input.
pub fn parse_expression(code: &str) -> Result<ParsedExpr> {
    let (skipped, body) = split_bom(code);
    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file =
            source_map.new_source_file(FileName::Anon.into(), body.to_string());

        let syntax = Syntax::Typescript(TsSyntax::default());
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let expr = parser
            .parse_expr()
            .map_err(|e| anyhow!("Failed to parse expression: {:?}", e))?;
        if !parser.take_errors().is_empty() {
            return Err(anyhow!("expression has syntax errors"));
        }

        let parsed = ParsedExpr {
            expr,
            offsets: SpanOffsets {
                start: source_file.start_pos,
                skipped,
            },
        };
        let (_, end) = parsed.offsets.range(parsed.expr.span());
        if end != code.trim_end().len() {
            return Err(anyhow!("unexpected trailing input"));
        }
        Ok(parsed)
    })
}
