//! Script rewriting over the swc AST.

use swc_ecma_ast::{
    CallExpr, Callee, ExportAll, Expr, ImportDecl, JSXAttr, JSXAttrValue, JSXText, Lit,
    MemberProp, Module, ModuleDecl, ModuleItem, NamedExport, PropName, Str, TaggedTpl, Tpl,
    TsEnumMember, TsExternalModuleRef, TsInterfaceDecl, TsModuleName, TsType,
};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::warn;

use super::{
    ExtractionCandidate, FragmentKind, RegionRewrite, RewriteContext, RewriteResult,
    apply_candidates, call_expr,
};
use crate::config::Config;
use crate::core::catalog::CatalogSink;
use crate::core::eligibility::is_eligible;
use crate::core::parsers::script::{ScriptKind, SpanOffsets, parse_expression, parse_script};
use crate::utils::contains_target_script;

/// A rewritten script region plus what the import step needs to know.
#[derive(Debug)]
pub struct ScriptRewrite {
    pub region: RegionRewrite,
    /// The source already imports the configured i18n module.
    pub has_import: bool,
}

/// Rewrite a standalone script file.
///
/// On a syntax error the original text comes back unchanged with
/// `success == false`.
pub fn rewrite_script(
    content: &str,
    kind: ScriptKind,
    ctx: &RewriteContext,
    sink: &mut dyn CatalogSink,
) -> RewriteResult {
    let rewrite = match rewrite_script_region(content, kind, ctx.config, sink) {
        Ok(rewrite) => rewrite,
        Err(err) => return RewriteResult::failed(content, err.to_string()),
    };

    let region = rewrite.region;
    if region.replaced == 0 {
        return RewriteResult::ok(region.content, region.changes);
    }

    let mut output = region.content;
    if ctx.config.auto_import_i18n && !rewrite.has_import {
        output = insert_import(&output, ctx.config);
    }

    let output = match ctx.formatter.format(&output, kind.extension()) {
        Ok(formatted) => formatted,
        Err(err) => {
            warn!("formatting failed, keeping unformatted output: {:#}", err);
            output
        }
    };
    RewriteResult::ok(output, region.changes)
}

/// Parse and rewrite one script region without touching imports.
pub fn rewrite_script_region(
    content: &str,
    kind: ScriptKind,
    config: &Config,
    sink: &mut dyn CatalogSink,
) -> anyhow::Result<ScriptRewrite> {
    let parsed = parse_script(content, kind)?;
    let has_import = imports_module(&parsed.module, &config.i18n_import_path);

    let mut collector = LiteralCollector::new(
        content,
        parsed.offsets,
        config,
        &config.script_i18n_call,
    );
    parsed.module.visit_with(&mut collector);

    Ok(ScriptRewrite {
        region: apply_candidates(content, collector.candidates, sink),
        has_import,
    })
}

/// Candidates found in a bound template expression.
pub enum ExpressionCandidates {
    /// Parsed; offsets are relative to the expression text.
    Parsed(Vec<ExtractionCandidate>),
    /// Not an expression at all, or a bare identifier spelled in the target
    /// script. The whole value should be treated as literal text.
    PlainText,
}

/// Collect string literals inside a template expression, emitting the
/// template call name.
pub fn expression_candidates(expression: &str, config: &Config) -> ExpressionCandidates {
    let Ok(parsed) = parse_expression(expression) else {
        return ExpressionCandidates::PlainText;
    };
    if let Expr::Ident(ident) = &*parsed.expr
        && contains_target_script(&ident.sym)
    {
        return ExpressionCandidates::PlainText;
    }

    let mut collector = LiteralCollector::new(
        expression,
        parsed.offsets,
        config,
        &config.template_i18n_call,
    );
    parsed.expr.visit_with(&mut collector);
    ExpressionCandidates::Parsed(collector.candidates)
}

/// Insert `import {binding} from '{path}';` at the top of `content`, after a
/// byte order mark, a shebang line or a single leading newline.
pub fn insert_import(content: &str, config: &Config) -> String {
    let statement = format!(
        "import {} from '{}';\n",
        config.import_binding(),
        config.i18n_import_path
    );

    let bom = if content.starts_with('\u{feff}') { '\u{feff}'.len_utf8() } else { 0 };
    let body = &content[bom..];
    let at = bom
        + if body.starts_with("#!") {
            body.find('\n').map_or(body.len(), |i| i + 1)
        } else if body.starts_with("\r\n") {
            2
        } else if body.starts_with('\n') {
            1
        } else {
            0
        };

    let mut output = String::with_capacity(content.len() + statement.len());
    output.push_str(&content[..at]);
    if at == content.len() && at > 0 && !content.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(&statement);
    output.push_str(&content[at..]);
    output
}

fn imports_module(module: &Module, path: &str) -> bool {
    module.body.iter().any(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => decl.src.value.as_str() == Some(path),
        _ => false,
    })
}

/// Dotted path of a callee, e.g. `i18n.global.t` or `this.$t`.
fn callee_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::This(_) => Some("this".to_string()),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            Some(format!("{}.{}", callee_path(&member.obj)?, prop.sym))
        }
        Expr::Paren(paren) => callee_path(&paren.expr),
        _ => None,
    }
}

/// Collects extraction candidates in one pass over a module or expression.
struct LiteralCollector<'a> {
    source: &'a str,
    offsets: SpanOffsets,
    config: &'a Config,
    /// Call name emitted at replaced sites.
    call_name: &'a str,
    candidates: Vec<ExtractionCandidate>,
}

impl<'a> LiteralCollector<'a> {
    fn new(source: &'a str, offsets: SpanOffsets, config: &'a Config, call_name: &'a str) -> Self {
        Self {
            source,
            offsets,
            config,
            call_name,
            candidates: Vec::new(),
        }
    }

    /// Whether `path` is one of the configured translation calls.
    fn is_translation_call(&self, path: &str) -> bool {
        let path = path.strip_prefix("this.").unwrap_or(path);
        path == self.config.script_i18n_call || path == self.config.template_i18n_call
    }

    fn push_literal(&mut self, span: swc_common::Span, text: &str, kind: FragmentKind) {
        if !is_eligible(text, self.config) {
            return;
        }
        let (start, end) = self.offsets.range(span);
        let call_name = self.call_name;
        let jsx = kind != FragmentKind::ScriptLiteral;
        self.candidates
            .push(ExtractionCandidate::replaced(start, end, text, kind, |key| {
                let call = call_expr(call_name, key);
                if jsx { format!("{{{}}}", call) } else { call }
            }));
    }

    fn record_segments(&mut self, tpl: &Tpl) {
        for quasi in &tpl.quasis {
            if let Some(cooked) = &quasi.cooked
                && let Some(value) = cooked.as_str()
                && is_eligible(value, self.config)
            {
                self.candidates
                    .push(ExtractionCandidate::recorded(value.trim()));
            }
        }
    }

    /// A plain literal as the direct first argument, e.g. the `'key'` in
    /// `t('key')`.
    fn is_literal_arg(expr: &Expr) -> bool {
        match expr {
            Expr::Lit(Lit::Str(_)) => true,
            Expr::Tpl(tpl) => tpl.exprs.is_empty(),
            _ => false,
        }
    }
}

impl Visit for LiteralCollector<'_> {
    fn visit_str(&mut self, node: &Str) {
        if let Some(value) = node.value.as_str() {
            self.push_literal(node.span, value, FragmentKind::ScriptLiteral);
        }
    }

    fn visit_tpl(&mut self, node: &Tpl) {
        if node.exprs.is_empty() {
            if let Some(value) = node
                .quasis
                .first()
                .and_then(|q| q.cooked.as_ref())
                .and_then(|c| c.as_str())
            {
                self.push_literal(node.span, value, FragmentKind::ScriptLiteral);
            }
            return;
        }
        self.record_segments(node);
        for expr in &node.exprs {
            expr.visit_with(self);
        }
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        node.tag.visit_with(self);
        self.record_segments(&node.tpl);
        for expr in &node.tpl.exprs {
            expr.visit_with(self);
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        let callee = match &node.callee {
            // Module specifiers: `import('./x')`.
            Callee::Import(_) => return,
            Callee::Super(_) => None,
            Callee::Expr(expr) => Some(expr),
        };
        let path = callee.and_then(|expr| callee_path(expr));

        if path.as_deref() == Some("require") {
            return;
        }
        let skip_first = path.is_some_and(|p| self.is_translation_call(&p))
            && node
                .args
                .first()
                .is_some_and(|arg| arg.spread.is_none() && Self::is_literal_arg(&arg.expr));

        if let Some(expr) = callee {
            expr.visit_with(self);
        }
        for arg in node.args.iter().skip(usize::from(skip_first)) {
            arg.visit_with(self);
        }
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        match &node.value {
            Some(JSXAttrValue::Str(s)) => {
                if let Some(value) = s.value.as_str() {
                    self.push_literal(s.span, value, FragmentKind::AttributeValue);
                }
            }
            Some(value) => value.visit_with(self),
            None => {}
        }
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        let (start, end) = self.offsets.range(node.span);
        let Some(raw) = self.source.get(start..end) else {
            return;
        };
        let trimmed = raw.trim();
        if !is_eligible(trimmed, self.config) {
            return;
        }

        let lead = raw.len() - raw.trim_start().len();
        let trimmed_start = start + lead;
        let call_name = self.call_name;
        self.candidates.push(ExtractionCandidate::replaced(
            trimmed_start,
            trimmed_start + trimmed.len(),
            trimmed,
            FragmentKind::TextNode,
            |key| format!("{{{}}}", call_expr(call_name, key)),
        ));
    }

    // Positions where a call expression would not be valid syntax.

    fn visit_import_decl(&mut self, _: &ImportDecl) {}

    fn visit_named_export(&mut self, _: &NamedExport) {}

    fn visit_export_all(&mut self, _: &ExportAll) {}

    fn visit_ts_type(&mut self, _: &TsType) {}

    fn visit_ts_interface_decl(&mut self, _: &TsInterfaceDecl) {}

    fn visit_ts_enum_member(&mut self, _: &TsEnumMember) {}

    fn visit_ts_module_name(&mut self, _: &TsModuleName) {}

    fn visit_ts_external_module_ref(&mut self, _: &TsExternalModuleRef) {}

    fn visit_prop_name(&mut self, node: &PropName) {
        if let PropName::Computed(computed) = node {
            computed.expr.visit_with(self);
        }
    }
}
