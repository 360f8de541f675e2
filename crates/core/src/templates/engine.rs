use std::fmt;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext as HbsContext,
    Renderable, html_escape,
};
use regex::{Captures, Regex};
use thiserror::Error;

use crate::context::RenderContext;

/// Name the compiled document is registered under.
const DOCUMENT: &str = "document";

/// Handlebars' hook for `{{#NAME}}` blocks that name no registered helper.
const BLOCK_HELPER_MISSING: &str = "blockHelperMissing";

#[derive(Debug, Error)]
pub enum TemplateRenderError {
    #[error("invalid regex for template sections: {0}")]
    Regex(String),

    #[error("invalid template: {0}")]
    Parse(#[source] Box<handlebars::TemplateError>),

    #[error("failed to render template: {0}")]
    Render(#[source] Box<handlebars::RenderError>),

    #[error("'{{{{/{0}}}}}' closes a section that was never opened")]
    UnexpectedClose(String),
}

/// A compiled handlebars template, ready to render any number of times.
///
/// Beyond stock handlebars (`{{#if}}`, `{{#unless}}`, `{{else}}`,
/// `{{! }}`/`{{!-- --}}` comments, `{{{raw}}}`):
/// - mustache sections: `{{#BAPTISMS}}..{{/BAPTISMS}}` renders when the
///   variable is present, `{{^BAPTISMS}}..{{/BAPTISMS}}` when it is not
/// - text helpers: `{{upper SCRIPTURE}}`, `{{lower SCRIPTURE}}`, `{{trim SCRIPTURE}}`
///
/// Missing variables render as nothing.
pub struct Template {
    registry: Handlebars<'static>,
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template").finish_non_exhaustive()
    }
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateRenderError> {
        let source = expand_inverted_sections(source)?;

        let mut registry = Handlebars::new();
        registry.register_helper(BLOCK_HELPER_MISSING, Box::new(VariableSection));
        registry.register_helper("upper", Box::new(TextHelper(str::to_uppercase)));
        registry.register_helper("lower", Box::new(TextHelper(str::to_lowercase)));
        registry.register_helper("trim", Box::new(TextHelper(|s: &str| s.trim().to_string())));
        registry
            .register_template_string(DOCUMENT, &source)
            .map_err(|e| TemplateRenderError::Parse(Box::new(e)))?;

        Ok(Self { registry })
    }

    pub fn render(&self, ctx: &RenderContext) -> Result<String, TemplateRenderError> {
        self.registry
            .render(DOCUMENT, ctx)
            .map_err(|e| TemplateRenderError::Render(Box::new(e)))
    }
}

/// Parse and render in one step.
pub fn render_string(
    template: &str,
    ctx: &RenderContext,
) -> Result<String, TemplateRenderError> {
    Template::parse(template)?.render(ctx)
}

/// Rewrite mustache inverted sections into `{{#unless NAME}}..{{/unless}}`.
///
/// A bare `{{^}}` is handlebars' `else` and is left alone.
fn expand_inverted_sections(source: &str) -> Result<String, TemplateRenderError> {
    let re = Regex::new(r"\{\{(~?)\s*([#^/])\s*([^}~]*?)\s*(~?)\}\}")
        .map_err(|e| TemplateRenderError::Regex(e.to_string()))?;

    // One entry per open block: true when it was opened with `^`.
    let mut open: Vec<bool> = Vec::new();
    let mut stray: Option<String> = None;

    let expanded = re.replace_all(source, |caps: &Captures<'_>| {
        let whole = caps[0].to_string();
        let (pre, sigil, expr, post) = (&caps[1], &caps[2], &caps[3], &caps[4]);
        let name = expr.split_whitespace().next().unwrap_or("");

        match sigil {
            "^" if name.is_empty() => whole,
            "^" => {
                open.push(true);
                format!("{{{{{pre}#unless {name}{post}}}}}")
            }
            "#" => {
                open.push(false);
                whole
            }
            _ => match open.pop() {
                Some(true) => format!("{{{{{pre}/unless{post}}}}}"),
                Some(false) => whole,
                None => {
                    stray.get_or_insert_with(|| name.to_string());
                    whole
                }
            },
        }
    });
    let expanded = expanded.into_owned();

    match stray {
        Some(name) => Err(TemplateRenderError::UnexpectedClose(name)),
        None => Ok(expanded),
    }
}

/// `{{#NAME}}..{{else}}..{{/NAME}}` over a context variable.
struct VariableSection;

impl HelperDef for VariableSection {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut HbsContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let present = ctx
            .data()
            .get(h.name())
            .and_then(|v| v.as_str())
            .is_some_and(|v| !v.is_empty());

        let branch = if present { h.template() } else { h.inverse() };
        match branch {
            Some(t) => t.render(r, ctx, rc, out),
            None => Ok(()),
        }
    }
}

/// `{{helper NAME}}`: transform a variable's text, HTML-escaped.
struct TextHelper(fn(&str) -> String);

impl HelperDef for TextHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut HbsContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h.param(0).and_then(|p| p.value().as_str()).unwrap_or("");
        out.write(&html_escape(&(self.0)(value)))?;
        Ok(())
    }
}
