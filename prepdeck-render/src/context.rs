//! Per-page render state.

use prepdeck_core::lesson::{Inline, Span};

use crate::escape::escape_text;
use crate::head::DocumentHead;
use crate::math::{Formula, KATEX_STYLESHEET_ID, MathRenderer};

/// State for rendering one document.
///
/// Owns the document head, so resources requested while rendering the body
/// land in this page only.
#[derive(Debug)]
pub struct RenderContext<'a> {
    renderer: &'a MathRenderer,
    head: DocumentHead,
    katex_href: String,
}

impl<'a> RenderContext<'a> {
    /// Creates a context for a new document.
    #[must_use]
    pub fn new(renderer: &'a MathRenderer, head: DocumentHead, katex_href: &str) -> Self {
        Self {
            renderer,
            head,
            katex_href: katex_href.to_string(),
        }
    }

    /// Render a formula and make sure the KaTeX stylesheet is linked.
    pub fn math(&mut self, formula: &Formula) -> String {
        self.head
            .ensure_stylesheet(KATEX_STYLESHEET_ID, &self.katex_href);
        self.renderer.render(formula)
    }

    /// Render inline markup.
    pub fn inline(&mut self, inline: &Inline) -> String {
        inline
            .spans()
            .iter()
            .map(|span| match span {
                Span::Text { text } => escape_text(text),
                Span::Strong { strong } => format!("<strong>{}</strong>", self.inline(strong)),
                Span::Emphasis { emphasis } => format!("<em>{}</em>", self.inline(emphasis)),
                Span::Math { math, label } => self.math(&Formula {
                    expr: math.clone(),
                    display: false,
                    label: label.clone(),
                }),
            })
            .collect()
    }

    /// The document head.
    #[must_use]
    pub const fn head(&self) -> &DocumentHead {
        &self.head
    }

    /// Mutable access to the document head.
    pub const fn head_mut(&mut self) -> &mut DocumentHead {
        &mut self.head
    }

    /// Finish rendering and take the head.
    #[must_use]
    pub fn into_head(self) -> DocumentHead {
        self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::math::MathEngine;

    struct EchoEngine;

    impl MathEngine for EchoEngine {
        fn render(&self, expr: &str, _display: bool) -> Result<String, RenderError> {
            Ok(format!("[{expr}]"))
        }

        fn check(&self, _expr: &str, _display: bool) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn test_math_attaches_stylesheet_once() {
        let renderer = MathRenderer::new(EchoEngine);
        let mut ctx = RenderContext::new(&renderer, DocumentHead::new("t", ""), "/k.css");
        for _ in 0..3 {
            ctx.math(&Formula::inline("x"));
        }
        let head = ctx.into_head();
        assert_eq!(head.stylesheet_count(), 1);
        assert!(head.has_stylesheet(KATEX_STYLESHEET_ID));
    }

    #[test]
    fn test_no_math_no_stylesheet() {
        let renderer = MathRenderer::new(EchoEngine);
        let mut ctx = RenderContext::new(&renderer, DocumentHead::new("t", ""), "/k.css");
        let html = ctx.inline(&Inline::from("plain & simple"));
        assert_eq!(html, "plain &amp; simple");
        assert_eq!(ctx.head().stylesheet_count(), 0);
    }

    #[test]
    fn test_inline_markup() {
        let renderer = MathRenderer::new(EchoEngine);
        let mut ctx = RenderContext::new(&renderer, DocumentHead::new("t", ""), "/k.css");
        let html = ctx.inline(&Inline::from("If $x<0$, **never** \\$5"));
        assert!(html.starts_with("If <span class=\"math math-inline\""));
        assert!(html.contains("[x<0]"));
        assert!(html.contains("aria-label=\"x&lt;0\""));
        assert!(html.contains("<strong>never</strong>"));
        assert!(html.ends_with(" $5"));
    }

    #[test]
    fn test_math_inside_strong_is_typeset() {
        let renderer = MathRenderer::new(EchoEngine);
        let mut ctx = RenderContext::new(&renderer, DocumentHead::new("t", ""), "/k.css");
        let html = ctx.inline(&Inline::from("**Answer: $x=12$** and *only* that"));
        assert!(html.starts_with("<strong>Answer: <span class=\"math math-inline\""));
        assert!(html.contains("aria-label=\"x=12\">[x=12]</span></strong>"));
        assert!(html.contains("<em>only</em>"));
        assert!(!html.contains('$'));
        assert!(ctx.head().has_stylesheet(KATEX_STYLESHEET_ID));
    }

    #[test]
    fn test_explicit_label_on_span() {
        let renderer = MathRenderer::new(EchoEngine);
        let mut ctx = RenderContext::new(&renderer, DocumentHead::new("t", ""), "/k.css");
        let inline = Inline::Spans(vec![Span::Math {
            math: "x^2".to_string(),
            label: Some("x squared".to_string()),
        }]);
        assert!(ctx.inline(&inline).contains("aria-label=\"x squared\""));
    }
}
