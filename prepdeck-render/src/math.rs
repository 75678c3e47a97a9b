//! Math markup rendering.
//!
//! A [`MathRenderer`] turns a [`Formula`] into an accessible wrapper element
//! around the engine's HTML. It never fails: engine errors become an escaped
//! fallback so one bad formula cannot take a page down.

use crate::error::RenderError;
use crate::escape::{comment_safe, escape_attr, escape_text};

/// Stable id of the KaTeX stylesheet link in the document head.
pub const KATEX_STYLESHEET_ID: &str = "katex-stylesheet";

// ============================================================================
// Formula
// ============================================================================

/// A formula to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    /// TeX source.
    pub expr: String,
    /// Block presentation.
    pub display: bool,
    /// Accessible name.
    pub label: Option<String>,
}

impl Formula {
    /// An inline formula.
    #[must_use]
    pub fn inline(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            display: false,
            label: None,
        }
    }

    /// A display formula.
    #[must_use]
    pub fn block(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            display: true,
            label: None,
        }
    }

    /// Sets the accessible name.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Name announced by assistive technology: the label if given and
    /// non-empty, otherwise the raw formula.
    #[must_use]
    pub fn accessible_name(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.expr,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Converts TeX to HTML.
pub trait MathEngine {
    /// Render `expr` to an HTML fragment, best effort.
    ///
    /// # Errors
    ///
    /// Returns an error only when the engine itself fails; malformed TeX is
    /// rendered with the engine's error styling.
    fn render(&self, expr: &str, display: bool) -> Result<String, RenderError>;

    /// Parse `expr` strictly, in display or inline mode.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Math` with the parser message if `expr` is not
    /// valid TeX in that mode.
    fn check(&self, expr: &str, display: bool) -> Result<(), RenderError>;
}

/// The KaTeX engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct KatexEngine;

impl KatexEngine {
    fn convert(expr: &str, display: bool, throw_on_error: bool) -> Result<String, RenderError> {
        let opts = katex::Opts::builder()
            .display_mode(display)
            .throw_on_error(throw_on_error)
            .build()
            .map_err(|e| RenderError::Engine(e.to_string()))?;

        katex::render_with_opts(expr, &opts).map_err(|e| RenderError::Math {
            formula: expr.to_string(),
            message: e.to_string(),
        })
    }
}

impl MathEngine for KatexEngine {
    fn render(&self, expr: &str, display: bool) -> Result<String, RenderError> {
        Self::convert(expr, display, false)
    }

    fn check(&self, expr: &str, display: bool) -> Result<(), RenderError> {
        Self::convert(expr, display, true).map(|_| ())
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Tolerant formula renderer.
///
/// One renderer is shared by every page of a build.
pub struct MathRenderer {
    engine: Box<dyn MathEngine>,
}

impl MathRenderer {
    /// Renderer backed by KaTeX.
    #[must_use]
    pub fn katex() -> Self {
        Self::new(KatexEngine)
    }

    /// Renderer backed by a custom engine.
    #[must_use]
    pub fn new(engine: impl MathEngine + 'static) -> Self {
        Self {
            engine: Box::new(engine),
        }
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &dyn MathEngine {
        self.engine.as_ref()
    }

    /// Render a formula inside its accessible wrapper.
    ///
    /// The result is never empty. Identical input yields identical output.
    #[must_use]
    pub fn render(&self, formula: &Formula) -> String {
        let inner = match self.engine.render(&formula.expr, formula.display) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(formula = %formula.expr, error = %e, "math fallback");
                format!(
                    "<!-- {} --><code class=\"math-error\">{}</code>",
                    comment_safe(&e.to_string()),
                    escape_text(&formula.expr)
                )
            }
        };

        let (tag, class) = if formula.display {
            ("div", "math math-display")
        } else {
            ("span", "math math-inline")
        };

        format!(
            "<{tag} class=\"{class}\" role=\"math\" aria-label=\"{}\">{inner}</{tag}>",
            escape_attr(formula.accessible_name())
        )
    }
}

impl Default for MathRenderer {
    fn default() -> Self {
        Self::katex()
    }
}

impl std::fmt::Debug for MathRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MathRenderer").finish_non_exhaustive()
    }
}
