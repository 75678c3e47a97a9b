//! Per-document `<head>` state.
//!
//! Components attach the resources they need while the body is rendered;
//! the head is serialized afterwards. Stylesheets are keyed by a stable id so
//! any number of independent requests yield exactly one `<link>`.

use indexmap::IndexMap;

use crate::escape::{escape_attr, escape_text};

/// Head of one HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHead {
    /// Document language.
    pub lang: String,
    /// `<title>` text.
    pub title: String,
    /// Description meta tag; omitted when empty.
    pub description: String,
    stylesheets: IndexMap<String, String>,
}

impl DocumentHead {
    /// Creates a head with no stylesheets.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            lang: "en".to_string(),
            title: title.into(),
            description: description.into(),
            stylesheets: IndexMap::new(),
        }
    }

    /// Sets the document language.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Ensure a stylesheet with `id` is linked.
    ///
    /// Returns `true` if the link was added, `false` if `id` was already
    /// present (the existing href is kept).
    pub fn ensure_stylesheet(&mut self, id: &str, href: &str) -> bool {
        if self.stylesheets.contains_key(id) {
            return false;
        }
        tracing::trace!(id, href, "stylesheet attached");
        self.stylesheets.insert(id.to_string(), href.to_string());
        true
    }

    /// Returns `true` if a stylesheet with `id` is linked.
    #[must_use]
    pub fn has_stylesheet(&self, id: &str) -> bool {
        self.stylesheets.contains_key(id)
    }

    /// Number of linked stylesheets.
    #[must_use]
    pub fn stylesheet_count(&self) -> usize {
        self.stylesheets.len()
    }

    /// Serialize the `<head>` element.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push("<head>".to_string());
        lines.push("<meta charset=\"utf-8\">".to_string());
        lines.push(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">".to_string(),
        );
        lines.push(format!("<title>{}</title>", escape_text(&self.title)));
        if !self.description.trim().is_empty() {
            lines.push(format!(
                "<meta name=\"description\" content=\"{}\">",
                escape_attr(&self.description)
            ));
        }
        for (id, href) in &self.stylesheets {
            lines.push(format!(
                "<link rel=\"stylesheet\" id=\"{}\" href=\"{}\">",
                escape_attr(id),
                escape_attr(href)
            ));
        }
        lines.push("</head>".to_string());
        lines.join("\n")
    }
}
