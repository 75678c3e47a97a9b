//! Links between lesson pages.
//!
//! Every built page links back to the study plan (the site index), lists
//! the subtopics of its topic, and points to the previous and next lesson
//! in catalog order.

use prepdeck_core::catalog::{Catalog, CatalogEntry};
use prepdeck_core::lesson::Lesson;
use prepdeck_core::site::SiteConfig;

use crate::escape::{escape_attr, escape_text};

/// Label of the link back to the site index.
pub const STUDY_PLAN_LABEL: &str = "Study plan";

/// A link to another page of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Link target.
    pub href: String,
    /// Link text.
    pub title: String,
    /// Whether the link points at the page being rendered.
    pub current: bool,
}

/// Navigation for one lesson page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Site index.
    pub index: String,
    /// Lesson before this one, across topics.
    pub previous: Option<NavLink>,
    /// Lesson after this one, across topics.
    pub next: Option<NavLink>,
    /// Every lesson of this lesson's topic, this one included.
    pub topic: Vec<NavLink>,
}

impl Navigation {
    /// Navigation for lesson `id`, or `None` if the catalog does not hold it.
    #[must_use]
    pub fn for_lesson(catalog: &Catalog, id: &str, site: &SiteConfig) -> Option<Self> {
        let ordered: Vec<&CatalogEntry> = catalog.lessons().collect();
        let position = ordered.iter().position(|e| e.lesson.id == id)?;
        let lesson = &ordered[position].lesson;
        let root = page_root(lesson, site.site.base_url.as_deref());

        let link = |entry: &CatalogEntry| NavLink {
            href: format!("{root}{}", entry.lesson.href()),
            title: entry.lesson.heading.subtopic.clone(),
            current: entry.lesson.id == id,
        };

        let topic = catalog
            .topics
            .iter()
            .find(|t| t.id == lesson.topic)
            .map(|t| t.lessons.iter().map(link).collect())
            .unwrap_or_default();

        Some(Self {
            index: format!("{root}index.html"),
            previous: position.checked_sub(1).map(|i| link(ordered[i])),
            next: ordered.get(position + 1).copied().map(link),
            topic,
        })
    }

    /// Lines for the study plan link and the topic's subtopic list.
    #[must_use]
    pub fn render_menu(&self) -> Vec<String> {
        let mut out = Vec::new();
        out.push("<nav class=\"lesson-nav\" aria-label=\"Lessons\">".to_string());
        out.push(format!(
            "<a class=\"study-plan\" href=\"{}\">{STUDY_PLAN_LABEL}</a>",
            escape_attr(&self.index)
        ));
        if !self.topic.is_empty() {
            out.push("<ol>".to_string());
            for link in &self.topic {
                let current = if link.current {
                    " aria-current=\"page\""
                } else {
                    ""
                };
                out.push(format!(
                    "<li><a href=\"{}\"{current}>{}</a></li>",
                    escape_attr(&link.href),
                    escape_text(&link.title)
                ));
            }
            out.push("</ol>".to_string());
        }
        out.push("</nav>".to_string());
        out
    }

    /// Lines for the previous and next links. Empty for a lone lesson.
    #[must_use]
    pub fn render_pager(&self) -> Vec<String> {
        if self.previous.is_none() && self.next.is_none() {
            return Vec::new();
        }
        let mut out = Vec::new();
        out.push("<nav class=\"lesson-pager\" aria-label=\"Previous and next\">".to_string());
        if let Some(link) = &self.previous {
            out.push(format!(
                "<a rel=\"prev\" href=\"{}\">{}</a>",
                escape_attr(&link.href),
                escape_text(&link.title)
            ));
        }
        if let Some(link) = &self.next {
            out.push(format!(
                "<a rel=\"next\" href=\"{}\">{}</a>",
                escape_attr(&link.href),
                escape_text(&link.title)
            ));
        }
        out.push("</nav>".to_string());
        out
    }
}

/// Prefix that reaches the output root from `lesson`'s page.
///
/// A base URL is used as is; without one the prefix climbs out of the
/// lesson's directories.
fn page_root(lesson: &Lesson, base_url: Option<&str>) -> String {
    match base_url {
        Some(_) => link_base(base_url),
        None => "../".repeat(lesson.id.matches('/').count()),
    }
}

/// Base URL with a trailing slash, or empty for relative links.
pub(crate) fn link_base(base_url: Option<&str>) -> String {
    match base_url {
        Some(base) if !base.is_empty() && !base.ends_with('/') => format!("{base}/"),
        Some(base) => base.to_string(),
        None => String::new(),
    }
}
