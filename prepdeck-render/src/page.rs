//! Lesson page assembly.
//!
//! Assembles the heading and content blocks of one lesson into a complete
//! HTML document. The body is rendered first so the head reflects every
//! resource a component asked for.

use prepdeck_core::lesson::Lesson;
use prepdeck_core::site::SiteConfig;

use crate::components::render_blocks;
use crate::context::RenderContext;
use crate::escape::{escape_attr, escape_text};
use crate::head::DocumentHead;
use crate::math::MathRenderer;
use crate::nav::Navigation;

/// Render a lesson to a standalone HTML document.
///
/// Cannot fail for a parsed lesson; malformed math degrades in place.
#[must_use]
pub fn render_lesson(lesson: &Lesson, site: &SiteConfig, renderer: &MathRenderer) -> String {
    render_lesson_with_nav(lesson, site, renderer, None)
}

/// Render a lesson page with links to the study plan and its neighbours.
#[must_use]
pub fn render_lesson_with_nav(
    lesson: &Lesson,
    site: &SiteConfig,
    renderer: &MathRenderer,
    nav: Option<&Navigation>,
) -> String {
    let head = DocumentHead::new(&lesson.metadata.title, &lesson.metadata.description)
        .with_lang(&site.site.lang);
    let mut ctx = RenderContext::new(renderer, head, &site.math.stylesheet_href);
    for (i, href) in site.stylesheets.iter().enumerate() {
        ctx.head_mut()
            .ensure_stylesheet(&format!("site-stylesheet-{i}"), href);
    }

    let mut body = Vec::new();

    // Heading
    body.push("<main>".to_string());
    body.push("<header>".to_string());
    body.push(format!("<h1>{}</h1>", escape_text(&lesson.heading.topic)));
    body.push(format!("<h2>{}</h2>", escape_text(&lesson.heading.subtopic)));
    body.push("</header>".to_string());
    if let Some(nav) = nav {
        body.extend(nav.render_menu());
    }

    // Content
    body.push(format!(
        "<article data-lesson=\"{}\">",
        escape_attr(&lesson.id)
    ));
    render_blocks(&mut body, &mut ctx, &lesson.blocks);
    body.push("</article>".to_string());
    if let Some(nav) = nav {
        body.extend(nav.render_pager());
    }
    body.push("</main>".to_string());

    let head = ctx.into_head();
    tracing::debug!(
        lesson = %lesson.id,
        blocks = lesson.blocks.len(),
        stylesheets = head.stylesheet_count(),
        "lesson rendered"
    );
    wrap_document(&head, &body.join("\n"))
}

/// Wrap a rendered body in an HTML5 document.
#[must_use]
pub fn wrap_document(head: &DocumentHead, body: &str) -> String {
    let mut sections = Vec::new();
    sections.push("<!DOCTYPE html>".to_string());
    sections.push(format!("<html lang=\"{}\">", escape_attr(&head.lang)));
    sections.push(head.render());
    sections.push("<body>".to_string());
    sections.push(body.to_string());
    sections.push("</body>".to_string());
    sections.push("</html>".to_string());
    let mut document = sections.join("\n");
    document.push('\n');
    document
}
