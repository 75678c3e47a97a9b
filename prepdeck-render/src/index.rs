//! Site index page.

use prepdeck_core::catalog::Catalog;
use prepdeck_core::site::SiteConfig;

use crate::escape::{escape_attr, escape_text};
use crate::head::DocumentHead;
use crate::nav::link_base;
use crate::page::wrap_document;

/// Render the table of contents for a catalog.
#[must_use]
pub fn render_index(catalog: &Catalog, site: &SiteConfig) -> String {
    let mut head = DocumentHead::new(&site.site.title, &site.site.description)
        .with_lang(&site.site.lang);
    for (i, href) in site.stylesheets.iter().enumerate() {
        head.ensure_stylesheet(&format!("site-stylesheet-{i}"), href);
    }

    let base = link_base(site.site.base_url.as_deref());
    let mut body = Vec::new();
    body.push("<main>".to_string());
    body.push("<header>".to_string());
    body.push(format!("<h1>{}</h1>", escape_text(&site.site.title)));
    if !site.site.description.trim().is_empty() {
        body.push(format!("<p>{}</p>", escape_text(&site.site.description)));
    }
    body.push("</header>".to_string());

    if catalog.is_empty() {
        body.push("<p class=\"empty\">No lessons yet.</p>".to_string());
    }

    for topic in &catalog.topics {
        body.push(format!(
            "<section class=\"topic\" id=\"{}\">",
            escape_attr(&topic.id)
        ));
        body.push(format!("<h2>{}</h2>", escape_text(&topic.name)));
        body.push("<ul>".to_string());
        for entry in &topic.lessons {
            body.push(format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape_attr(&format!("{base}{}", entry.lesson.href())),
                escape_text(&entry.lesson.heading.subtopic)
            ));
        }
        body.push("</ul>".to_string());
        body.push("</section>".to_string());
    }
    body.push("</main>".to_string());

    wrap_document(&head, &body.join("\n"))
}
