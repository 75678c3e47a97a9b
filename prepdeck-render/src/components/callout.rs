//! Key-fact callout box.

use prepdeck_core::lesson::Callout;

use super::render_blocks;
use crate::context::RenderContext;
use crate::escape::escape_text;

/// Render a callout. Without a title the kind's default heading is shown.
pub fn render_callout(out: &mut Vec<String>, ctx: &mut RenderContext<'_>, callout: &Callout) {
    let title = callout
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| callout.kind.label());

    out.push(format!(
        "<aside class=\"callout callout-{}\">",
        callout.kind.as_str()
    ));
    out.push(format!(
        "<p class=\"callout-title\">{}</p>",
        escape_text(title)
    ));
    render_blocks(out, ctx, &callout.body);
    out.push("</aside>".to_string());
}
