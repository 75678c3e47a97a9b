//! Lesson block components.
//!
//! Every component appends lines of HTML to the page buffer. Nested blocks
//! (callout bodies, sections, solutions) recurse through [`render_blocks`].

pub mod callout;
pub mod example_card;
pub mod image;
pub mod mcq;
pub mod table;

use prepdeck_core::lesson::{Block, ListBlock, MathBlock, Section};

use crate::context::RenderContext;
use crate::escape::{escape_attr, escape_text};
use crate::math::Formula;

/// Render blocks in order.
pub fn render_blocks(out: &mut Vec<String>, ctx: &mut RenderContext<'_>, blocks: &[Block]) {
    for block in blocks {
        render_block(out, ctx, block);
    }
}

fn render_block(out: &mut Vec<String>, ctx: &mut RenderContext<'_>, block: &Block) {
    match block {
        Block::Prose { text } => out.push(format!("<p>{}</p>", ctx.inline(text))),
        Block::List(list) => render_list(out, ctx, list),
        Block::Callout(callout) => callout::render_callout(out, ctx, callout),
        Block::Math(math) => out.push(render_math_block(ctx, math)),
        Block::Section(section) => render_section(out, ctx, section),
        Block::Mcq(question) => mcq::render_mcq(out, ctx, question),
        Block::Example(card) => example_card::render_example(out, ctx, card),
        Block::Table(table) => table::render_table(out, ctx, table),
        Block::Image(img) => image::render_image(out, ctx, img),
    }
}

fn render_list(out: &mut Vec<String>, ctx: &mut RenderContext<'_>, list: &ListBlock) {
    let tag = if list.ordered { "ol" } else { "ul" };
    out.push(format!("<{tag}>"));
    for item in &list.items {
        out.push(format!("<li>{}</li>", ctx.inline(item)));
    }
    out.push(format!("</{tag}>"));
}

fn render_math_block(ctx: &mut RenderContext<'_>, math: &MathBlock) -> String {
    ctx.math(&Formula {
        expr: math.expr.clone(),
        display: math.display,
        label: math.label.clone(),
    })
}

fn render_section(out: &mut Vec<String>, ctx: &mut RenderContext<'_>, section: &Section) {
    out.push(format!("<section id=\"{}\">", escape_attr(&section.anchor())));
    out.push(format!("<h3>{}</h3>", escape_text(&section.title)));
    render_blocks(out, ctx, &section.blocks);
    out.push("</section>".to_string());
}

/// Letter for the option at `index`: `A`, `B`, ... then numbers past `Z`.
#[must_use]
pub fn option_letter(index: usize) -> String {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or_else(|| (index + 1).to_string(), |i| char::from(b'A' + i).to_string())
}

/// Collapsible worked solution. Nothing is rendered for an empty solution.
pub(crate) fn render_solution(
    out: &mut Vec<String>,
    ctx: &mut RenderContext<'_>,
    class: &str,
    answer: Option<&str>,
    blocks: &[Block],
) {
    if blocks.is_empty() && answer.is_none() {
        return;
    }
    out.push(format!("<details class=\"{class}\">"));
    match answer {
        Some(answer) => out.push(format!(
            "<summary>Show solution (answer: {})</summary>",
            escape_text(answer)
        )),
        None => out.push("<summary>Show solution</summary>".to_string()),
    }
    render_blocks(out, ctx, blocks);
    out.push("</details>".to_string());
}
