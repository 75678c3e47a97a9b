//! Worked example card.
//!
//! Cards with a correct letter are Data Sufficiency drills and list the five
//! standard answer choices under the statements.

use prepdeck_core::lesson::ExampleCard;
use prepdeck_core::lesson::schema::DATA_SUFFICIENCY_CHOICES;

use super::render_solution;
use crate::context::RenderContext;
use crate::escape::escape_text;

/// Render an example card.
pub fn render_example(out: &mut Vec<String>, ctx: &mut RenderContext<'_>, card: &ExampleCard) {
    out.push("<section class=\"example-card\">".to_string());

    let title = match card.number {
        Some(n) => format!("Example {n}: {}", card.title),
        None => card.title.clone(),
    };
    out.push(format!(
        "<h4 class=\"example-title\">{}</h4>",
        escape_text(&title)
    ));

    if !card.statements.is_empty() {
        out.push("<div class=\"example-statements\">".to_string());
        for statement in &card.statements {
            out.push(format!("<p>{}</p>", ctx.inline(statement)));
        }
        out.push("</div>".to_string());
    }

    let letter = card.letter();
    if let Some(correct) = letter {
        out.push("<ol class=\"ds-choices\" type=\"A\">".to_string());
        for (choice, text) in DATA_SUFFICIENCY_CHOICES {
            let marker = if choice == correct {
                " data-correct=\"true\""
            } else {
                ""
            };
            out.push(format!("<li data-option=\"{choice}\"{marker}>{text}</li>"));
        }
        out.push("</ol>".to_string());
    }

    let answer = letter.map(String::from);
    render_solution(
        out,
        ctx,
        "example-solution",
        answer.as_deref(),
        &card.solution,
    );
    out.push("</section>".to_string());
}
