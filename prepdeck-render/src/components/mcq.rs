//! Multiple-choice practice question.
//!
//! Options are lettered `A`, `B`, ... in source order. The correct option
//! carries `data-correct="true"` and the solution sits in a collapsed
//! `<details>` so the page can be read as a quiz. A question whose correct
//! value matches no option still renders, just with nothing marked.

use prepdeck_core::lesson::McqQuestion;

use super::{option_letter, render_solution};
use crate::context::RenderContext;

/// Render a practice question.
pub fn render_mcq(out: &mut Vec<String>, ctx: &mut RenderContext<'_>, question: &McqQuestion) {
    let correct = question.correct_index();
    if correct.is_none() {
        tracing::debug!(prompt = %question.prompt.source(), "no option matches the correct answer");
    }

    let mut open = "<section class=\"mcq\"".to_string();
    if let Some(number) = question.number {
        open.push_str(&format!(" id=\"question-{number}\""));
    }
    if let Some(difficulty) = question.difficulty {
        open.push_str(&format!(" data-difficulty=\"{}\"", difficulty.as_str()));
    }
    open.push('>');
    out.push(open);

    let title = question
        .number
        .map_or_else(|| "Practice question".to_string(), |n| format!("Question {n}"));
    match question.difficulty {
        Some(difficulty) => out.push(format!(
            "<h4 class=\"mcq-title\">{title} <span class=\"mcq-difficulty\">{}</span></h4>",
            difficulty.as_str()
        )),
        None => out.push(format!("<h4 class=\"mcq-title\">{title}</h4>")),
    }

    out.push(format!(
        "<div class=\"mcq-prompt\">{}</div>",
        ctx.inline(&question.prompt)
    ));
    if let Some(note) = &question.note {
        out.push(format!("<div class=\"mcq-note\">{}</div>", ctx.inline(note)));
    }

    out.push("<ol class=\"mcq-options\" type=\"A\">".to_string());
    for (i, option) in question.options.iter().enumerate() {
        let marker = if correct == Some(i) {
            " data-correct=\"true\""
        } else {
            ""
        };
        out.push(format!(
            "<li data-option=\"{}\"{marker}>{}</li>",
            option_letter(i),
            ctx.inline(option)
        ));
    }
    out.push("</ol>".to_string());

    let answer = correct.map(option_letter);
    render_solution(
        out,
        ctx,
        "mcq-solution",
        answer.as_deref(),
        &question.solution,
    );
    out.push("</section>".to_string());
}
