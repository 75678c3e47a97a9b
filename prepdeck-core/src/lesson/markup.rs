//! Inline markup parsing.
//!
//! Prose is a small Markdown dialect parsed with `markdown-it`: `$...$` for
//! inline math, `**strong**`, `*emphasis*`, and backslash escapes such as
//! `\$`. Only the paragraph block rule is enabled, so list markers, `#` and
//! indentation stay literal. Parsing never fails: an unterminated delimiter
//! is kept as text.

use markdown_it::parser::inline::{InlineRule, InlineState, Text, TextSpecial};
use markdown_it::plugins::cmark::block::paragraph::{self, Paragraph};
use markdown_it::plugins::cmark::inline::emphasis::{self, Em, Strong};
use markdown_it::plugins::cmark::inline::escape;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::lesson::schema::{Inline, Span};

thread_local! {
    static PARSER: MarkdownIt = parser();
}

fn parser() -> MarkdownIt {
    let mut md = MarkdownIt::new();
    paragraph::add(&mut md);
    escape::add(&mut md);
    emphasis::add(&mut md);
    md.inline.add_rule::<MathInlineRule>();
    md
}

/// Split a markup string into spans.
#[must_use]
pub fn parse_markup(source: &str) -> Vec<Span> {
    let root = PARSER.with(|md| md.parse(source));

    let mut spans = Vec::new();
    for (i, block) in root.children.iter().enumerate() {
        if i > 0 {
            push_text(&mut spans, "\n\n");
        }
        if block.is::<Paragraph>() {
            collect_spans(&block.children, &mut spans);
        } else {
            push_text(&mut spans, &block.collect_text());
        }
    }
    spans
}

fn collect_spans(nodes: &[Node], spans: &mut Vec<Span>) {
    for node in nodes {
        if let Some(text) = node.cast::<Text>() {
            push_text(spans, &text.content);
        } else if let Some(text) = node.cast::<TextSpecial>() {
            push_text(spans, &text.content);
        } else if let Some(math) = node.cast::<InlineMath>() {
            spans.push(Span::Math {
                math: math.0.clone(),
                label: None,
            });
        } else if node.is::<Strong>() {
            spans.push(Span::Strong {
                strong: Inline::Spans(nested(&node.children)),
            });
        } else if node.is::<Em>() {
            spans.push(Span::Emphasis {
                emphasis: Inline::Spans(nested(&node.children)),
            });
        } else {
            push_text(spans, &node.collect_text());
        }
    }
}

fn nested(nodes: &[Node]) -> Vec<Span> {
    let mut spans = Vec::new();
    collect_spans(nodes, &mut spans);
    spans
}

/// Appends to the trailing text span so adjacent text stays one span.
fn push_text(spans: &mut Vec<Span>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Span::Text { text: last }) = spans.last_mut() {
        last.push_str(text);
    } else {
        spans.push(Span::Text {
            text: text.to_string(),
        });
    }
}

// ============================================================================
// Math rule
// ============================================================================

#[derive(Debug)]
struct InlineMath(String);

impl NodeValue for InlineMath {
    fn render(&self, _: &Node, fmt: &mut dyn Renderer) {
        fmt.text(&self.0);
    }
}

/// `$...$`. An empty pair (`$$`) is not math.
struct MathInlineRule;

impl InlineRule for MathInlineRule {
    const MARKER: char = '$';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..state.pos_max];
        let rest = input.strip_prefix(Self::MARKER)?;
        let length = closing_dollar(rest)?;
        let math = rest[..length].to_string();
        Some((Node::new(InlineMath(math)), length + 2))
    }
}

/// Byte length of the formula before the closing `$`, skipping `\$`.
fn closing_dollar(input: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in input.char_indices() {
        match c {
            '\\' => escaped = !escaped,
            '$' if !escaped => return (i > 0).then_some(i),
            _ => escaped = false,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Span {
        Span::Text {
            text: s.to_string(),
        }
    }

    fn math(s: &str) -> Span {
        Span::Math {
            math: s.to_string(),
            label: None,
        }
    }

    fn strong(spans: Vec<Span>) -> Span {
        Span::Strong {
            strong: Inline::Spans(spans),
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_markup("just words"), vec![text("just words")]);
    }

    #[test]
    fn test_empty() {
        assert!(parse_markup("").is_empty());
    }

    #[test]
    fn test_inline_math() {
        assert_eq!(
            parse_markup("Solve $x^2=4$ for x."),
            vec![text("Solve "), math("x^2=4"), text(" for x.")]
        );
    }

    #[test]
    fn test_adjacent_math() {
        assert_eq!(parse_markup("$a$$b$"), vec![math("a"), math("b")]);
    }

    #[test]
    fn test_escaped_dollar() {
        assert_eq!(
            parse_markup("It costs \\$5 or \\$10."),
            vec![text("It costs $5 or $10.")]
        );
    }

    #[test]
    fn test_escaped_dollar_inside_math() {
        assert_eq!(parse_markup("$\\$5 + x$"), vec![math("\\$5 + x")]);
    }

    #[test]
    fn test_unterminated_math_is_literal() {
        assert_eq!(parse_markup("price $x"), vec![text("price $x")]);
    }

    #[test]
    fn test_double_dollar_is_literal() {
        assert_eq!(parse_markup("$$"), vec![text("$$")]);
    }

    #[test]
    fn test_strong() {
        assert_eq!(
            parse_markup("**Together:** sufficient."),
            vec![strong(vec![text("Together:")]), text(" sufficient.")]
        );
    }

    #[test]
    fn test_math_inside_strong() {
        assert_eq!(
            parse_markup("**Answer: $x=12$**"),
            vec![strong(vec![text("Answer: "), math("x=12")])]
        );
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(
            parse_markup("the *principal* root"),
            vec![
                text("the "),
                Span::Emphasis {
                    emphasis: Inline::Spans(vec![text("principal")])
                },
                text(" root")
            ]
        );
    }

    #[test]
    fn test_list_markers_stay_literal() {
        assert_eq!(
            parse_markup("1) $x^3 > 0$"),
            vec![text("1) "), math("x^3 > 0")]
        );
        assert_eq!(parse_markup("-8"), vec![text("-8")]);
    }

    #[test]
    fn test_unterminated_strong_is_literal() {
        assert_eq!(parse_markup("**bold"), vec![text("**bold")]);
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            parse_markup("√(x²) = |x| when $x<0$ (careful)"),
            vec![text("√(x²) = |x| when "), math("x<0"), text(" (careful)")]
        );
    }
}
