//! Data tables.

use prepdeck_core::lesson::Table;

use crate::context::RenderContext;
use crate::escape::escape_text;

/// Render a table. Cells are inline markup, so they may hold math.
pub fn render_table(out: &mut Vec<String>, ctx: &mut RenderContext<'_>, table: &Table) {
    out.push("<table>".to_string());
    if let Some(caption) = &table.caption {
        out.push(format!("<caption>{}</caption>", escape_text(caption)));
    }

    if !table.header.is_empty() {
        let cells: String = table
            .header
            .iter()
            .map(|cell| format!("<th>{}</th>", ctx.inline(cell)))
            .collect();
        out.push(format!("<thead><tr>{cells}</tr></thead>"));
    }

    out.push("<tbody>".to_string());
    for row in &table.rows {
        let cells: String = row
            .iter()
            .map(|cell| format!("<td>{}</td>", ctx.inline(cell)))
            .collect();
        out.push(format!("<tr>{cells}</tr>"));
    }
    out.push("</tbody>".to_string());
    out.push("</table>".to_string());
}

#[cfg(test)]
mod tests {
    use crate::components::test_support::render_yaml;

    #[test]
    fn test_table_with_math_header() {
        let (html, doc) = render_yaml(
            "- type: table\n  caption: Perfect squares\n  header: [n, \"$n^2$\"]\n  rows:\n    - [1, 1]\n    - [12, 144]\n",
        );
        assert_eq!(
            html,
            "<table>\n\
             <caption>Perfect squares</caption>\n\
             <thead><tr><th>n</th><th><span class=\"math math-inline\" role=\"math\" aria-label=\"n^2\">[n^2]</span></th></tr></thead>\n\
             <tbody>\n\
             <tr><td>1</td><td>1</td></tr>\n\
             <tr><td>12</td><td>144</td></tr>\n\
             </tbody>\n\
             </table>"
        );
        assert_eq!(doc.stylesheet_count(), 1);
    }

    #[test]
    fn test_table_without_header() {
        let (html, _) = render_yaml("- type: table\n  rows:\n    - [a]\n");
        assert!(!html.contains("<thead>"));
        assert!(html.contains("<tr><td>a</td></tr>"));
    }
}
