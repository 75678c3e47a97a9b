//! HTML escaping.
//!
//! Lesson prose is authored text, never trusted markup: everything except
//! KaTeX output passes through these helpers.

/// Escape text content.
///
/// Replaces `&`, `<`, and `>` with their HTML entities.
#[must_use]
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a double-quoted attribute value.
#[must_use]
pub fn escape_attr(text: &str) -> String {
    escape_text(text)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Make text safe inside an HTML comment.
///
/// A comment must not contain `--` or end with `-`.
#[must_use]
pub fn comment_safe(text: &str) -> String {
    let mut out = text.replace("--", "- -").replace('>', "&gt;");
    while out.contains("--") {
        out = out.replace("--", "- -");
    }
    if out.ends_with('-') {
        out.push(' ');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }

    #[test]
    fn test_escape_text_keeps_quotes() {
        assert_eq!(escape_text(r#"say "hi""#), r#"say "hi""#);
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(
            escape_attr(r#"x < "y" & 'z'"#),
            "x &lt; &quot;y&quot; &amp; &#39;z&#39;"
        );
    }

    #[test]
    fn test_escape_is_not_double_applied() {
        assert_eq!(escape_text("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_comment_safe() {
        assert_eq!(comment_safe("a -- b"), "a - - b");
        assert_eq!(comment_safe("---"), "- - - ");
        assert_eq!(comment_safe("end -->"), "end - -&gt;");
        assert!(!comment_safe("----").contains("--"));
    }
}
