//! Line-oriented markdown to HTML rendering.

use super::inline::{escape_html, render_inline};

/// Fragment shown when the rendered output would otherwise be empty.
pub const PREVIEW_PLACEHOLDER: &str = "<p class=\"placeholder\">Nothing to preview. \
     Start typing to see your markdown rendered here.</p>";

/// Render note text into an HTML fragment.
///
/// The input is split on `'\n'` and each line maps to exactly one block
/// element. The only state that crosses lines is an open code fence; a
/// fence left open at the end of the input still flushes as a code
/// block. Classification per line, first match wins:
///
/// - ```` ``` ```` prefix toggles a fenced code block (language tags are
///   ignored)
/// - inside a fence, the line accumulates verbatim
/// - `### ` / `## ` / `# ` become `<h3>`/`<h2>`/`<h1>`; a marker without
///   the trailing space is plain text
/// - blank or whitespace-only lines become `<p><br></p>` so vertical
///   spacing survives
/// - `> ` becomes `<blockquote>`
/// - anything else becomes `<p>`
///
/// Code block content is HTML-escaped but never inline-parsed. Empty
/// input, or an empty concatenation, yields [`PREVIEW_PLACEHOLDER`].
/// The empty-input check is explicit because splitting `""` on newlines
/// still produces one empty line, which would otherwise render as a
/// spacer instead of the placeholder.
pub fn render_html(text: &str) -> String {
    if text.is_empty() {
        return PREVIEW_PLACEHOLDER.to_string();
    }

    let mut html = String::new();
    let mut in_code_block = false;
    let mut code_block_content = String::new();

    for line in text.split('\n') {
        if line.starts_with("```") {
            if in_code_block {
                push_code_block(&mut html, &code_block_content);
                code_block_content.clear();
                in_code_block = false;
            } else {
                in_code_block = true;
            }
            continue;
        }

        if in_code_block {
            code_block_content.push_str(line);
            code_block_content.push('\n');
            continue;
        }

        if let Some(rest) = line.strip_prefix("### ") {
            html.push_str("<h3>");
            html.push_str(&render_inline(rest));
            html.push_str("</h3>");
        } else if let Some(rest) = line.strip_prefix("## ") {
            html.push_str("<h2>");
            html.push_str(&render_inline(rest));
            html.push_str("</h2>");
        } else if let Some(rest) = line.strip_prefix("# ") {
            html.push_str("<h1>");
            html.push_str(&render_inline(rest));
            html.push_str("</h1>");
        } else if line.trim().is_empty() {
            html.push_str("<p><br></p>");
        } else if let Some(rest) = line.strip_prefix("> ") {
            html.push_str("<blockquote>");
            html.push_str(&render_inline(rest));
            html.push_str("</blockquote>");
        } else {
            html.push_str("<p>");
            html.push_str(&render_inline(line));
            html.push_str("</p>");
        }
    }

    // A fence that never closed still renders what it collected.
    if in_code_block {
        push_code_block(&mut html, &code_block_content);
    }

    if html.is_empty() {
        PREVIEW_PLACEHOLDER.to_string()
    } else {
        html
    }
}

fn push_code_block(html: &mut String, content: &str) {
    html.push_str("<pre><code>");
    html.push_str(&escape_html(content));
    html.push_str("</code></pre>");
}
