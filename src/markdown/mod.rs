//! Markdown rendering for the preview pane.
//!
//! This module handles:
//! - Line-oriented block rendering (headings, blockquotes, paragraphs,
//!   fenced code blocks)
//! - Inline span substitution (bold, italic, inline code) over
//!   HTML-escaped text
//!
//! Rendering is a pure function of the note text. The supported grammar
//! is deliberately small; anything it does not recognize passes through
//! as escaped paragraph text.

mod inline;
mod renderer;

pub use inline::{escape_html, render_inline};
pub use renderer::{PREVIEW_PLACEHOLDER, render_html};
