use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};

use crate::app::Model;

use super::{overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    // Reserve the last line for the status bar (+ one toast line when active).
    let content_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    if model.preview_mode {
        render_preview(model, frame, content_area);
    } else {
        render_editor(model, frame, content_area);
    }

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let total_lines = model.buffer.line_count();
    let gutter_width = line_number_width(total_lines);

    let visible_height = area.height as usize;
    let start = model.editor_scroll_offset;
    let end = (start + visible_height).min(total_lines);
    let cursor = model.buffer.cursor();

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = model.buffer.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);

        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if line_idx == cursor.line {
            // Split the line at the cursor so the cell under it can be inverted.
            let col = floor_char_boundary(&line_text, cursor.col);
            let before = &line_text[..col];
            let cursor_char = line_text[col..].chars().next();
            let after = cursor_char.map_or("", |ch| &line_text[col + ch.len_utf8()..]);

            if !before.is_empty() {
                spans.push(Span::raw(before.to_string()));
            }
            spans.push(Span::styled(
                cursor_char.map_or_else(|| " ".to_string(), String::from),
                cursor_style(model.dark_mode),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after.to_string()));
            }
        } else {
            spans.push(Span::raw(line_text));
        }

        content.push(Line::from(spans));
    }

    let editor = Paragraph::new(content).style(base_style(model.dark_mode));
    frame.render_widget(Clear, area);
    frame.render_widget(editor, area);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let scroll = u16::try_from(model.preview_scroll_offset).unwrap_or(u16::MAX);
    let preview = Paragraph::new(model.preview_html.as_str())
        .style(base_style(model.dark_mode))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(Clear, area);
    frame.render_widget(preview, area);
}

fn base_style(dark_mode: bool) -> Style {
    if dark_mode {
        Style::default().fg(Color::Gray).bg(Color::Black)
    } else {
        Style::default().fg(Color::Black).bg(Color::White)
    }
}

fn cursor_style(dark_mode: bool) -> Style {
    if dark_mode {
        Style::default().bg(Color::White).fg(Color::Black)
    } else {
        Style::default().bg(Color::Black).fg(Color::White)
    }
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

/// Largest index at or below `idx` that lies on a char boundary of `s`.
fn floor_char_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
