use chrono::Utc;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::store;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let mode = if model.preview_mode { "PREVIEW" } else { "EDIT" };
    let dirty_indicator = if model.is_dirty() { " [modified]" } else { "" };

    let position = if model.preview_mode {
        String::new()
    } else {
        let cursor = model.buffer.cursor();
        format!("  Ln {}, Col {}", cursor.line + 1, cursor.col + 1)
    };

    let last_save = model.last_saved.as_deref().map_or_else(
        || "never".to_string(),
        |stamp| store::relative_age(stamp, Utc::now()).unwrap_or_else(|| "never".to_string()),
    );

    let chars = model.stats.chars;
    let words = model.stats.words;
    let status = format!(
        " {mode}{dirty_indicator}{position}  Chars: {chars}  Words: {words}  Last save: {last_save}  F1:help"
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
