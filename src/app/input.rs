use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: &event::KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if model.preview_mode {
            return Self::handle_preview_key(key, model);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // Note actions
            KeyCode::Char('z' | 'Z') if ctrl && key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(Message::Redo)
            }
            KeyCode::Char('z') if ctrl => Some(Message::Undo),
            KeyCode::Char('y') if ctrl => Some(Message::Redo),
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('e') if ctrl => Some(Message::Export),
            KeyCode::Char('k') if ctrl => Some(Message::Clear),
            KeyCode::Char('p') if ctrl => Some(Message::TogglePreview),
            KeyCode::Char('t') if ctrl => Some(Message::ToggleDarkMode),
            KeyCode::Char('q' | 'c') if ctrl => Some(Message::Quit),
            KeyCode::F(1) => Some(Message::ToggleHelp),

            // Cursor movement
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight),
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::ScrollUp(model.page_rows())),
            KeyCode::PageDown => Some(Message::ScrollDown(model.page_rows())),

            // Editing
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Tab => Some(Message::InsertTab),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }

            _ => None,
        }
    }

    /// Keys while the preview replaces the editor.
    ///
    /// Typing is inactive here; the pager-style scroll keys work instead.
    fn handle_preview_key(key: &event::KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => Some(Message::TogglePreview),
            KeyCode::Char('p') if ctrl => Some(Message::TogglePreview),
            KeyCode::Char('s') if ctrl => Some(Message::Save),
            KeyCode::Char('e') if ctrl => Some(Message::Export),
            KeyCode::Char('t') if ctrl => Some(Message::ToggleDarkMode),
            KeyCode::Char('q' | 'c') if ctrl => Some(Message::Quit),
            KeyCode::F(1) => Some(Message::ToggleHelp),

            KeyCode::Down => Some(Message::ScrollDown(1)),
            KeyCode::Up => Some(Message::ScrollUp(1)),
            KeyCode::PageDown => Some(Message::ScrollDown(model.page_rows())),
            KeyCode::PageUp => Some(Message::ScrollUp(model.page_rows())),
            KeyCode::Char('j') if !ctrl => Some(Message::ScrollDown(1)),
            KeyCode::Char('k') if !ctrl => Some(Message::ScrollUp(1)),
            KeyCode::Char(' ') if !ctrl => Some(Message::ScrollDown(model.page_rows())),
            KeyCode::Char('b') if !ctrl => Some(Message::ScrollUp(model.page_rows())),

            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
