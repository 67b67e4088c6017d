use crate::app::Model;
use crate::app::model::ToastLevel;
use crate::editor::Direction;
use crate::markdown::render_html;
use crate::stats::DocStats;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split the current line at the cursor (Enter)
    InsertNewline,
    /// Insert two spaces at the cursor (Tab)
    InsertTab,
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,

    // Cursor movement
    /// Move cursor in a direction
    MoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    MoveWordRight,
    /// Move cursor to start of note (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of note (Ctrl+End)
    MoveToEnd,

    // Scrolling
    /// Scroll the active view up by n lines
    ScrollUp(usize),
    /// Scroll the active view down by n lines
    ScrollDown(usize),

    // History
    /// Revert the note to the previous snapshot
    Undo,
    /// Re-apply a snapshot taken back by undo
    Redo,

    // Note actions
    /// Save the note now
    Save,
    /// Save fired by the autosave debouncer
    Autosave,
    /// Write the note to a dated plain-text file
    Export,
    /// Wipe the note (asks for a confirming second press)
    Clear,

    // View
    /// Switch between editor and rendered preview
    TogglePreview,
    /// Switch between light and dark color scheme
    ToggleDarkMode,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset the clear confirmation on any action other than a second Ctrl+K.
    if !matches!(msg, Message::Clear) {
        model.clear_confirmed = false;
    }

    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
            commit_edit(&mut model);
            ensure_cursor_visible(&mut model);
        }
        Message::InsertNewline => {
            model.buffer.split_line();
            commit_edit(&mut model);
            ensure_cursor_visible(&mut model);
        }
        Message::InsertTab => {
            model.buffer.insert_str("  ");
            commit_edit(&mut model);
            ensure_cursor_visible(&mut model);
        }
        Message::DeleteBack => {
            model.buffer.delete_back();
            commit_edit(&mut model);
            ensure_cursor_visible(&mut model);
        }
        Message::DeleteForward => {
            model.buffer.delete_forward();
            commit_edit(&mut model);
        }

        // Cursor movement
        Message::MoveCursor(dir) => {
            model.buffer.move_cursor(dir);
            ensure_cursor_visible(&mut model);
        }
        Message::MoveHome => {
            model.buffer.move_home();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveEnd => {
            model.buffer.move_end();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveWordLeft => {
            model.buffer.move_word_left();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveWordRight => {
            model.buffer.move_word_right();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveToStart => {
            model.buffer.move_to_start();
            ensure_cursor_visible(&mut model);
        }
        Message::MoveToEnd => {
            model.buffer.move_to_end();
            ensure_cursor_visible(&mut model);
        }

        // Scrolling
        Message::ScrollUp(n) => {
            if model.preview_mode {
                model.preview_scroll_offset = model.preview_scroll_offset.saturating_sub(n);
            } else {
                model.editor_scroll_offset = model.editor_scroll_offset.saturating_sub(n);
            }
        }
        Message::ScrollDown(n) => {
            if model.preview_mode {
                let max = model.preview_rows().saturating_sub(1);
                model.preview_scroll_offset = model.preview_scroll_offset.saturating_add(n).min(max);
            } else {
                let max = model.buffer.line_count().saturating_sub(1);
                model.editor_scroll_offset = model.editor_scroll_offset.saturating_add(n).min(max);
            }
        }

        // History
        Message::Undo => {
            if let Some(text) = model.history.undo().map(str::to_string) {
                apply_history_snapshot(&mut model, text);
            }
        }
        Message::Redo => {
            if let Some(text) = model.history.redo().map(str::to_string) {
                apply_history_snapshot(&mut model, text);
            }
        }

        // Note actions
        Message::Clear => {
            if model.buffer.text().is_empty() {
                // Nothing to clear.
            } else if model.clear_confirmed {
                model.history.record(model.buffer.text());
                model.buffer.set_text("");
                model.last_content.clear();
                model.refresh_views();
                model.editor_scroll_offset = 0;
                model.clear_confirmed = false;
            } else {
                model.show_toast(
                    ToastLevel::Warning,
                    "Clear the whole note? Press Ctrl+K again to confirm",
                );
                model.clear_confirmed = true;
            }
        }
        // Save/Autosave/Export write to disk: handled in effects
        Message::Save | Message::Autosave | Message::Export => {}

        // View
        Message::TogglePreview => {
            model.preview_mode = !model.preview_mode;
            if model.preview_mode {
                model.preview_html = render_html(&model.buffer.text());
                model.preview_scroll_offset = 0;
            }
        }
        Message::ToggleDarkMode => {
            model.dark_mode = !model.dark_mode;
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            ensure_cursor_visible(&mut model);
        }

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}

/// Record the previous content and refresh derived views after an edit.
///
/// History keeps the content as it was before the change; the current
/// content only enters the stack once the next edit pushes it out of the
/// buffer. Nothing is recorded when the edit was a no-op (Backspace at the
/// start of the note, for example).
fn commit_edit(model: &mut Model) {
    let text = model.buffer.text();
    if text != model.last_content {
        model
            .history
            .record(std::mem::replace(&mut model.last_content, text.clone()));
    }
    model.stats = DocStats::of(&text);
    if model.preview_mode {
        model.preview_html = render_html(&text);
    }
}

/// Put a history snapshot into the buffer without recording a new step.
fn apply_history_snapshot(model: &mut Model, text: String) {
    model.buffer.set_text(&text);
    model.stats = DocStats::of(&text);
    if model.preview_mode {
        model.preview_html = render_html(&text);
    }
    model.last_content = text;
    ensure_cursor_visible(model);
}

/// Ensure the cursor line is visible in the editor rows.
fn ensure_cursor_visible(model: &mut Model) {
    let cursor_line = model.buffer.cursor().line;
    let visible_height = model.page_rows();
    if cursor_line < model.editor_scroll_offset {
        model.editor_scroll_offset = cursor_line;
    } else if cursor_line >= model.editor_scroll_offset + visible_height {
        model.editor_scroll_offset = cursor_line + 1 - visible_height;
    }
}
