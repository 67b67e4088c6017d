use chrono::{DateTime, Utc};

use crate::app::{App, Message, Model, ToastLevel};
use crate::store::{self, NoteStore, SavedNote};

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, store: &NoteStore, msg: &Message) {
        match msg {
            Message::Save | Message::Autosave => {
                let reason = if matches!(msg, Message::Save) {
                    "manual"
                } else {
                    "auto"
                };
                Self::save_note(model, store, reason);
            }
            Message::Clear => {
                // The wipe leaves an empty dirty buffer behind; persist it
                // right away instead of waiting for the autosave window.
                if !model.clear_confirmed && model.buffer.text().is_empty() && model.is_dirty() {
                    Self::save_note(model, store, "clear");
                }
            }
            Message::Export => {
                Self::export_note(model);
            }
            Message::ToggleDarkMode => {
                // The theme persists on its own; unsaved note edits stay
                // out of the file until their own save fires.
                let note = SavedNote {
                    content: model.saved_content.clone(),
                    last_saved: model.last_saved.clone(),
                    dark_mode: model.dark_mode,
                };
                if let Err(err) = store.save(&note) {
                    model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                    crate::perf::log_event("theme.toggle.error", format!("err={err}"));
                } else {
                    crate::perf::log_event(
                        "theme.toggle",
                        format!("dark_mode={}", model.dark_mode),
                    );
                }
            }
            Message::Quit => {
                if model.is_dirty() {
                    Self::save_note(model, store, "quit");
                }
            }
            _ => {}
        }
    }

    fn save_note(model: &mut Model, store: &NoteStore, reason: &str) {
        let content = model.buffer.text();
        let note = SavedNote {
            content: content.clone(),
            last_saved: Some(store::iso_now()),
            dark_mode: model.dark_mode,
        };
        match store.save(&note) {
            Ok(()) => {
                model.saved_content = content;
                model.last_saved = note.last_saved;
                model.buffer.mark_clean();
                model.show_toast(ToastLevel::Info, "Saved");
                crate::perf::log_event(
                    "note.save",
                    format!("reason={reason} bytes={}", model.saved_content.len()),
                );
            }
            Err(err) => {
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                crate::perf::log_event(
                    "note.save.error",
                    format!("reason={reason} path={} err={err}", store.path().display()),
                );
            }
        }
    }

    fn export_note(model: &mut Model) {
        let file_name = export_file_name(Utc::now());
        match std::fs::write(&file_name, model.buffer.text()) {
            Ok(()) => {
                model.show_toast(ToastLevel::Info, format!("Exported to {file_name}"));
                crate::perf::log_event("note.export", format!("file={file_name}"));
            }
            Err(err) => {
                model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
                crate::perf::log_event("note.export.error", format!("file={file_name} err={err}"));
            }
        }
    }
}

/// Name for a plain-text export, dated by the current UTC day.
fn export_file_name(now: DateTime<Utc>) -> String {
    format!("notepad-{}.txt", now.format("%Y-%m-%d"))
}
