//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::config::ThemeMode;

/// How long after the last edit the note is written back to disk.
pub const DEFAULT_AUTOSAVE_MS: u64 = 2000;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    note_path: PathBuf,
    preview: bool,
    theme: Option<ThemeMode>,
    autosave: Option<u64>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application for the given note file.
    pub fn new(note_path: PathBuf) -> Self {
        Self {
            note_path,
            preview: false,
            theme: None,
            autosave: Some(DEFAULT_AUTOSAVE_MS),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Start in preview mode instead of the editor.
    pub const fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Override the theme stored with the note.
    pub const fn with_theme(mut self, theme: Option<ThemeMode>) -> Self {
        self.theme = theme;
        self
    }

    /// Set the autosave delay in milliseconds; `None` disables autosave.
    pub const fn with_autosave(mut self, delay_ms: Option<u64>) -> Self {
        self.autosave = delay_ms;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
