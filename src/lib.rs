// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. store::StoreError)
    clippy::module_name_repetitions
)]

//! # Jotpad
//!
//! A terminal scratchpad with live markdown preview.
//!
//! Jotpad keeps one persistent note and gets out of the way:
//! - Markdown editing with bounded undo/redo
//! - Debounced autosave plus manual save
//! - HTML preview of the note, rendered live
//! - Plain-text export and a persisted dark mode
//!
//! ## Architecture
//!
//! Jotpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Note buffer and undo history
//! - [`markdown`]: Markdown to HTML rendering
//! - [`store`]: Note persistence
//! - [`stats`]: Character and word counts
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod editor;
pub mod markdown;
pub mod perf;
pub mod stats;
pub mod store;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{EditHistory, NoteBuffer};
    pub use crate::store::{NoteStore, SavedNote};
}
