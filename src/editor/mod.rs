//! Note editing: rope-backed buffer and bounded undo history.
//!
//! The buffer tracks cursor position and unsaved changes; the history
//! keeps whole-content snapshots so undo and redo restore the note in
//! one step. Both plug into the TEA model without owning any I/O.

mod buffer;
mod history;

pub use buffer::{Cursor, Direction, NoteBuffer};
pub use history::{EditHistory, MAX_UNDO_STEPS};
