//! Bounded undo/redo history of full-buffer snapshots.

/// Maximum number of snapshots kept on the undo stack.
pub const MAX_UNDO_STEPS: usize = 10;

/// Two-stack snapshot history.
///
/// The undo stack always holds at least one entry, and its top mirrors
/// the content most recently committed or restored. The shell feeds
/// [`record`](EditHistory::record) the pre-change content before an
/// undoable mutation, and applies the string returned by
/// [`undo`](EditHistory::undo) / [`redo`](EditHistory::redo) back to the
/// live buffer.
#[derive(Debug)]
pub struct EditHistory {
    undo_stack: Vec<String>,
    redo_stack: Vec<String>,
}

impl EditHistory {
    /// Create a history seeded with the initial buffer content.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            undo_stack: vec![initial.into()],
            redo_stack: Vec::new(),
        }
    }

    /// Record a snapshot of the content as it was before the current edit.
    ///
    /// Oldest snapshots are evicted once the stack exceeds
    /// [`MAX_UNDO_STEPS`]. Any redoable future is invalidated by a new
    /// edit, so the redo stack is cleared unconditionally.
    pub fn record(&mut self, previous: impl Into<String>) {
        self.undo_stack.push(previous.into());
        if self.undo_stack.len() > MAX_UNDO_STEPS {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Step back one snapshot, returning the content to restore.
    ///
    /// Returns `None` when there is nothing to undo (the stack never
    /// gives up its last entry). The popped snapshot moves to the redo
    /// stack; the returned value is the entry newly exposed at the top.
    pub fn undo(&mut self) -> Option<&str> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let current = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        self.undo_stack.last().map(String::as_str)
    }

    /// Step forward one snapshot, returning the content to restore.
    ///
    /// Returns `None` when the redo stack is empty. The popped snapshot
    /// moves back onto the undo stack and is itself the value returned.
    pub fn redo(&mut self) -> Option<&str> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(next);
        self.undo_stack.last().map(String::as_str)
    }
}
