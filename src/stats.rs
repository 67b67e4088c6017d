//! Character and word counts for the status bar.

/// Counts recomputed from the note text after every edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocStats {
    /// Unicode scalar count of the whole note.
    pub chars: usize,
    /// Whitespace-separated word count; zero for blank notes.
    pub words: usize,
}

impl DocStats {
    /// Compute stats for the given text.
    pub fn of(text: &str) -> Self {
        Self {
            chars: text.chars().count(),
            words: text.split_whitespace().count(),
        }
    }
}
