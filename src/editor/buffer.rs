use ropey::Rope;

/// Cursor position in the note buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The live note text, backed by a rope.
///
/// Holds the cursor and a dirty flag tracking unsaved changes. Snapshot
/// restore goes through [`set_text`](Self::set_text) so undo and redo
/// replace the whole content in one step.
pub struct NoteBuffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
}

impl NoteBuffer {
    /// Create a buffer from existing note content.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the note has been modified since the last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (after a successful save).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx);
        let s = line.to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full note text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the entire content, clamping the cursor into the new text.
    ///
    /// This is how undo, redo, and clear apply a snapshot. The buffer is
    /// marked dirty; restored content still needs saving.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let cursor = self.cursor;
        self.move_to(cursor.line, cursor.col);
        self.dirty = true;
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
        self.dirty = true;
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);

        // Move cursor to end of inserted text
        let lines: Vec<&str> = s.split('\n').collect();
        if lines.len() > 1 {
            self.cursor.line += lines.len() - 1;
            self.cursor.set_col(lines.last().map_or(0, |l| l.len()));
        } else {
            self.cursor.set_col(self.cursor.col + s.len());
        }
        self.dirty = true;
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        self.dirty = true;
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        if self.cursor.col == 0 {
            // Join with previous line
            let prev_line_len = self.line_len(self.cursor.line - 1);
            let char_idx = self.cursor_char_idx();
            // Delete the newline at end of previous line
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_line_len);
        } else {
            let char_idx = self.cursor_char_idx();
            let line = self.rope.line(self.cursor.line);
            let line_str = line.to_string();
            let before = &line_str[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        }
        self.dirty = true;
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len && self.cursor.line + 1 >= self.line_count() {
            return false;
        }

        let char_idx = self.cursor_char_idx();
        self.rope.remove(char_idx..=char_idx);
        self.dirty = true;
        true
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = &line[..self.cursor.col];
        let trimmed = before.trim_end();

        if trimmed.is_empty() {
            self.cursor.set_col(0);
            return;
        }

        let pos = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_alphanumeric() && *c != '_')
            .map_or(0, |(i, c)| i + c.len_utf8());
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];

        // Skip current word characters
        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());

        // Skip whitespace/punctuation after word
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());

        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }

    /// Move cursor to a specific line and column, clamped to the content.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    /// Move cursor to the start of the note (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the note (Ctrl+End).
    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    // --- Private helpers ---

    /// Convert cursor position to a ropey char index.
    fn cursor_char_idx(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        let line = self.rope.line(self.cursor.line);
        let line_str: String = line.chars().collect();
        // Convert byte offset to char offset within the line
        let byte_col = self.cursor.col.min(line_str.len());
        let char_offset = line_str[..byte_col].chars().count();
        line_start + char_offset
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }
}

impl std::fmt::Debug for NoteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = NoteBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = NoteBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
    }

    #[test]
    fn test_line_at_out_of_bounds_returns_none() {
        let buf = NoteBuffer::from_text("hello");
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_text_roundtrip() {
        let content = "line one\nline two\nline three";
        let buf = NoteBuffer::from_text(content);
        assert_eq!(buf.text(), content);
    }

    // --- Dirty tracking ---

    #[test]
    fn test_new_buffer_is_clean() {
        let buf = NoteBuffer::from_text("hello");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_insert_marks_dirty() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.insert_char('!');
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_mark_clean_resets_dirty() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.insert_char('!');
        buf.mark_clean();
        assert!(!buf.is_dirty());
    }

    // --- Whole-content replacement ---

    #[test]
    fn test_set_text_replaces_content() {
        let mut buf = NoteBuffer::from_text("old");
        buf.set_text("brand new");
        assert_eq!(buf.text(), "brand new");
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_set_text_clamps_cursor_to_shorter_content() {
        let mut buf = NoteBuffer::from_text("a long first line\nsecond");
        buf.move_to(1, 6);
        buf.set_text("ab");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_set_text_keeps_cursor_when_still_valid() {
        let mut buf = NoteBuffer::from_text("hello\nworld");
        buf.move_to(1, 3);
        buf.set_text("howdy\nthere");
        assert_eq!(buf.cursor(), Cursor::at(1, 3));
    }

    #[test]
    fn test_set_text_to_empty() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.move_end();
        buf.set_text("");
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    // --- Character insertion ---

    #[test]
    fn test_insert_char_at_start() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.insert_char('H');
        assert_eq!(buf.line_at(0), Some("Hhello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_insert_char_in_middle() {
        let mut buf = NoteBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right); // after 'h'
        buf.insert_char('e');
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.move_end();
        buf.insert_char('é');
        assert_eq!(buf.line_at(0), Some("helloé".to_string()));
    }

    // --- String insertion ---

    #[test]
    fn test_insert_str_single_line() {
        let mut buf = NoteBuffer::from_text("hd");
        buf.move_cursor(Direction::Right);
        buf.insert_str("ello worl");
        assert_eq!(buf.line_at(0), Some("hello world".to_string()));
    }

    #[test]
    fn test_insert_str_two_spaces_like_tab() {
        let mut buf = NoteBuffer::from_text("ab");
        buf.move_cursor(Direction::Right);
        buf.insert_str("  ");
        assert_eq!(buf.line_at(0), Some("a  b".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_insert_str_empty_is_noop() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.insert_str("");
        assert!(!buf.is_dirty());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_insert_str_multiline_moves_cursor_to_tail() {
        let mut buf = NoteBuffer::from_text("x");
        buf.move_end();
        buf.insert_str("a\nbc");
        assert_eq!(buf.text(), "xa\nbc");
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
    }

    // --- Line splitting (Enter) ---

    #[test]
    fn test_split_line_at_end() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.move_end();
        buf.split_line();
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(String::new()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = NoteBuffer::from_text("hello world");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    // --- Backspace deletion ---

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = NoteBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_back_removes_char() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.move_to(0, 5);
        assert!(buf.delete_back());
        assert_eq!(buf.line_at(0), Some("hell".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 4));
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = NoteBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some("helloworld".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    // --- Forward deletion ---

    #[test]
    fn test_delete_forward_removes_char() {
        let mut buf = NoteBuffer::from_text("hello");
        assert!(buf.delete_forward());
        assert_eq!(buf.line_at(0), Some("ello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_delete_forward_at_buffer_end_is_noop() {
        let mut buf = NoteBuffer::from_text("hi");
        buf.move_to_end();
        assert!(!buf.delete_forward());
        assert_eq!(buf.text(), "hi");
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = NoteBuffer::from_text("hello\nworld");
        buf.move_end();
        assert!(buf.delete_forward());
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some("helloworld".to_string()));
    }

    // --- Cursor movement ---

    #[test]
    fn test_move_right_then_left_round_trips() {
        let mut buf = NoteBuffer::from_text("ab");
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let mut buf = NoteBuffer::from_text("ab\ncd");
        buf.move_end();
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_move_left_wraps_to_previous_line_end() {
        let mut buf = NoteBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_move_down_clamps_to_shorter_line() {
        let mut buf = NoteBuffer::from_text("long line\nhi");
        buf.move_to(0, 7);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().line, 1);
        assert_eq!(buf.cursor().col, 2);
    }

    #[test]
    fn test_sticky_column_restores_on_longer_line() {
        let mut buf = NoteBuffer::from_text("long line\nhi\nanother long");
        buf.move_to(0, 7);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 7, "column memory should restore");
    }

    #[test]
    fn test_move_home_and_end() {
        let mut buf = NoteBuffer::from_text("hello");
        buf.move_end();
        assert_eq!(buf.cursor().col, 5);
        buf.move_home();
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_move_to_clamps_out_of_range() {
        let mut buf = NoteBuffer::from_text("ab\ncd");
        buf.move_to(99, 99);
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
    }

    #[test]
    fn test_move_to_start_and_end_of_note() {
        let mut buf = NoteBuffer::from_text("ab\ncd");
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    // --- Word movement ---

    #[test]
    fn test_move_word_right_skips_word_and_space() {
        let mut buf = NoteBuffer::from_text("foo bar baz");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 4);
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 8);
    }

    #[test]
    fn test_move_word_left_lands_on_word_start() {
        let mut buf = NoteBuffer::from_text("foo bar baz");
        buf.move_end();
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 8);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 4);
    }

    #[test]
    fn test_move_word_right_crosses_line_boundary() {
        let mut buf = NoteBuffer::from_text("foo\nbar");
        buf.move_end();
        buf.move_word_right();
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_move_word_left_over_multibyte_separator() {
        // The arrow is three bytes; the cursor must land after it, on a
        // char boundary.
        let mut buf = NoteBuffer::from_text("foo→bar");
        buf.move_end();
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 6);
        assert_eq!(buf.line_at(0).map(|l| l[6..].to_string()), Some("bar".to_string()));
    }

    #[test]
    fn test_move_word_left_with_multibyte_word_chars() {
        let mut buf = NoteBuffer::from_text("héllo wörld");
        buf.move_end();
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 7);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 0);
    }
}
