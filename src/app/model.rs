use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::ThemeMode;
use crate::editor::{EditHistory, NoteBuffer};
use crate::markdown::render_html;
use crate::stats::DocStats;
use crate::store::SavedNote;

/// How long a toast stays on screen before it expires.
const TOAST_DURATION_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The note text being edited
    pub buffer: NoteBuffer,
    /// Undo and redo stacks over whole-note snapshots
    pub history: EditHistory,
    /// Buffer content as of the last history record
    pub(super) last_content: String,
    /// Buffer content as of the last successful save
    pub(super) saved_content: String,
    /// RFC 3339 timestamp of the last successful save
    pub last_saved: Option<String>,
    /// Whether the rendered preview replaces the editor
    pub preview_mode: bool,
    /// Rendered HTML shown while the preview is visible
    pub preview_html: String,
    /// Scroll offset for the preview (line index of first visible line)
    pub preview_scroll_offset: usize,
    /// Scroll offset for the editor (line index of first visible line)
    pub editor_scroll_offset: usize,
    /// Whether the dark color scheme is active
    pub dark_mode: bool,
    /// Character and word counts for the current buffer
    pub stats: DocStats,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Path of the note file shown in help
    pub note_path: PathBuf,
    /// Terminal size in columns and rows
    pub terminal_size: (u16, u16),
    toast: Option<Toast>,
    /// Set after first Ctrl+K press; allows second press to wipe the note
    pub clear_confirmed: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("note_path", &self.note_path)
            .field("preview_mode", &self.preview_mode)
            .field("dark_mode", &self.dark_mode)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model from a loaded note.
    pub fn new(note: SavedNote, note_path: PathBuf, terminal_size: (u16, u16)) -> Self {
        let stats = DocStats::of(&note.content);
        Self {
            buffer: NoteBuffer::from_text(&note.content),
            history: EditHistory::new(note.content.clone()),
            last_content: note.content.clone(),
            saved_content: note.content,
            last_saved: note.last_saved,
            preview_mode: false,
            preview_html: String::new(),
            preview_scroll_offset: 0,
            editor_scroll_offset: 0,
            dark_mode: note.dark_mode,
            stats,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            note_path,
            terminal_size,
            toast: None,
            clear_confirmed: false,
            should_quit: false,
        }
    }

    /// Start in preview mode instead of the editor.
    #[must_use]
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview_mode = preview;
        if preview {
            self.preview_html = render_html(&self.buffer.text());
        }
        self
    }

    /// Override the theme stored with the note.
    #[must_use]
    pub fn with_theme(mut self, theme: Option<ThemeMode>) -> Self {
        if let Some(theme) = theme {
            self.dark_mode = matches!(theme, ThemeMode::Dark);
        }
        self
    }

    /// Whether the buffer has edits that have not reached the note file.
    pub const fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Rows available for editor or preview content.
    ///
    /// The bottom of the screen keeps one row for the status bar and one
    /// for the toast bar.
    pub fn page_rows(&self) -> usize {
        usize::from(self.terminal_size.1.saturating_sub(2)).max(1)
    }

    /// Rows the rendered preview occupies after wrapping.
    ///
    /// The HTML is one continuous string with explicit newlines only
    /// inside code blocks, so most of it wraps at the terminal width.
    pub fn preview_rows(&self) -> usize {
        let width = usize::from(self.terminal_size.0).max(1);
        self.preview_html
            .lines()
            .map(|line| line.chars().count().div_ceil(width).max(1))
            .sum()
    }

    /// Re-render the derived views after the buffer changed.
    pub(super) fn refresh_views(&mut self) {
        let text = self.buffer.text();
        self.stats = DocStats::of(&text);
        if self.preview_mode {
            self.preview_html = render_html(&text);
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_millis(TOAST_DURATION_MS),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            buffer: NoteBuffer::empty(),
            history: EditHistory::new(""),
            last_content: String::new(),
            saved_content: String::new(),
            last_saved: None,
            preview_mode: false,
            preview_html: String::new(),
            preview_scroll_offset: 0,
            editor_scroll_offset: 0,
            dark_mode: false,
            stats: DocStats::default(),
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            note_path: PathBuf::new(),
            terminal_size: (80, 24),
            toast: None,
            clear_confirmed: false,
            should_quit: false,
        }
    }
}
