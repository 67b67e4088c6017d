//! Persistent storage for the note snapshot.
//!
//! The whole application state that survives a restart is one JSON file:
//! the note text, the timestamp of the last save, and the theme flag.
//! The serialized field names are the storage keys the notepad has
//! always used, so they are pinned with explicit renames rather than
//! derived from the struct fields.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One persisted note snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedNote {
    /// The full note text.
    #[serde(rename = "notepad-content")]
    pub content: String,
    /// RFC 3339 timestamp of the last successful save.
    #[serde(
        rename = "notepad-last-saved",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_saved: Option<String>,
    /// Whether the dark palette was active.
    #[serde(rename = "notepad-dark-mode", default)]
    pub dark_mode: bool,
}

/// Errors from reading or writing the note file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access note file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("note file {} is not valid JSON", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and writes the note snapshot at a fixed path.
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    /// Create a store for the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved snapshot, if one exists.
    ///
    /// A missing file is a fresh start, not an error; anything else that
    /// goes wrong is reported so a corrupt note is never silently
    /// overwritten with an empty one.
    pub fn load(&self) -> Result<Option<SavedNote>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };
        let note = serde_json::from_str(&raw).map_err(|err| StoreError::Malformed {
            path: self.path.clone(),
            source: err,
        })?;
        Ok(Some(note))
    }

    /// Write the snapshot, creating parent directories as needed.
    pub fn save(&self, note: &SavedNote) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::Io {
                path: self.path.clone(),
                source: err,
            })?;
        }
        let json = serde_json::to_string_pretty(note).map_err(|err| StoreError::Malformed {
            path: self.path.clone(),
            source: err,
        })?;
        fs::write(&self.path, json).map_err(|err| StoreError::Io {
            path: self.path.clone(),
            source: err,
        })
    }
}

/// Platform default location for the note file.
pub fn default_note_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("jotpad").join("note.json");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("jotpad")
                .join("note.json");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("jotpad").join("note.json");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("jotpad")
                .join("note.json");
        }
    }

    PathBuf::from("jotpad-note.json")
}

/// Current time in the RFC 3339 format stored alongside the note.
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human-readable age of a stored timestamp, bucketed coarsely.
///
/// Under a minute reads "Just now", then minutes, hours, and days, with
/// singular forms at exactly one. Returns `None` when the stored string
/// does not parse, so a hand-edited note file degrades to showing
/// nothing instead of failing.
pub fn relative_age(last_saved: &str, now: DateTime<Utc>) -> Option<String> {
    let saved = DateTime::parse_from_rfc3339(last_saved).ok()?;
    let diff_ms = now.signed_duration_since(saved).num_milliseconds().max(0);
    let mins = diff_ms / 60_000;
    let hours = diff_ms / 3_600_000;
    let days = diff_ms / 86_400_000;

    let text = if mins < 1 {
        "Just now".to_string()
    } else if mins < 60 {
        format!("{mins} minute{} ago", if mins == 1 { "" } else { "s" })
    } else if hours < 24 {
        format!("{hours} hour{} ago", if hours == 1 { "" } else { "s" })
    } else {
        format!("{days} day{} ago", if days == 1 { "" } else { "s" })
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::tempdir;

    fn sample_note() -> SavedNote {
        SavedNote {
            content: "# Notes\n\nhello".to_string(),
            last_saved: Some("2025-06-01T10:00:00.000Z".to_string()),
            dark_mode: true,
        }
    }

    // --- Load and save ---

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("note.json"));
        let note = sample_note();

        store.save(&note).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, Some(note));
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_load_malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.json");
        fs::write(&path, "{ not json").unwrap();

        let store = NoteStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = NoteStore::new(dir.path().join("nested").join("deep").join("note.json"));
        store.save(&sample_note()).unwrap();
        assert!(store.path().exists());
    }

    // --- Storage key compatibility ---

    #[test]
    fn test_serialized_form_uses_notepad_keys() {
        let json = serde_json::to_string(&sample_note()).unwrap();
        assert!(json.contains("\"notepad-content\""));
        assert!(json.contains("\"notepad-last-saved\""));
        assert!(json.contains("\"notepad-dark-mode\""));
    }

    #[test]
    fn test_missing_optional_keys_use_defaults() {
        let note: SavedNote = serde_json::from_str(r#"{"notepad-content":"x"}"#).unwrap();
        assert_eq!(note.content, "x");
        assert_eq!(note.last_saved, None);
        assert!(!note.dark_mode);
    }

    #[test]
    fn test_unsaved_timestamp_is_omitted_from_json() {
        let note = SavedNote {
            content: "x".to_string(),
            last_saved: None,
            dark_mode: false,
        };
        let json = serde_json::to_string(&note).unwrap();
        assert!(!json.contains("notepad-last-saved"));
    }

    // --- Timestamps ---

    #[test]
    fn test_iso_now_parses_back() {
        let stamp = iso_now();
        assert!(DateTime::parse_from_rfc3339(&stamp).is_ok());
        assert!(stamp.ends_with('Z'), "timestamps are stored in UTC: {stamp}");
    }

    #[test]
    fn test_relative_age_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let fmt = |dt: DateTime<Utc>| dt.to_rfc3339_opts(SecondsFormat::Millis, true);

        let age = |earlier: Duration| relative_age(&fmt(now - earlier), now).unwrap();
        assert_eq!(age(Duration::seconds(30)), "Just now");
        assert_eq!(age(Duration::minutes(1)), "1 minute ago");
        assert_eq!(age(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(age(Duration::minutes(90)), "1 hour ago");
        assert_eq!(age(Duration::hours(23)), "23 hours ago");
        assert_eq!(age(Duration::hours(24)), "1 day ago");
        assert_eq!(age(Duration::days(3)), "3 days ago");
    }

    #[test]
    fn test_relative_age_future_timestamp_reads_just_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let future = (now + Duration::minutes(10)).to_rfc3339_opts(SecondsFormat::Millis, true);
        assert_eq!(relative_age(&future, now).as_deref(), Some("Just now"));
    }

    #[test]
    fn test_relative_age_rejects_garbage() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_age("yesterday-ish", now), None);
    }
}
