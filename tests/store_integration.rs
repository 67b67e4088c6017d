use jotpad::app::update;
use jotpad::prelude::*;

fn type_str(mut model: Model, text: &str) -> Model {
    for ch in text.chars() {
        model = if ch == '\n' {
            update(model, Message::InsertNewline)
        } else {
            update(model, Message::InsertChar(ch))
        };
    }
    model
}

#[test]
fn test_loads_note_with_unknown_extra_keys() {
    // A note file exported from elsewhere may carry keys this version
    // does not know about; they are ignored rather than rejected.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.json");
    std::fs::write(
        &path,
        r#"{
            "notepad-content": "imported",
            "notepad-dark-mode": true,
            "notepad-font-size": 14,
            "schema": 2
        }"#,
    )
    .unwrap();

    let note = NoteStore::new(path).load().unwrap().unwrap();
    assert_eq!(note.content, "imported");
    assert!(note.dark_mode);
}

#[test]
fn test_resave_overwrites_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = NoteStore::new(dir.path().join("note.json"));

    store
        .save(&SavedNote {
            content: "first".to_string(),
            last_saved: None,
            dark_mode: false,
        })
        .unwrap();
    store
        .save(&SavedNote {
            content: "second".to_string(),
            last_saved: Some("2025-03-01T08:00:00.000Z".to_string()),
            dark_mode: true,
        })
        .unwrap();

    let note = store.load().unwrap().unwrap();
    assert_eq!(note.content, "second");
    assert!(note.dark_mode);
}

#[test]
fn test_edit_session_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = NoteStore::new(dir.path().join("note.json"));

    // First session: fresh start, type, persist.
    let note = store.load().unwrap().unwrap_or_default();
    let model = Model::new(note, store.path().to_path_buf(), (80, 24));
    let model = type_str(model, "# Plan\nwrite tests");
    assert!(model.is_dirty());

    store
        .save(&SavedNote {
            content: model.buffer.text(),
            last_saved: None,
            dark_mode: model.dark_mode,
        })
        .unwrap();

    // Second session: the note comes back exactly as left.
    let note = store.load().unwrap().unwrap();
    let restored = Model::new(note, store.path().to_path_buf(), (80, 24));
    assert_eq!(restored.buffer.text(), "# Plan\nwrite tests");
    assert!(!restored.is_dirty());
}

#[test]
fn test_dark_mode_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = NoteStore::new(dir.path().join("note.json"));

    let model = Model::new(
        SavedNote::default(),
        store.path().to_path_buf(),
        (80, 24),
    );
    let model = update(model, Message::ToggleDarkMode);
    store
        .save(&SavedNote {
            content: model.buffer.text(),
            last_saved: None,
            dark_mode: model.dark_mode,
        })
        .unwrap();

    let note = store.load().unwrap().unwrap();
    let restored = Model::new(note, store.path().to_path_buf(), (80, 24));
    assert!(restored.dark_mode);
}
