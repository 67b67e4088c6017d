//! Jotpad - a terminal scratchpad with live markdown preview.
//!
//! # Usage
//!
//! ```bash
//! jotpad
//! jotpad --preview
//! jotpad --note-file scratch.json
//! jotpad notes.md   # render a markdown file to HTML on stdout
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use jotpad::app::{App, DEFAULT_AUTOSAVE_MS};
use jotpad::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use jotpad::markdown::render_html;
use jotpad::perf;
use jotpad::store;

/// A terminal scratchpad with live markdown preview
#[derive(Parser, Debug)]
#[command(name = "jotpad", version, about, long_about = None)]
struct Cli {
    /// Render a markdown file to HTML on stdout instead of opening the editor
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Start in preview mode
    #[arg(short, long)]
    preview: bool,

    /// Disable the autosave timer (manual Ctrl+S still works)
    #[arg(long)]
    no_autosave: bool,

    /// Autosave delay in milliseconds
    #[arg(long, value_name = "MS")]
    autosave_ms: Option<u64>,

    /// Override the theme stored with the note (light or dark)
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Note file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    note_file: Option<PathBuf>,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed event debug logs to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults in the global config
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();

    // One-shot render mode: convert a markdown file and exit.
    if let Some(file) = &cli.file {
        let markdown = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        println!("{}", render_html(&markdown));
        return Ok(());
    }

    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("JOTPAD_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_debug_log_path(debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize debug log {}: {}",
            debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    let note_path = effective
        .note_file
        .clone()
        .unwrap_or_else(store::default_note_path);

    let autosave = if effective.no_autosave {
        None
    } else {
        Some(effective.autosave_ms.unwrap_or(DEFAULT_AUTOSAVE_MS))
    };

    // Run the application
    let local_override = local_path.exists().then_some(local_path);
    let mut app = App::new(note_path)
        .with_preview(effective.preview)
        .with_theme(effective.theme)
        .with_autosave(autosave)
        .with_config_paths(Some(global_path), local_override);

    app.run().context("Application error")
}
