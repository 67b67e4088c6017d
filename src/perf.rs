//! Lightweight timing and event instrumentation.
//!
//! Two independent channels: `--perf` prints scope timings to stderr on
//! drop, and `--debug-log` appends timestamped app events (saves,
//! exports, store failures, frame draws) to a file for debugging
//! sessions after the fact.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static EVENT_LOG: LazyLock<Mutex<EventLog>> = LazyLock::new(|| Mutex::new(EventLog::new()));

/// Prints its lifetime to stderr when perf output is enabled.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        eprintln!("[perf] {}: {:.2} ms", self.name, elapsed_ms);
    }
}

#[derive(Debug)]
struct EventLog {
    enabled: bool,
    start: Instant,
    writer: Option<BufWriter<File>>,
}

impl EventLog {
    fn new() -> Self {
        Self {
            enabled: false,
            start: Instant::now(),
            writer: None,
        }
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Start a named timing scope; the elapsed time prints when it drops.
pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Open (or close, with `None`) the event log file.
pub fn set_debug_log_path(path: Option<&Path>) -> std::io::Result<()> {
    let mut log = EVENT_LOG.lock().expect("event log lock poisoned");
    if let Some(path) = path {
        let file = File::create(path)?;
        log.enabled = true;
        log.start = Instant::now();
        log.writer = Some(BufWriter::new(file));
        if let Some(writer) = log.writer.as_mut() {
            writeln!(writer, "jotpad debug log start")?;
            writer.flush()?;
        }
    } else {
        log.enabled = false;
        log.writer = None;
    }
    Ok(())
}

pub fn is_debug_log_enabled() -> bool {
    EVENT_LOG.lock().expect("event log lock poisoned").enabled
}

/// Append one event line with elapsed milliseconds since the log opened.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    let mut log = EVENT_LOG.lock().expect("event log lock poisoned");
    if !log.enabled {
        return;
    }
    let elapsed_ms = log.start.elapsed().as_secs_f64() * 1000.0;
    if let Some(writer) = log.writer.as_mut() {
        let _ = writeln!(
            writer,
            "[{elapsed_ms:>10.3} ms] {name}: {}",
            detail.as_ref()
        );
        let _ = writer.flush();
    }
}
