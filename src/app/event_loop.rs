use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::store::NoteStore;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Holds a pending save until the typing burst that queued it goes quiet.
///
/// Every queue call restarts the quiet period, so a save fires once per
/// burst rather than once per keystroke.
pub(super) struct AutosaveDebouncer {
    delay_ms: u64,
    pending: Option<u64>,
}

impl AutosaveDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, now_ms: u64) {
        self.pending = Some(now_ms);
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> bool {
        let Some(queued_at) = self.pending else {
            return false;
        };
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub(super) const fn cancel(&mut self) {
        self.pending = None;
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, loading the note file,
    /// or the event loop encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        // Load the note before touching the terminal so a broken note file
        // fails with a readable error.
        let store = NoteStore::new(self.note_path.clone());
        let load_scope = crate::perf::scope("app.load_note");
        let note = store
            .load()
            .with_context(|| format!("Failed to load note from {}", store.path().display()))?
            .unwrap_or_default();
        drop(load_scope);

        // Initialize terminal
        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init().context("Failed to initialize terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        crate::perf::log_event(
            "init.note",
            format!(
                "path={} bytes={} terminal={}x{}",
                store.path().display(),
                note.content.len(),
                size.width,
                size.height
            ),
        );

        // Create initial model
        let mut model = Model::new(note, store.path().to_path_buf(), (size.width, size.height))
            .with_preview(self.preview)
            .with_theme(self.theme);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        // Main loop
        let result = Self::event_loop(&mut terminal, &mut model, &store, self.autosave);

        // Restore terminal
        ratatui::restore();

        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        store: &NoteStore,
        autosave_delay: Option<u64>,
    ) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut autosave_debouncer = autosave_delay.map(AutosaveDebouncer::new);
        let mut age_refresh = Instant::now();
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            // The "Last save" label coarsens by the minute; one repaint per
            // minute keeps it honest without busy rendering.
            if age_refresh.elapsed() >= Duration::from_secs(60) {
                age_refresh = Instant::now();
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if autosave_debouncer
                .as_mut()
                .is_some_and(|debouncer| debouncer.take_ready(now_ms))
            {
                crate::perf::log_event("autosave.fire", format!("frame={frame_idx}"));
                *model = update(std::mem::take(model), Message::Autosave);
                Self::handle_message_side_effects(model, store, &Message::Autosave);
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending()
                || autosave_debouncer
                    .as_ref()
                    .is_some_and(AutosaveDebouncer::is_pending)
            {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh timestamp after poll wait so debouncers use accurate times.
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let msg =
                    Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    crate::perf::log_event(
                        "event.message",
                        format!("frame={frame_idx} msg={msg:?}"),
                    );
                    let side_msg = msg.clone();
                    *model = update(std::mem::take(model), msg);
                    Self::handle_message_side_effects(model, store, &side_msg);
                    Self::update_autosave_debouncer(
                        model,
                        &side_msg,
                        event_ms,
                        autosave_debouncer.as_mut(),
                    );
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg =
                        Self::handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        drained += 1;
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, store, &side_msg);
                        Self::update_autosave_debouncer(
                            model,
                            &side_msg,
                            drain_ms,
                            autosave_debouncer.as_mut(),
                        );
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={drained}"),
                    );
                }
            }

            if needs_render {
                frame_idx += 1;

                let draw_start = Instant::now();
                terminal.draw(|frame| Self::view(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Queue or cancel the pending autosave based on what just happened.
    fn update_autosave_debouncer(
        model: &Model,
        msg: &Message,
        now_ms: u64,
        debouncer: Option<&mut AutosaveDebouncer>,
    ) {
        let Some(debouncer) = debouncer else {
            return;
        };
        match msg {
            Message::InsertChar(_)
            | Message::InsertNewline
            | Message::InsertTab
            | Message::DeleteBack
            | Message::DeleteForward
            | Message::Undo
            | Message::Redo => {
                if model.is_dirty() {
                    debouncer.queue(now_ms);
                }
            }
            // A completed save makes the queued autosave redundant. The
            // first Ctrl+K press only warns, so it leaves the queue alone.
            Message::Save => debouncer.cancel(),
            Message::Clear => {
                if !model.clear_confirmed {
                    debouncer.cancel();
                }
            }
            _ => {}
        }
    }
}
