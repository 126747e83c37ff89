//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the Elm runtime boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! Async work follows the inbox pattern: each API-backed effect is spawned
//! as a task whose result is sent to `inbox_tx` wrapped in
//! `UiEvent::TaskCompleted`, and the loop drains `inbox_rx` every frame.

mod handlers;
mod inbox;

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use plaza_core::api::ApiClient;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use self::handlers::Dispatch;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Redraw cadence while requests are in flight (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(80);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

/// Full-screen TUI runtime.
///
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    api: ApiClient,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    pub fn new(api: ApiClient) -> Result<Self> {
        // Panic hook goes in before the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(api.base_url());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            api,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let effects = update::startup(&mut self.state);
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.state.tui.should_quit {
            let events = self.collect_events()?;
            for event in events {
                dirty = true;
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }
        Ok(())
    }

    /// Collects terminal input, inbox results and the tick.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.tui.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match handlers::dispatch(&self.api, effect) {
            Dispatch::Quit => {
                self.state.tui.should_quit = true;
            }
            Dispatch::OpenBrowser(url) => {
                if let Err(err) = open::that(&url) {
                    tracing::warn!(%url, error = %err, "failed to open browser");
                }
            }
            Dispatch::Task { kind, id, job } => {
                let tx = self.inbox_tx.clone();
                tokio::spawn(async move {
                    let result = Box::new(job.await);
                    let _ = tx.send(UiEvent::TaskCompleted { kind, id, result });
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
