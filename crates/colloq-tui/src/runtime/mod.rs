//! Event loop and effect execution.
//!
//! Everything effectful lives behind this module. The reducer in
//! [`crate::update`] only describes what should happen; the runtime makes
//! it happen. `handlers.rs` spawns driver tasks, `inbox.rs` defines the
//! channel they report back on.

mod handlers;
pub mod inbox;

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use colloq_core::config::Config;
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, ExchangeState};
use crate::{render, terminal, update};

/// Tick cadence while animating or handling input (roughly 60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick cadence when nothing is in flight and the keyboard is quiet.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen runtime: owns the terminal, the state, and the clock.
///
/// The terminal is restored on drop and from the panic hook installed in
/// [`TuiRuntime::new`].
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Reducer-owned state. Public so the entry point can seed the
    /// transcript before the loop starts.
    pub state: AppState,
    /// When the last Tick was emitted.
    last_tick: Instant,
    /// When the last terminal event arrived. Recent input keeps the loop
    /// on the fast cadence so keystrokes render promptly.
    last_input: Instant,
}

impl TuiRuntime {
    pub fn new(config: Config) -> Result<Self> {
        // The hook must be in place before the alternate screen starts
        // swallowing panic output.
        terminal::set_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(config),
            last_tick: now,
            last_input: now,
        })
    }

    /// Runs the event loop until the state asks to quit.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_capture()?;
        let outcome = self.drive();
        let _ = terminal::disable_capture();
        outcome
    }

    fn drive(&mut self) -> Result<()> {
        // The first frame renders unconditionally.
        let mut needs_render = true;

        while !self.state.page.should_quit {
            let mut events = self.gather_events()?;

            // Layout sees the current size before anything else this pass.
            let size = self.terminal.size()?;
            events.insert(0, UiEvent::Frame {
                width: size.width,
                height: size.height,
            });

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_input = Instant::now();
                }
                // Renders are batched onto the tick cadence.
                if matches!(&event, UiEvent::Tick) {
                    needs_render = true;
                }
                self.dispatch(event);
            }

            if needs_render {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                needs_render = false;
            }
        }

        Ok(())
    }

    /// One pass of event collection: driver events already queued, then
    /// terminal input, then a Tick if its interval has elapsed.
    fn gather_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();
        self.drain_driver(&mut events);

        let interval = self.tick_interval();

        // Block until the next tick is due, unless driver events are
        // already waiting to be processed.
        let wait = if events.is_empty() {
            interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };
        if event::poll(wait)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    /// Fast cadence while an exchange is in flight (spinner, driver
    /// progress) or input arrived recently; slow cadence otherwise.
    fn tick_interval(&self) -> Duration {
        let recently_active = self.last_input.elapsed() < IDLE_POLL_DURATION;
        if self.state.page.exchange.is_running() || recently_active {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        }
    }

    fn drain_driver(&mut self, events: &mut Vec<UiEvent>) {
        while let ExchangeState::InFlight { rx, .. } = &mut self.state.page.exchange {
            match rx.try_recv() {
                Ok(ev) => events.push(UiEvent::Exchange(ev)),
                Err(mpsc::error::TryRecvError::Empty | mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
            }
        }
    }

    fn dispatch(&mut self, event: UiEvent) {
        for effect in update::update(&mut self.state, event) {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.page.should_quit = true;
            }
            // Spawning and the in-flight transition happen within the same
            // pass, before any later key event can submit again.
            UiEffect::StartExchange { request } => {
                let spawned = handlers::spawn_exchange(&self.state.page, request);
                self.dispatch(spawned);
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
