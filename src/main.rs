// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Page Rotator TUI.
//!
//! A terminal-based kiosk page rotator: it cycles an external display
//! surface through an ordered list of destinations on a fixed interval,
//! while local or surface-side interaction can reset the timer or step
//! through the pages manually.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering, and
//!   every rotation state transition.
//! * A **Surface Worker** stands in for the external display surface,
//!   applying navigation commands and reporting interaction back.
//! * **Timer Threads** provide the UI refresh tick and the watchdog tick
//!   that forces a resync when the surface goes stale.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure
//! the terminal state is preserved even in the event of a crash. The
//! controller is the single writer of rotation state; the surface only
//! ever receives fire-and-forget commands over `std::sync::mpsc` channels.

mod clock;
mod config;
mod controller;
mod events;
mod render;
mod rotation;
mod session;
mod surface;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use crate::{
    clock::SystemClock,
    config::AppConfig,
    controller::RotationController,
    events::{AppEvent, process_events},
    surface::{ChannelHost, SurfaceCommand},
    tasks::Ticker,
    theme::Theme,
};

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub controller: RotationController<SystemClock, ChannelHost>,

    /// Running watchdog ticker, present exactly while a rotation is active.
    pub watchdog: Option<Ticker>,

    pub status: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, surface_tx: Sender<SurfaceCommand>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            controller: RotationController::new(SystemClock, ChannelHost::new(surface_tx)),
            watchdog: None,
            status: None,
        }
    }
}

/// The entry point of the application.
///
/// Sets up the communication channels, initializes the application state,
/// manages the terminal lifecycle, and returns an error if any part of the
/// execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    let (surface_tx, surface_rx) = mpsc::channel();

    let mut app = App::new(config, surface_tx);

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app, surface_rx);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// Enables raw mode to capture all keyboard input and switches the terminal
/// to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate
/// screen cannot be entered.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`] and makes the
/// cursor visible again. It is "best-effort" and does not return a result,
/// as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event
/// loop.
///
/// This function spawns several long-running background threads:
/// * The surface worker that plays the display surface role.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an
/// unrecoverable application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    surface_rx: Receiver<SurfaceCommand>,
) -> Result<()> {
    // Spawn the background worker standing in for the display surface.
    surface::worker::spawn_surface_worker(&app.config, surface_rx, app.event_tx.clone());

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for the countdown display.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(tasks::UI_TICK_PERIOD);
        }
    });

    // Start rotating immediately when the config already carries a list.
    if !app.config.urls.is_empty() {
        app.event_tx.send(AppEvent::StartRotation)?;
    }

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
