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

//! Application logic and event dispatching.
//!
//! This module is the central hub of the application: a single event loop
//! consumes everything — key presses, surface events, timer ticks — and
//! runs each resulting transition to completion before the next one, so no
//! two transitions ever interleave.

mod handlers;
use handlers::*;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, render::draw, surface::SurfaceEvent};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    /// Start (or restart) rotating through the configured list.
    StartRotation,

    /// Something the display surface reported over the sync channel.
    Surface(SurfaceEvent),

    Tick,
    WatchdogTick,

    ExitApplication,

    Error(String),
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until a 'quit' event is received or the event
/// channel is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::StartRotation => handle_start_rotation(app),
            AppEvent::Surface(surface_event) => handle_surface_event(app, surface_event)?,
            AppEvent::WatchdogTick => handle_watchdog_tick(app),
            AppEvent::Error(message) => handle_error(app, message),
            // Display refresh only; the draw below picks up the new clock
            // sample.
            AppEvent::Tick | _ => {}
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

/// Maps keyboard input to rotation transitions.
///
/// Keys forwarded from the display surface re-enter through this same
/// function, so arrow navigation behaves identically regardless of which
/// surface captured the key.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,
        KeyCode::Char('s') => app.event_tx.send(AppEvent::StartRotation)?,

        KeyCode::Right => app.controller.advance(1),
        KeyCode::Left => app.controller.advance(-1),

        _ => {}
    }

    Ok(())
}
