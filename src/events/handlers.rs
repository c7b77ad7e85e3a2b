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

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    App,
    events::AppEvent,
    session,
    surface::SurfaceEvent,
    tasks::{Ticker, WATCHDOG_PERIOD},
};

pub(super) fn handle_start_rotation(app: &mut App) {
    // Snapshot the list exactly as configured, before any filtering.
    session::snapshot_urls(&app.config.urls);

    app.controller
        .start(app.config.urls.clone(), app.config.interval_ms);

    // The watchdog lives and dies with the rotation; a restart replaces it.
    if let Some(watchdog) = app.watchdog.take() {
        watchdog.stop();
    }

    if app.controller.is_active() {
        let event_tx = app.event_tx.clone();
        app.watchdog = Some(Ticker::spawn(WATCHDOG_PERIOD, event_tx, || {
            AppEvent::WatchdogTick
        }));
        app.status = None;
    } else {
        app.status = Some("Nothing to rotate: the destination list is empty".to_string());
    }
}

pub(super) fn handle_surface_event(app: &mut App, event: SurfaceEvent) -> Result<()> {
    match event {
        SurfaceEvent::ResetTimer => app.controller.external_reset_timer(),

        SurfaceEvent::Keyup(key) => {
            // Rebroadcast into the local key path.
            if let Some(code) = key_code_for(&key) {
                app.event_tx
                    .send(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))?;
            }
        }

        SurfaceEvent::ChangeIndex(index) => app.controller.external_change_index(index),

        SurfaceEvent::Destroyed => {
            app.controller.window_destroyed();
            if let Some(watchdog) = app.watchdog.take() {
                watchdog.stop();
            }
        }
    }

    Ok(())
}

pub(super) fn handle_watchdog_tick(app: &mut App) {
    app.controller.watchdog_check();
}

pub(super) fn handle_error(app: &mut App, message: String) {
    app.status = Some(message);
}

/// Key names as the display surface reports them (DOM-style).
fn key_code_for(key: &str) -> Option<KeyCode> {
    match key {
        "ArrowRight" => Some(KeyCode::Right),
        "ArrowLeft" => Some(KeyCode::Left),
        _ => None,
    }
}
