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

//! Display surface worker.
//!
//! A background thread standing in for the external display surface
//! process. It applies navigation commands by launching the configured
//! viewer command (spawn-and-forget, e.g. a browser in kiosk mode), tracks
//! the deadline the controller told it about, and reports interaction back
//! over the application event channel.
//!
//! With no viewer configured the worker runs headless: it still tracks
//! indices and deadlines and still emits the same events, which keeps the
//! rotation observable from the controller UI alone.

use std::{
    process::Command,
    sync::mpsc::{Receiver, RecvTimeoutError, Sender},
    thread,
    time::Duration,
};

use crate::{
    clock::{Clock, SystemClock},
    config::AppConfig,
    events::AppEvent,
    surface::{SurfaceCommand, SurfaceError, SurfaceEvent},
};

const POLL_PERIOD: Duration = Duration::from_millis(100);

/// Spawns the background thread that plays the display surface role.
///
/// The worker blocks on the command channel, waking at least every
/// [`POLL_PERIOD`] to check whether its deadline has elapsed. It exits when
/// the command channel is dropped.
pub(crate) fn spawn_surface_worker(
    config: &AppConfig,
    command_rx: Receiver<SurfaceCommand>,
    event_tx: Sender<AppEvent>,
) {
    let viewer_command = config.viewer_command.clone();

    thread::spawn(move || {
        let mut surface = Surface {
            viewer_command,
            clock: SystemClock,
            urls: vec![],
            end_time: 0,
        };

        loop {
            match command_rx.recv_timeout(POLL_PERIOD) {
                Ok(command) => {
                    if let Err(e) = surface.apply(command, &event_tx) {
                        let lost = matches!(e, SurfaceError::ViewerSpawn { .. });
                        let _ = event_tx.send(AppEvent::Error(e.to_string()));
                        if lost {
                            // The surface could not be materialized; report
                            // it as destroyed so the rotation deactivates.
                            let _ = event_tx.send(AppEvent::Surface(SurfaceEvent::Destroyed));
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => surface.poll_deadline(&event_tx),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    });
}

struct Surface {
    viewer_command: Option<String>,
    clock: SystemClock,
    urls: Vec<String>,
    end_time: i64,
}

impl Surface {
    fn apply(
        &mut self,
        command: SurfaceCommand,
        event_tx: &Sender<AppEvent>,
    ) -> Result<(), SurfaceError> {
        match command {
            SurfaceCommand::CreateWindow(urls) => {
                self.urls = urls;
                if let Some(url) = self.urls.first().cloned() {
                    self.show(&url)?;
                }
                Ok(())
            }
            SurfaceCommand::ChangeUrl { index, end_time } => {
                let Some(url) = self.urls.get(index).cloned() else {
                    return Err(SurfaceError::IndexOutOfBounds(index));
                };
                self.show(&url)?;
                self.end_time = end_time;

                // Echo the applied index so the controller's authoritative
                // state follows surface-visible navigation.
                let _ = event_tx.send(AppEvent::Surface(SurfaceEvent::ChangeIndex(index)));
                Ok(())
            }
            SurfaceCommand::SetPageChangeTimestamp(timestamp) => {
                self.end_time = timestamp;
                Ok(())
            }
        }
    }

    /// The surface drives the automatic advance: once the deadline it was
    /// told about elapses it forwards an ArrowRight keyup, exactly once per
    /// deadline. The controller's watchdog covers the case where this event
    /// never arrives.
    fn poll_deadline(&mut self, event_tx: &Sender<AppEvent>) {
        if self.end_time > 0 && self.clock.now_ms() >= self.end_time {
            self.end_time = 0;
            let _ = event_tx.send(AppEvent::Surface(SurfaceEvent::Keyup("ArrowRight".into())));
        }
    }

    fn show(&self, url: &str) -> Result<(), SurfaceError> {
        let Some(command) = &self.viewer_command else {
            return Ok(());
        };

        Command::new(command)
            .arg(url)
            .spawn()
            .map(drop)
            .map_err(|source| SurfaceError::ViewerSpawn {
                command: command.clone(),
                source,
            })
    }
}
