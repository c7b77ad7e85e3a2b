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

//! Display surface host interface.
//!
//! The display surface is a separately owned collaborator: it renders the
//! current destination and captures local user interaction. The controller
//! only ever talks to it through [`SurfaceHost`] commands (fire-and-forget,
//! no acknowledgment) and hears back through [`SurfaceEvent`]s on the
//! application event channel. Delivery is at-most-once in both directions;
//! reliability comes from the watchdog above this layer, not from the
//! channel itself.

pub(crate) mod worker;

use std::sync::mpsc::Sender;

use thiserror::Error;

/// Commands accepted by the display surface host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SurfaceCommand {
    /// Materialize a surface that will render `urls` in order.
    CreateWindow(Vec<String>),
    /// Show `urls[index]` and inform the surface of the next deadline.
    ChangeUrl { index: usize, end_time: i64 },
    /// Informational echo of the authoritative deadline after an
    /// externally triggered timer reset.
    SetPageChangeTimestamp(i64),
}

/// Events the display surface reports back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SurfaceEvent {
    /// Local interaction on the surface; the deadline must be pushed out
    /// and echoed back.
    ResetTimer,
    /// A key captured on the surface, forwarded for local handling.
    Keyup(String),
    /// The surface applied (or requests) navigation to a specific index.
    ChangeIndex(usize),
    /// Terminal: the surface window is gone.
    Destroyed,
}

#[derive(Debug, Error)]
pub(crate) enum SurfaceError {
    #[error("no destination at index {0}")]
    IndexOutOfBounds(usize),
    #[error("failed to launch viewer '{command}': {source}")]
    ViewerSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// The controller's view of the display surface.
///
/// Every method is fire-and-forget: the controller never waits for, nor
/// consumes, a result from the surface.
pub(crate) trait SurfaceHost {
    fn create_window(&self, urls: &[String]);
    fn change_url(&self, index: usize, end_time: i64);
    fn set_page_change_timestamp(&self, timestamp: i64);
}

/// Channel-backed host: forwards commands to the surface worker thread,
/// dropping them silently when the worker has gone away.
pub(crate) struct ChannelHost {
    command_tx: Sender<SurfaceCommand>,
}

impl ChannelHost {
    pub(crate) fn new(command_tx: Sender<SurfaceCommand>) -> Self {
        Self { command_tx }
    }
}

impl SurfaceHost for ChannelHost {
    fn create_window(&self, urls: &[String]) {
        self.command_tx
            .send(SurfaceCommand::CreateWindow(urls.to_vec()))
            .ok();
    }

    fn change_url(&self, index: usize, end_time: i64) {
        self.command_tx
            .send(SurfaceCommand::ChangeUrl { index, end_time })
            .ok();
    }

    fn set_page_change_timestamp(&self, timestamp: i64) {
        self.command_tx
            .send(SurfaceCommand::SetPageChangeTimestamp(timestamp))
            .ok();
    }
}
