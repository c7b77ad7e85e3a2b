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

//! Periodic background activity.
//!
//! Two repeating timers drive the application: a high-frequency UI tick
//! (display refresh only, no state mutation) and a lower-frequency watchdog
//! tick (state-mutating). They are plain timer threads, deliberately not
//! coordinated with each other; the watchdog one is tied to the rotation
//! lifecycle and must stop delivering the moment the rotation ends, which
//! is what [`Ticker`] provides.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::events::AppEvent;

/// Minimum "frame rate" for the countdown display.
pub(crate) const UI_TICK_PERIOD: Duration = Duration::from_millis(100);

/// How often the watchdog checks that the scheduled advance was honored.
/// Independent of the rotation interval.
pub(crate) const WATCHDOG_PERIOD: Duration = Duration::from_millis(250);

/// Handle to a repeating timer thread.
///
/// [`Ticker::stop`] waits for the thread to finish, so once it returns no
/// further events can arrive from this ticker. Dropping the handle without
/// calling `stop` still flags the thread to exit on its next wake-up.
pub(crate) struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawns a thread that sends `event()` on `event_tx` every `period`
    /// until stopped or the receiving side goes away.
    pub(crate) fn spawn<F>(period: Duration, event_tx: Sender<AppEvent>, event: F) -> Self
    where
        F: Fn() -> AppEvent + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            loop {
                thread::sleep(period);
                if thread_stop.load(Ordering::Relaxed) {
                    break;
                }
                if event_tx.send(event()).is_err() {
                    break;
                }
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    pub(crate) fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn ticker_delivers_and_then_stops_cleanly() {
        let (event_tx, event_rx) = mpsc::channel();
        let ticker = Ticker::spawn(Duration::from_millis(5), event_tx, || AppEvent::WatchdogTick);

        // At least one tick arrives while the ticker runs.
        assert!(matches!(
            event_rx.recv_timeout(Duration::from_secs(1)),
            Ok(AppEvent::WatchdogTick)
        ));

        // After stop() returns the thread has been joined, so draining the
        // channel leaves it permanently empty.
        ticker.stop();
        while event_rx.try_recv().is_ok() {}
        assert!(event_rx.try_recv().is_err());
    }
}
