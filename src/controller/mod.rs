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

//! Rotation controller.
//!
//! The controller owns the destination list and the [`RotationState`] and is
//! the single writer of both: the display surface only ever receives
//! commands and never mutates shared state directly. Every transition runs
//! to completion on the event loop thread, and every transition into a new
//! `(index, deadline)` pair except a plain timer reset dispatches a
//! `change_url` so the surface's shown content stays aligned with the
//! authoritative state.

use crate::{
    clock::Clock,
    rotation::RotationState,
    surface::SurfaceHost,
};

pub(crate) struct RotationController<C: Clock, H: SurfaceHost> {
    clock: C,
    host: H,
    urls: Vec<String>,
    state: RotationState,
}

impl<C: Clock, H: SurfaceHost> RotationController<C, H> {
    pub(crate) fn new(clock: C, host: H) -> Self {
        Self {
            clock,
            host,
            urls: vec![],
            state: RotationState::inactive(),
        }
    }

    /// Starts (or restarts) a rotation through `urls` at `interval_ms`.
    ///
    /// Blank entries are filtered out before the list is stored; the old
    /// list is replaced wholesale. Commands the surface to materialize the
    /// list and show index 0. When nothing survives the filtering the
    /// rotation deactivates and nothing is dispatched.
    pub(crate) fn start(&mut self, urls: Vec<String>, interval_ms: i64) {
        self.urls = urls
            .into_iter()
            .filter(|url| !url.trim().is_empty())
            .collect();

        if self.urls.is_empty() {
            self.state.deactivate();
            return;
        }

        let now = self.clock.now_ms();
        self.state.activate(interval_ms, now);
        self.host.create_window(&self.urls);
        self.host.change_url(0, self.state.deadline());
    }

    /// Manual navigation, one step forward or backward with wrap-around.
    /// Triggered by local arrow keys or keys forwarded from the surface.
    pub(crate) fn advance(&mut self, step: i32) {
        let now = self.clock.now_ms();
        if let Some(index) = self.state.advance(step, self.urls.len(), now) {
            self.host.change_url(index, self.state.deadline());
        }
    }

    /// Out-of-band navigation request from the surface. A request for the
    /// already-current index is an idempotent no-op; anything else behaves
    /// exactly like a manual navigation to that index.
    pub(crate) fn external_change_index(&mut self, index: usize) {
        let now = self.clock.now_ms();
        if self.state.jump(index, self.urls.len(), now) {
            self.host.change_url(index, self.state.deadline());
        }
    }

    /// The surface observed local interaction: push the deadline out by one
    /// interval and echo it back so both sides agree on the authoritative
    /// deadline. The controller always wins.
    pub(crate) fn external_reset_timer(&mut self) {
        let now = self.clock.now_ms();
        if let Some(deadline) = self.state.reset_deadline(now) {
            self.host.set_page_change_timestamp(deadline);
        }
    }

    /// The surface window is gone: deactivate without dispatching.
    pub(crate) fn window_destroyed(&mut self) {
        self.state.deactivate();
    }

    /// Watchdog tick. When the scheduled advance is overdue past the grace
    /// period, force a full resync: fresh deadline, `change_url` to index 0
    /// unconditionally. Availability over continuity. The authoritative
    /// index catches up through the surface's change-index echo rather than
    /// being rewritten here.
    pub(crate) fn watchdog_check(&mut self) {
        let now = self.clock.now_ms();
        if !self.state.is_stale(now) {
            return;
        }

        if let Some(deadline) = self.state.reset_deadline(now) {
            self.host.change_url(0, deadline);
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub(crate) fn current_index(&self) -> Option<usize> {
        self.state.index()
    }

    pub(crate) fn urls(&self) -> &[String] {
        &self.urls
    }

    pub(crate) fn remaining_ms(&self) -> i64 {
        self.state.remaining_ms(self.clock.now_ms())
    }

    pub(crate) fn progress(&self) -> f64 {
        self.state.progress(self.clock.now_ms())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{clock::manual::ManualClock, rotation::GRACE_MS};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum HostCall {
        CreateWindow(Vec<String>),
        ChangeUrl(usize, i64),
        SetPageChangeTimestamp(i64),
    }

    /// Surface host that records every dispatch instead of acting on it.
    #[derive(Clone, Default)]
    struct RecordingHost(Rc<RefCell<Vec<HostCall>>>);

    impl RecordingHost {
        fn calls(&self) -> Vec<HostCall> {
            self.0.borrow().clone()
        }

        fn drain(&self) -> Vec<HostCall> {
            self.0.borrow_mut().drain(..).collect()
        }
    }

    impl SurfaceHost for RecordingHost {
        fn create_window(&self, urls: &[String]) {
            self.0
                .borrow_mut()
                .push(HostCall::CreateWindow(urls.to_vec()));
        }

        fn change_url(&self, index: usize, end_time: i64) {
            self.0.borrow_mut().push(HostCall::ChangeUrl(index, end_time));
        }

        fn set_page_change_timestamp(&self, timestamp: i64) {
            self.0
                .borrow_mut()
                .push(HostCall::SetPageChangeTimestamp(timestamp));
        }
    }

    fn urls(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|u| u.to_string()).collect()
    }

    fn started(
        entries: &[&str],
        interval_ms: i64,
        t0: i64,
    ) -> (
        RotationController<ManualClock, RecordingHost>,
        ManualClock,
        RecordingHost,
    ) {
        let clock = ManualClock::at(t0);
        let host = RecordingHost::default();
        let mut controller = RotationController::new(clock.clone(), host.clone());
        controller.start(urls(entries), interval_ms);
        (controller, clock, host)
    }

    #[test]
    fn start_dispatches_create_window_and_change_url_pair() {
        let (controller, _clock, host) = started(&["a", "b"], 5_000, 1_000);

        assert_eq!(controller.current_index(), Some(0));
        assert_eq!(
            host.calls(),
            vec![
                HostCall::CreateWindow(urls(&["a", "b"])),
                HostCall::ChangeUrl(0, 6_000),
            ]
        );
    }

    #[test]
    fn start_filters_blank_entries_before_storing() {
        let (controller, _clock, _host) = started(&["a", "", "  ", "b"], 5_000, 0);

        assert_eq!(controller.urls(), urls(&["a", "b"]).as_slice());
    }

    #[test]
    fn start_with_nothing_left_after_filtering_stays_inactive() {
        let (controller, _clock, host) = started(&["", "   "], 5_000, 0);

        assert!(!controller.is_active());
        assert!(host.calls().is_empty());
    }

    #[test]
    fn restart_replaces_the_list_wholesale() {
        let (mut controller, _clock, host) = started(&["a", "b", "c"], 5_000, 0);
        controller.advance(1);
        host.drain();

        controller.start(urls(&["x"]), 2_000);

        assert_eq!(controller.urls(), urls(&["x"]).as_slice());
        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn advance_pair_is_inverse() {
        let (mut controller, clock, _host) = started(&["a", "b", "c"], 5_000, 0);

        clock.advance(100);
        controller.advance(1);
        clock.advance(100);
        controller.advance(-1);

        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn index_arithmetic_is_circular() {
        let (mut controller, _clock, host) = started(&["a", "b"], 5_000, 0);
        host.drain();

        controller.advance(-1);
        assert_eq!(controller.current_index(), Some(1));

        controller.advance(1);
        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn filtered_scenario_wraps_as_a_two_entry_list() {
        // start(["a","","b"], 5000): filtered to ["a","b"], Active(0, t0+5000);
        // right twice wraps 0 -> 1 -> 0; left once lands on 1.
        let (mut controller, _clock, host) = started(&["a", "", "b"], 5_000, 0);

        assert_eq!(controller.urls(), urls(&["a", "b"]).as_slice());
        assert_eq!(
            host.drain().first(),
            Some(&HostCall::CreateWindow(urls(&["a", "b"])))
        );

        controller.advance(1);
        controller.advance(1);
        assert_eq!(controller.current_index(), Some(0));

        controller.advance(-1);
        assert_eq!(controller.current_index(), Some(1));
    }

    #[test]
    fn advance_dispatches_with_a_fresh_deadline() {
        let (mut controller, clock, host) = started(&["a", "b"], 5_000, 0);
        host.drain();

        clock.set(2_000);
        controller.advance(1);

        assert_eq!(host.calls(), vec![HostCall::ChangeUrl(1, 7_000)]);
    }

    #[test]
    fn external_change_to_current_index_is_silent() {
        let (mut controller, _clock, host) = started(&["a", "b"], 5_000, 0);
        host.drain();

        controller.external_change_index(0);

        assert_eq!(controller.current_index(), Some(0));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn external_change_to_other_index_behaves_like_navigation() {
        let (mut controller, clock, host) = started(&["a", "b"], 5_000, 0);
        host.drain();

        clock.set(1_500);
        controller.external_change_index(1);

        assert_eq!(controller.current_index(), Some(1));
        assert_eq!(host.calls(), vec![HostCall::ChangeUrl(1, 6_500)]);
    }

    #[test]
    fn external_reset_timer_echoes_the_new_deadline_only() {
        let (mut controller, clock, host) = started(&["a", "b"], 5_000, 0);
        host.drain();

        clock.set(3_000);
        controller.external_reset_timer();

        assert_eq!(controller.current_index(), Some(0));
        assert_eq!(host.calls(), vec![HostCall::SetPageChangeTimestamp(8_000)]);
    }

    #[test]
    fn watchdog_resyncs_to_index_zero_after_the_grace_period() {
        let (mut controller, clock, host) = started(&["a", "b"], 5_000, 0);
        controller.advance(1);
        host.drain();

        // Deadline 5000 (set at t=0 for the advance): overdue once the
        // grace period has fully elapsed on top of it.
        clock.set(5_000 + GRACE_MS);
        controller.watchdog_check();

        assert_eq!(
            host.calls(),
            vec![HostCall::ChangeUrl(0, 5_000 + GRACE_MS + 5_000)]
        );
        // The authoritative index is corrected by the surface's echo, not
        // by the watchdog itself.
        assert_eq!(controller.current_index(), Some(1));
    }

    #[test]
    fn watchdog_corrects_exactly_once_per_stuck_episode() {
        let (mut controller, clock, host) = started(&["a", "b"], 5_000, 0);
        host.drain();

        clock.set(6_500);
        controller.watchdog_check();
        clock.advance(250);
        controller.watchdog_check();
        clock.advance(250);
        controller.watchdog_check();

        assert_eq!(host.calls(), vec![HostCall::ChangeUrl(0, 11_500)]);
    }

    #[test]
    fn watchdog_stays_quiet_within_the_grace_period() {
        let (mut controller, clock, host) = started(&["a", "b"], 5_000, 0);
        host.drain();

        clock.set(5_500);
        controller.watchdog_check();

        assert!(host.calls().is_empty());
    }

    #[test]
    fn window_destroyed_deactivates_and_stops_dispatching() {
        let (mut controller, clock, host) = started(&["a", "b"], 5_000, 0);
        host.drain();

        controller.window_destroyed();

        assert!(!controller.is_active());
        assert_eq!(controller.remaining_ms(), 0);

        clock.set(60_000);
        controller.advance(1);
        controller.external_change_index(1);
        controller.external_reset_timer();
        controller.watchdog_check();

        assert!(host.calls().is_empty());
    }

    #[test]
    fn remaining_tracks_the_clock() {
        let (controller, clock, _host) = started(&["a"], 5_000, 0);

        clock.set(1_500);
        assert_eq!(controller.remaining_ms(), 3_500);

        clock.set(9_000);
        assert_eq!(controller.remaining_ms(), 0);
    }
}
