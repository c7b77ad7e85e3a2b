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

//! Rotation state machine.
//!
//! This module provides the authoritative page rotation state: which
//! destination index is showing, the rotation interval, and the absolute
//! deadline at which the page is scheduled to change next. It is pure state;
//! every mutation goes through a named transition and takes the current
//! clock sample as an argument, so the machine can be exercised in tests
//! without a real clock.
//!
//! Invariant: `deadline == 0` exactly when no rotation is active. An active
//! state always has a strictly positive deadline that was computed at (or
//! after) the moment its index was last selected.

/// How long past the deadline the scheduled advance may run late before the
/// watchdog treats the display surface as stuck.
pub(crate) const GRACE_MS: i64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RotationState {
    index: Option<usize>,
    interval_ms: i64,
    deadline: i64,
}

impl RotationState {
    pub(crate) fn inactive() -> Self {
        Self {
            index: None,
            interval_ms: 0,
            deadline: 0,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.index.is_some()
    }

    pub(crate) fn index(&self) -> Option<usize> {
        self.index
    }

    pub(crate) fn deadline(&self) -> i64 {
        self.deadline
    }

    /// Starts a rotation at index 0 with a fresh deadline.
    pub(crate) fn activate(&mut self, interval_ms: i64, now: i64) {
        self.interval_ms = interval_ms.max(0);
        self.index = Some(0);
        self.deadline = now + self.interval_ms;
    }

    /// Steps forward (`+1`) or backward (`-1`) through `len` destinations,
    /// wrapping around in both directions, and pushes the deadline out by
    /// one interval.
    ///
    /// Returns the new index, or `None` when the request is a silent no-op
    /// (inactive, or nothing to rotate through).
    pub(crate) fn advance(&mut self, step: i32, len: usize, now: i64) -> Option<usize> {
        let current = self.index?;
        if len == 0 {
            return None;
        }

        let len = len as i64;
        let next = ((current as i64 + step as i64).rem_euclid(len)) as usize;
        self.index = Some(next);
        self.deadline = now + self.interval_ms;

        Some(next)
    }

    /// Jumps straight to `new_index` with a fresh deadline.
    ///
    /// A request for the already-current index is an idempotent no-op, as is
    /// an out-of-range index or a jump while inactive. Returns whether the
    /// state changed.
    pub(crate) fn jump(&mut self, new_index: usize, len: usize, now: i64) -> bool {
        let Some(current) = self.index else {
            return false;
        };
        if new_index == current || new_index >= len {
            return false;
        }

        self.index = Some(new_index);
        self.deadline = now + self.interval_ms;

        true
    }

    /// Pushes the deadline out by one interval without changing the index.
    ///
    /// Returns the new deadline, or `None` while inactive.
    pub(crate) fn reset_deadline(&mut self, now: i64) -> Option<i64> {
        self.index?;
        self.deadline = now + self.interval_ms;

        Some(self.deadline)
    }

    pub(crate) fn deactivate(&mut self) {
        self.index = None;
        self.deadline = 0;
    }

    /// Time left before the scheduled page change, clamped to zero.
    pub(crate) fn remaining_ms(&self, now: i64) -> i64 {
        (self.deadline - now).max(0)
    }

    /// True when the scheduled advance is overdue past the grace period,
    /// meaning the display surface did not visibly apply the change.
    pub(crate) fn is_stale(&self, now: i64) -> bool {
        self.is_active() && now >= self.deadline + GRACE_MS
    }

    /// Elapsed fraction of the current interval, clamped to `0.0..=1.0`.
    pub(crate) fn progress(&self, now: i64) -> f64 {
        if !self.is_active() || self.interval_ms <= 0 {
            return 0.0;
        }

        let remaining = self.remaining_ms(now) as f64;
        (1.0 - remaining / self.interval_ms as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(interval_ms: i64, now: i64) -> RotationState {
        let mut state = RotationState::inactive();
        state.activate(interval_ms, now);
        state
    }

    #[test]
    fn starts_inactive_with_zero_deadline() {
        let state = RotationState::inactive();

        assert!(!state.is_active());
        assert_eq!(state.index(), None);
        assert_eq!(state.deadline(), 0);
    }

    #[test]
    fn activate_selects_index_zero_with_deadline_one_interval_out() {
        let state = active(5_000, 1_000);

        assert_eq!(state.index(), Some(0));
        assert_eq!(state.deadline(), 6_000);
    }

    #[test]
    fn advance_wraps_in_both_directions() {
        let mut state = active(5_000, 0);

        assert_eq!(state.advance(-1, 3, 0), Some(2));
        assert_eq!(state.advance(1, 3, 0), Some(0));
        assert_eq!(state.advance(1, 3, 0), Some(1));
    }

    #[test]
    fn advance_then_retreat_returns_to_original_index() {
        let mut state = active(5_000, 0);
        state.jump(1, 3, 0);

        state.advance(1, 3, 100);
        state.advance(-1, 3, 200);

        assert_eq!(state.index(), Some(1));
    }

    #[test]
    fn advance_resets_the_deadline() {
        let mut state = active(5_000, 0);

        state.advance(1, 3, 2_500);

        assert_eq!(state.deadline(), 7_500);
    }

    #[test]
    fn advance_is_a_no_op_while_inactive_or_empty() {
        let mut inactive = RotationState::inactive();
        assert_eq!(inactive.advance(1, 3, 0), None);

        let mut empty = active(5_000, 0);
        assert_eq!(empty.advance(1, 0, 0), None);
        assert_eq!(empty.index(), Some(0));
    }

    #[test]
    fn jump_to_current_index_changes_nothing() {
        let mut state = active(5_000, 0);
        let before = state;

        assert!(!state.jump(0, 3, 2_000));
        assert_eq!(state, before);
    }

    #[test]
    fn jump_out_of_range_changes_nothing() {
        let mut state = active(5_000, 0);
        let before = state;

        assert!(!state.jump(3, 3, 2_000));
        assert_eq!(state, before);
    }

    #[test]
    fn jump_to_other_index_resets_deadline() {
        let mut state = active(5_000, 0);

        assert!(state.jump(2, 3, 1_000));
        assert_eq!(state.index(), Some(2));
        assert_eq!(state.deadline(), 6_000);
    }

    #[test]
    fn reset_deadline_keeps_the_index() {
        let mut state = active(5_000, 0);
        state.jump(1, 3, 0);

        assert_eq!(state.reset_deadline(3_000), Some(8_000));
        assert_eq!(state.index(), Some(1));
    }

    #[test]
    fn reset_deadline_is_a_no_op_while_inactive() {
        let mut state = RotationState::inactive();

        assert_eq!(state.reset_deadline(3_000), None);
        assert_eq!(state.deadline(), 0);
    }

    #[test]
    fn deactivate_restores_the_inactive_invariant() {
        let mut state = active(5_000, 0);

        state.deactivate();

        assert_eq!(state, RotationState::inactive());
    }

    #[test]
    fn remaining_never_goes_negative() {
        let state = active(5_000, 0);

        assert_eq!(state.remaining_ms(2_000), 3_000);
        assert_eq!(state.remaining_ms(5_000), 0);
        assert_eq!(state.remaining_ms(9_999), 0);
    }

    #[test]
    fn stale_only_past_the_grace_period() {
        let state = active(5_000, 0);

        assert!(!state.is_stale(5_000));
        assert!(!state.is_stale(5_999));
        assert!(state.is_stale(6_000));
    }

    #[test]
    fn inactive_state_is_never_stale() {
        let state = RotationState::inactive();

        assert!(!state.is_stale(i64::MAX - GRACE_MS));
    }

    #[test]
    fn progress_clamps_to_unit_range() {
        let state = active(5_000, 0);

        assert_eq!(state.progress(0), 0.0);
        assert_eq!(state.progress(2_500), 0.5);
        assert_eq!(state.progress(99_999), 1.0);
        assert_eq!(RotationState::inactive().progress(99_999), 0.0);
    }
}
