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

/// Formats the time left before the next page change for the countdown
/// display.
///
/// Whole seconds (rounded) while the deadline is in the future; the literal
/// `"0.0"` once it has expired. Never a negative number.
pub(crate) fn format_remaining(remaining_ms: i64) -> String {
    if remaining_ms > 0 {
        format!("{}", (remaining_ms as f64 / 1000.0).round() as i64)
    } else {
        "0.0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_whole_seconds() {
        assert_eq!(format_remaining(5_000), "5");
        assert_eq!(format_remaining(4_500), "5");
        assert_eq!(format_remaining(4_499), "4");
        assert_eq!(format_remaining(1), "0");
    }

    #[test]
    fn expired_shows_the_zero_literal() {
        assert_eq!(format_remaining(0), "0.0");
        assert_eq!(format_remaining(-2_000), "0.0");
    }
}
