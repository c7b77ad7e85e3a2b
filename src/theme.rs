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

//! Visual styling and color configuration for the TUI.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,

    pub(crate) list_active_fg: Color,
    pub(crate) list_inactive_fg: Color,
    pub(crate) hint_fg: Color,
    pub(crate) status_fg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            accent_colour: Color::Rgb(33, 150, 243),
            border_colour: Color::Rgb(102, 102, 102),
            gauge_track_colour: Color::Rgb(30, 40, 55),

            list_active_fg: Color::Rgb(33, 246, 35),
            list_inactive_fg: Color::Rgb(162, 161, 166),
            hint_fg: Color::Rgb(162, 161, 166),
            status_fg: Color::Rgb(250, 189, 47),
        }
    }
}
