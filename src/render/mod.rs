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

//! User interface rendering logic.
//!
//! This module translates the [`App`] state into `ratatui` widgets: the
//! live countdown with its interval gauge, the destination list with the
//! active entry marked, and the key hints. Rendering is a pure projection
//! of the current state; it never mutates the rotation.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{App, util};

/// Renders the user interface to the terminal frame.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: countdown, destination list, footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    draw_countdown(f, app, outer[0]);
    draw_destinations(f, app, outer[1]);
    draw_footer(f, app, outer[2]);
}

fn draw_countdown(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1))
        .title(" rotatui ");

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    if app.controller.is_active() {
        let remaining = util::format::format_remaining(app.controller.remaining_ms());

        let counter = Line::from(vec![
            Span::styled(
                remaining,
                Style::default()
                    .fg(app.theme.accent_colour)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                "Seconds to next page",
                Style::default().fg(app.theme.hint_fg),
            ),
        ]);
        f.render_widget(
            Paragraph::new(counter).alignment(Alignment::Center),
            chunks[0],
        );

        let progress = Gauge::default()
            .ratio(app.controller.progress())
            .gauge_style(
                Style::default()
                    .fg(app.theme.accent_colour)
                    .bg(app.theme.gauge_track_colour),
            )
            .label("");
        f.render_widget(progress, chunks[2]);
    } else {
        let idle = Paragraph::new("No rotation running — press s to start")
            .style(Style::default().fg(app.theme.hint_fg))
            .alignment(Alignment::Center);
        f.render_widget(idle, chunks[1]);
    }
}

fn draw_destinations(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1))
        .title(" Pages ");

    let inner = block.inner(area);
    f.render_widget(block, area);

    // While inactive show the configured list as it would rotate.
    let urls: &[String] = if app.controller.is_active() {
        app.controller.urls()
    } else {
        &app.config.urls
    };

    if urls.is_empty() {
        let empty = Paragraph::new("No destinations configured")
            .style(Style::default().fg(app.theme.hint_fg));
        f.render_widget(empty, inner);
        return;
    }

    let current = app.controller.current_index();
    let lines: Vec<Line> = urls
        .iter()
        .enumerate()
        .map(|(index, url)| {
            if Some(index) == current {
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(app.theme.list_active_fg)),
                    Span::styled(
                        url.as_str(),
                        Style::default()
                            .fg(app.theme.list_active_fg)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![
                    Span::styled("○ ", Style::default().fg(app.theme.list_inactive_fg)),
                    Span::styled(
                        url.as_str(),
                        Style::default().fg(app.theme.list_inactive_fg),
                    ),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_footer(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let hints = Line::from(vec![
        Span::styled("s", Style::default().fg(app.theme.accent_colour)),
        Span::styled(" start  ", Style::default().fg(app.theme.hint_fg)),
        Span::styled("←/→", Style::default().fg(app.theme.accent_colour)),
        Span::styled(" navigate  ", Style::default().fg(app.theme.hint_fg)),
        Span::styled("q", Style::default().fg(app.theme.accent_colour)),
        Span::styled(" quit", Style::default().fg(app.theme.hint_fg)),
    ]);
    f.render_widget(Paragraph::new(hints), chunks[0]);

    if let Some(status) = &app.status {
        let status_line = Paragraph::new(status.as_str())
            .style(Style::default().fg(app.theme.status_fg));
        f.render_widget(status_line, chunks[1]);
    }
}
