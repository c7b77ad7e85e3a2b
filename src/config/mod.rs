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

//! Application configuration.
//!
//! This module manages the application configuration file. The destination
//! list and rotation interval live here rather than in an in-app form.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "rotatui";

const DEFAULT_INTERVAL_MS: i64 = 30_000;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u32,
    /// Destinations to rotate through, in order. Blank entries are filtered
    /// out when a rotation starts.
    pub urls: Vec<String>,
    /// How long each page stays on screen, in milliseconds.
    pub interval_ms: i64,
    /// Command used to materialize a destination on the display surface,
    /// e.g. a browser in kiosk mode. The surface runs headless when unset.
    pub viewer_command: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            urls: vec![],
            interval_ms: DEFAULT_INTERVAL_MS,
            viewer_command: None,
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_an_empty_headless_rotation() {
        let config = AppConfig::default();

        assert!(config.urls.is_empty());
        assert_eq!(config.interval_ms, DEFAULT_INTERVAL_MS);
        assert!(config.viewer_command.is_none());
    }
}
