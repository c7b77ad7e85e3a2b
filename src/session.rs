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

//! Session-scoped snapshot of the rotation list.
//!
//! Each time a rotation starts, the list as supplied (pre-filter, literal
//! order) is snapshotted to a file in the OS temp directory under the key
//! `urls`. The snapshot is write-only from this side: nothing here ever
//! reads it back, and a failed write is silently ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const SESSION_FILE: &str = "rotatui-session.toml";

#[derive(Serialize, Deserialize, Default, Debug, PartialEq, Eq)]
struct SessionSnapshot {
    urls: Vec<String>,
}

pub(crate) fn session_path() -> PathBuf {
    std::env::temp_dir().join(SESSION_FILE)
}

/// Best-effort write of the current rotation list.
pub(crate) fn snapshot_urls(urls: &[String]) {
    let snapshot = SessionSnapshot {
        urls: urls.to_vec(),
    };
    confy::store_path(session_path(), &snapshot).ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_preserves_literal_order_and_blanks() {
        let urls = vec!["b".to_string(), "".to_string(), "a".to_string()];

        snapshot_urls(&urls);

        let read: SessionSnapshot =
            confy::load_path(session_path()).expect("snapshot should load back");
        assert_eq!(read, SessionSnapshot { urls });
    }
}
