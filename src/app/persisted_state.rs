// SPDX-License-Identifier: MPL-2.0
//! Session state persistence using CBOR format.
//!
//! This holds state that should survive restarts but is not a user
//! preference: the bearer token issued by the authentication provider
//! (stored under the fixed `auth_token` field) and the last directory used
//! by the media picker. User preferences live in `settings.toml`.
//!
//! # Path Resolution
//!
//! 1. Use `load_from()`/`save_to()` with an explicit directory
//! 2. Set `DRIFTLINE_DATA_DIR` (or pass `--data-dir`)
//! 3. Falls back to the platform-specific data directory

use super::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

/// Session state that persists across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    /// Bearer token attached to authenticated requests. Issued by the
    /// authentication provider; this client only stores and forwards it.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Last directory used when picking media attachments.
    #[serde(default)]
    pub last_media_directory: Option<PathBuf>,
}

impl SessionState {
    /// Loads session state from the default location.
    ///
    /// Returns `(state, optional_warning_key)`. A missing file is normal
    /// (first run, or logged out); a broken file degrades to defaults with
    /// a warning for the notification area.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads session state from a custom directory.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                match ciborium::from_reader(reader) {
                    Ok(state) => (state, None),
                    Err(_) => (
                        Self::default(),
                        Some("notification-state-parse-error".to_string()),
                    ),
                }
            }
            Err(_) => (
                Self::default(),
                Some("notification-state-read-error".to_string()),
            ),
        }
    }

    /// Saves session state to the default location.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves session state to a custom directory. Returns an optional
    /// warning key if the write failed.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return None;
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-state-write-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                let writer = BufWriter::new(file);
                match ciborium::into_writer(self, writer) {
                    Ok(()) => None,
                    Err(_) => Some("notification-state-write-error".to_string()),
                }
            }
            Err(_) => Some("notification-state-write-error".to_string()),
        }
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|dir| dir.join(STATE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_through_cbor() {
        let dir = tempdir().expect("temp dir");

        let state = SessionState {
            auth_token: Some("token-abc".to_string()),
            last_media_directory: Some(PathBuf::from("/home/mira/pictures")),
        };
        assert!(state.save_to(Some(dir.path().to_path_buf())).is_none());

        let (loaded, warning) = SessionState::load_from(Some(dir.path().to_path_buf()));
        assert_eq!(loaded, state);
        assert!(warning.is_none());
    }

    #[test]
    fn missing_file_is_a_clean_default() {
        let dir = tempdir().expect("temp dir");
        let (state, warning) = SessionState::load_from(Some(dir.path().to_path_buf()));
        assert_eq!(state, SessionState::default());
        assert!(warning.is_none());
    }

    #[test]
    fn corrupt_file_degrades_with_warning() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join(STATE_FILE), b"not cbor").expect("write");

        let (state, warning) = SessionState::load_from(Some(dir.path().to_path_buf()));
        assert_eq!(state, SessionState::default());
        assert_eq!(warning.as_deref(), Some("notification-state-parse-error"));
    }
}
