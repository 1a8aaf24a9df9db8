// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`DRIFTLINE_DATA_DIR`, `DRIFTLINE_CONFIG_DIR`)
//! 4. **Platform default** - via the `dirs` crate

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "Driftline";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "DRIFTLINE_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "DRIFTLINE_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes CLI overrides for data and config directories.
///
/// Call once at application startup, before any path resolution.
///
/// # Panics
///
/// Panics if called more than once.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    CLI_DATA_DIR
        .set(data_dir.map(PathBuf::from))
        .expect("CLI data dir override already initialized");
    CLI_CONFIG_DIR
        .set(config_dir.map(PathBuf::from))
        .expect("CLI config dir override already initialized");
}

fn get_cli_data_dir() -> Option<PathBuf> {
    CLI_DATA_DIR.get().and_then(Clone::clone)
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

fn env_dir(var: &str) -> Option<PathBuf> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(PathBuf::from(value)),
        _ => None,
    }
}

/// Returns the application data directory (persisted session state).
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory with an optional explicit
/// override (used by tests).
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = get_cli_data_dir() {
        return Some(path);
    }
    if let Some(path) = env_dir(ENV_DATA_DIR) {
        return Some(path);
    }
    dirs::data_dir().map(|dir| dir.join(APP_NAME))
}

/// Returns the configuration directory (user preferences).
pub fn get_config_dir() -> Option<PathBuf> {
    get_config_dir_with_override(None)
}

/// Returns the configuration directory with an optional explicit override.
pub fn get_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = get_cli_config_dir() {
        return Some(path);
    }
    if let Some(path) = env_dir(ENV_CONFIG_DIR) {
        return Some(path);
    }
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        let dir = PathBuf::from("/tmp/driftline-test");
        assert_eq!(
            get_app_data_dir_with_override(Some(dir.clone())),
            Some(dir.clone())
        );
        assert_eq!(get_config_dir_with_override(Some(dir.clone())), Some(dir));
    }
}
