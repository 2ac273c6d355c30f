// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[alerts]` - Notification queue capacity and timing
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Set `ICED_ALERTS_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_alerts::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.alerts.max_visible = Some(5);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Warning key reported when an existing config file cannot be used.
pub const CONFIG_LOAD_WARNING: &str = "notification-config-load-error";

/// Notification queue settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertsConfig {
    /// Maximum number of simultaneously visible notifications.
    #[serde(default = "default_max_visible", skip_serializing_if = "Option::is_none")]
    pub max_visible: Option<usize>,

    /// Hold time for notifications that do not set their own (milliseconds).
    #[serde(default = "default_hold_ms", skip_serializing_if = "Option::is_none")]
    pub default_hold_ms: Option<u64>,

    /// Forced-disposal grace after the hold (milliseconds).
    #[serde(default = "default_exit_grace_ms", skip_serializing_if = "Option::is_none")]
    pub exit_grace_ms: Option<u64>,

    /// Enter/exit transition length (milliseconds).
    #[serde(default = "default_transition_ms", skip_serializing_if = "Option::is_none")]
    pub transition_ms: Option<u64>,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible(),
            default_hold_ms: default_hold_ms(),
            exit_grace_ms: default_exit_grace_ms(),
            transition_ms: default_transition_ms(),
        }
    }
}

impl AlertsConfig {
    /// Visible capacity, clamped to the supported range.
    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible
            .unwrap_or(DEFAULT_MAX_VISIBLE)
            .clamp(MIN_MAX_VISIBLE, MAX_MAX_VISIBLE)
    }

    #[must_use]
    pub fn default_hold(&self) -> Duration {
        Duration::from_millis(self.default_hold_ms.unwrap_or(DEFAULT_HOLD_MS).min(MAX_HOLD_MS))
    }

    #[must_use]
    pub fn exit_grace(&self) -> Duration {
        Duration::from_millis(
            self.exit_grace_ms
                .unwrap_or(DEFAULT_EXIT_GRACE_MS)
                .min(MAX_EXIT_GRACE_MS),
        )
    }

    #[must_use]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(
            self.transition_ms
                .unwrap_or(DEFAULT_TRANSITION_MS)
                .min(MAX_TRANSITION_MS),
        )
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Notification queue settings.
    #[serde(default)]
    pub alerts: AlertsConfig,
}

fn default_max_visible() -> Option<usize> {
    Some(DEFAULT_MAX_VISIBLE)
}

fn default_hold_ms() -> Option<u64> {
    Some(DEFAULT_HOLD_MS)
}

fn default_exit_grace_ms() -> Option<u64> {
    Some(DEFAULT_EXIT_GRACE_MS)
}

fn default_transition_ms() -> Option<u64> {
    Some(DEFAULT_TRANSITION_MS)
}

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "falling back to default config");
                    return (Config::default(), Some(CONFIG_LOAD_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            alerts: AlertsConfig {
                max_visible: Some(4),
                default_hold_ms: Some(6_000),
                exit_grace_ms: Some(250),
                transition_ms: Some(150),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_warns_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[alerts]\nmax_visible = \"many\"")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(CONFIG_LOAD_WARNING));
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("[alerts]\nmax_visible = 3\n").expect("valid toml");
        assert_eq!(config.alerts.max_visible(), 3);
        assert_eq!(config.alerts.default_hold(), Duration::from_millis(DEFAULT_HOLD_MS));
        assert_eq!(config.alerts.exit_grace(), Duration::from_millis(DEFAULT_EXIT_GRACE_MS));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let alerts = AlertsConfig {
            max_visible: Some(0),
            default_hold_ms: Some(u64::MAX),
            exit_grace_ms: Some(u64::MAX),
            transition_ms: Some(u64::MAX),
        };
        assert_eq!(alerts.max_visible(), MIN_MAX_VISIBLE);
        assert_eq!(alerts.default_hold(), Duration::from_millis(MAX_HOLD_MS));
        assert_eq!(alerts.exit_grace(), Duration::from_millis(MAX_EXIT_GRACE_MS));
        assert_eq!(alerts.transition(), Duration::from_millis(MAX_TRANSITION_MS));
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }
}
