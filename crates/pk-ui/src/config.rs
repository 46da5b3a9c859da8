// SPDX-License-Identifier: MIT
//
// Application configuration.
//
// `panelkit.toml` holds a flat table; every key is optional and unknown
// keys are ignored:
//
//   refresh_interval_ms = 100   # minimum time between repaints
//   nonblocking = true          # poll keys instead of waiting for them
//   confirm_quit = false        # ask before quitting on `q`
//   banner = true               # draw the welcome banner on every update
//   idle_sleep_ms = 0           # pause after an iteration with no key and
//                               # no repaint (0 = never pause)
//
// A missing file means defaults. A file that exists but does not parse is
// an error, so a typo never silently falls back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{UiError, UiResult};

/// Name of the config file, both locally and in the config directory.
pub const FILE_NAME: &str = "panelkit.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub refresh_interval_ms: u64,
    pub nonblocking: bool,
    pub confirm_quit: bool,
    pub banner: bool,
    pub idle_sleep_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 100,
            nonblocking: true,
            confirm_quit: false,
            banner: true,
            idle_sleep_ms: 0,
        }
    }
}

impl AppConfig {
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Pause after an idle loop iteration. Zero means the loop is paced
    /// by key reads alone.
    #[must_use]
    pub const fn idle_sleep(&self) -> Duration {
        Duration::from_millis(self.idle_sleep_ms)
    }

    /// Parse TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input or mistyped values.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Where to look for the config file: `./panelkit.toml` if it exists,
/// otherwise `<config dir>/panelkit/panelkit.toml`.
#[must_use]
pub fn discover() -> PathBuf {
    let local = PathBuf::from(FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("panelkit").join(FILE_NAME);
    }
    local
}

/// Load the config at `path`, or at [`discover`]'s location when `None`.
///
/// # Errors
///
/// `UiError::Config` when the file does not parse, `UiError::Io` when it
/// exists but cannot be read.
pub fn load_from(path: Option<PathBuf>) -> UiResult<AppConfig> {
    let path = path.unwrap_or_else(discover);
    match fs::read_to_string(&path) {
        Ok(text) => {
            let config = AppConfig::parse(&text).map_err(|source| UiError::Config {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), ?config, "config loaded");
            Ok(config)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log_defaults(&path);
            Ok(AppConfig::default())
        }
        Err(err) => Err(err.into()),
    }
}

fn log_defaults(path: &Path) {
    tracing::debug!(path = %path.display(), "no config file, using defaults");
}

// ─── Tests ───────────────────────────────────────────────────────────────────
