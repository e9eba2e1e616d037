//! Configuration file I/O: path resolution and loading.

use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{Error, Result};

/// Directory holding `config.toml`.
///
/// `%APPDATA%\morphtype` on Windows; elsewhere `$XDG_CONFIG_HOME/morphtype`,
/// then `~/.config/morphtype`. Falls back to `./morphtype` when none is set.
pub fn config_dir() -> PathBuf {
    let base = if cfg!(windows) {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
    };
    base.unwrap_or_else(|| PathBuf::from(".")).join("morphtype")
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

impl Config {
    /// Loads config from the default path. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Loads config from `path`, reporting read and parse errors.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_error = |reason: String| Error::Config {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let cfg = toml::from_str(&data).map_err(|e| config_error(e.to_string()))?;
        log::info!("config: loaded from {}", path.display());
        Ok(cfg)
    }
}
