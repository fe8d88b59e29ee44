//! Centralized configuration paths for keywarp
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/keywarp/`
//! - Windows: `%APPDATA%\keywarp\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "keywarp";

/// Base config directory for keywarp
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/keywarp`
///   - Else: `~/.config/keywarp`
///
/// Windows:
///   - `%APPDATA%\keywarp`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

fn in_config_dir(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

/// `~/.config/keywarp/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    in_config_dir("config.yaml")
}

/// `~/.config/keywarp/history`, the binary click history
pub fn history_file() -> Option<PathBuf> {
    in_config_dir("history")
}

/// `~/.config/keywarp/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    in_config_dir("logs")
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
