//! Daemon configuration
//!
//! Options live in `~/.config/keywarp/config.yaml` (or the file passed with
//! `--config`). Every option has a default; the `keys:` section overrides
//! chord bindings by action name:
//!
//! ```yaml
//! move_step: 15
//! hint_bgcolor: "#ffcc00"
//! keys:
//!   buttons: "m , ."
//!   hint_activation_key: A-M-f
//! ```
//!
//! Anything that fails to parse is fatal at load time.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::keymap::{Action, Keymap, KeymapError};

/// All tunable options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Chord overrides, `action name -> chord list`
    pub keys: BTreeMap<String, String>,

    /// Pixels moved per movement key press (times the numeric prefix)
    pub move_step: i32,
    /// Mouse button held by the drag toggle
    pub drag_button: u8,
    /// Milliseconds to wait for a second oneshot button press (double click)
    pub oneshot_timeout: u64,

    pub cursor_color: Color,
    /// Side of the square pointer indicator; also the smallest grid sector
    pub cursor_size: i32,

    /// Hint label alphabet
    pub hint_chars: String,
    /// Hint box size as a percentage of its lattice cell
    pub hint_size: u32,
    pub hint_bgcolor: Color,
    pub hint_fgcolor: Color,
    /// Side of the boxes drawn around history positions
    pub history_hint_size: i32,
    /// One label per screen in screen selection mode
    pub screen_chars: String,

    pub grid_nr: u32,
    pub grid_nc: u32,
    pub grid_color: Color,
    /// Grid line thickness
    pub grid_size: i32,

    /// Initial scroll velocity (units/s)
    pub scroll_speed: f64,
    /// Terminal scroll velocity (units/s)
    pub scroll_max_speed: f64,
    /// Acceleration while a scroll key is held (units/s²)
    pub scroll_acceleration: f64,
    /// Deceleration when coasting or countering (units/s², negative)
    pub scroll_deceleration: f64,
    /// Velocity added by a quick tap (units/s)
    pub scroll_fling_velocity: f64,
    /// A release within this many ms of the press counts as a fling
    pub scroll_fling_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: BTreeMap::new(),
            move_step: 10,
            drag_button: 1,
            oneshot_timeout: 300,
            cursor_color: Color::rgb(0xFF, 0x45, 0x00),
            cursor_size: 7,
            hint_chars: "abcdefghijklmnopqrstuvwxyz".to_string(),
            hint_size: 60,
            hint_bgcolor: Color::rgb(0x00, 0xFF, 0x00),
            hint_fgcolor: Color::rgb(0x00, 0x00, 0x00),
            history_hint_size: 28,
            screen_chars: "jkl;asdfg".to_string(),
            grid_nr: 2,
            grid_nc: 2,
            grid_color: Color::rgb(0x1C, 0x19, 0x12),
            grid_size: 4,
            scroll_speed: 300.0,
            scroll_max_speed: 9000.0,
            scroll_acceleration: 1600.0,
            scroll_deceleration: -3400.0,
            scroll_fling_velocity: 2000.0,
            scroll_fling_timeout: 150,
        }
    }
}

impl Config {
    /// Load config from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields defaults; a missing explicit file is an
    /// error. The result is fully validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match crate::config_paths::config_file() {
                Some(p) => (p, false),
                None => {
                    tracing::debug!("No config directory available, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !explicit && !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let config = Self::from_yaml(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the `keys:` overrides against the defaults
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        Ok(Keymap::from_overrides(&self.keys)?)
    }

    /// Check ranges and bindings that serde alone cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, option: &'static str, reason: &str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    option,
                    reason: reason.to_string(),
                })
            }
        }

        check(self.move_step > 0, "move_step", "must be positive")?;
        check(
            (1..=9).contains(&self.drag_button),
            "drag_button",
            "must be between 1 and 9",
        )?;
        check(self.cursor_size >= 0, "cursor_size", "must not be negative")?;
        check(
            (1..=100).contains(&self.hint_size),
            "hint_size",
            "must be a percentage between 1 and 100",
        )?;
        check(
            self.history_hint_size > 0,
            "history_hint_size",
            "must be positive",
        )?;
        check(self.grid_nr >= 1, "grid_nr", "must be at least 1")?;
        check(self.grid_nc >= 1, "grid_nc", "must be at least 1")?;
        check(self.grid_size >= 0, "grid_size", "must not be negative")?;
        check(self.scroll_speed >= 0.0, "scroll_speed", "must not be negative")?;
        check(
            self.scroll_max_speed > 0.0,
            "scroll_max_speed",
            "must be positive",
        )?;
        check(
            self.scroll_acceleration >= 0.0,
            "scroll_acceleration",
            "must not be negative",
        )?;
        check(
            self.scroll_deceleration < 0.0,
            "scroll_deceleration",
            "must be negative",
        )?;
        check(
            self.scroll_fling_velocity >= 0.0,
            "scroll_fling_velocity",
            "must not be negative",
        )?;

        self.keymap()?;
        Ok(())
    }

    /// Effective config as YAML, with every key binding spelled out
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        let keymap = self.keymap()?;
        let mut full = self.clone();
        full.keys = Action::ALL
            .iter()
            .filter_map(|action| {
                keymap
                    .binding(*action)
                    .map(|b| (action.name().to_string(), b.display_string()))
            })
            .collect();
        serde_yaml::to_string(&full).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Errors that make a configuration unusable
#[derive(Debug, Clone)]
pub enum ConfigError {
    Io { path: PathBuf, message: String },
    Parse(String),
    Keys(KeymapError),
    Invalid { option: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "Failed to read config {}: {}", path.display(), message)
            }
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Keys(e) => write!(f, "Config key error: {}", e),
            ConfigError::Invalid { option, reason } => {
                write!(f, "Invalid value for {}: {}", option, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<KeymapError> for ConfigError {
    fn from(e: KeymapError) -> Self {
        ConfigError::Keys(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml("move_step: 25\ngrid_nc: 3\n").unwrap();
        assert_eq!(config.move_step, 25);
        assert_eq!(config.grid_nc, 3);
        assert_eq!(config.grid_nr, 2);
        assert_eq!(config.hint_chars, Config::default().hint_chars);
    }

    #[test]
    fn test_color_option() {
        let config = Config::from_yaml("hint_bgcolor: \"#ffcc00\"\n").unwrap();
        assert_eq!(config.hint_bgcolor, Color::rgb(0xff, 0xcc, 0x00));
    }

    #[test]
    fn test_malformed_color_is_error() {
        let err = Config::from_yaml("cursor_color: \"#12\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_option_is_error() {
        let err = Config::from_yaml("warp_speed: 9\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_bad_key_is_error() {
        let err = Config::from_yaml("keys:\n  left: Z-h\n").unwrap_err();
        assert!(matches!(err, ConfigError::Keys(_)));

        let err = Config::from_yaml("keys:\n  fly: h\n").unwrap_err();
        assert!(matches!(err, ConfigError::Keys(KeymapError::UnknownAction(_))));
    }

    #[test]
    fn test_range_checks() {
        let err = Config::from_yaml("grid_nr: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { option: "grid_nr", .. }));

        let err = Config::from_yaml("scroll_deceleration: 100\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                option: "scroll_deceleration",
                ..
            }
        ));
    }

    #[test]
    fn test_to_yaml_round_trip() {
        let config = Config::from_yaml("move_step: 12\nkeys:\n  left: a\n").unwrap();
        let yaml = config.to_yaml().unwrap();
        let reparsed = Config::from_yaml(&yaml).unwrap();

        assert_eq!(reparsed.move_step, 12);
        assert_eq!(reparsed.keys.get("left").map(String::as_str), Some("a"));
        assert_eq!(reparsed.keys.get("exit").map(String::as_str), Some("esc"));
    }

    #[test]
    fn test_load_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "oneshot_timeout: 500\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.oneshot_timeout, 500);
    }
}
