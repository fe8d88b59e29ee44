//! Session context threaded through every mode

use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError};
use crate::keymap::Keymap;
use crate::model::{HintStyle, HistoryRing, PersistentHistory, ScrollParams};

/// Everything a mode needs besides the platform
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub keymap: Keymap,
    /// Numeric prefix typed in normal mode
    pub opnum: u32,
    /// In-session jump list
    pub ring: HistoryRing,
    /// Where clicks are recorded; `None` disables the persistent history
    pub history_path: Option<PathBuf>,
    /// A single mode run that ends on the first selection or button
    pub oneshot: bool,
    /// The drag button is held down; survives mode switches
    pub dragging: bool,
}

impl Session {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let keymap = config.keymap()?;
        Ok(Self {
            config,
            keymap,
            opnum: 0,
            ring: HistoryRing::new(),
            history_path: None,
            oneshot: false,
            dragging: false,
        })
    }

    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    pub fn with_oneshot(mut self, oneshot: bool) -> Self {
        self.oneshot = oneshot;
        self
    }

    /// Swap in a new config generation; the old one stays on error
    pub fn apply_config(&mut self, config: Config) -> Result<(), ConfigError> {
        let keymap = config.keymap()?;
        self.config = config;
        self.keymap = keymap;
        Ok(())
    }

    /// Reload from `path` (or the default location)
    pub fn reload(&mut self, path: Option<&Path>) -> Result<(), ConfigError> {
        let config = Config::load(path)?;
        self.apply_config(config)?;
        tracing::info!("Config reloaded");
        Ok(())
    }

    pub fn hint_alphabet(&self) -> Vec<char> {
        self.config.hint_chars.chars().collect()
    }

    pub fn screen_alphabet(&self) -> Vec<char> {
        self.config.screen_chars.chars().collect()
    }

    pub fn hint_style(&self) -> HintStyle {
        HintStyle {
            bg: self.config.hint_bgcolor,
            fg: self.config.hint_fgcolor,
        }
    }

    pub fn scroll_params(&self) -> ScrollParams {
        ScrollParams::from_config(&self.config)
    }

    /// Persistent click history, empty when disabled
    pub fn load_history(&self) -> PersistentHistory {
        self.history_path
            .as_deref()
            .map(PersistentHistory::load)
            .unwrap_or_default()
    }

    /// Record a click position; failures only cost the history entry
    pub fn record_click(&self, x: i32, y: i32) {
        if let Some(path) = &self.history_path {
            if let Err(e) = PersistentHistory::record(path, x, y) {
                tracing::warn!("Failed to save click history {}: {}", path.display(), e);
            }
        }
    }
}
