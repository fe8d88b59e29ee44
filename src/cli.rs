//! Command-line argument parsing
//!
//! Without a mode flag keywarp runs as a daemon, waiting for activation
//! chords. A mode flag runs that mode once in the foreground and prints the
//! selected position to stdout.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::mode::Mode;
use crate::platform::parse_screen_size;

/// Keyboard-driven pointer control
#[derive(Parser, Debug)]
#[command(name = "keywarp", version, about = "Keyboard-driven pointer control")]
#[command(group(
    ArgGroup::new("run_mode")
        .args(["normal", "hint", "grid", "screen", "history", "hint_spec", "list_keys", "dump_config"])
        .multiple(false)
))]
pub struct CliArgs {
    /// Config file (default: ~/.config/keywarp/config.yaml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run normal mode once
    #[arg(long)]
    pub normal: bool,

    /// Run hint mode once
    #[arg(long)]
    pub hint: bool,

    /// Run grid mode once
    #[arg(long)]
    pub grid: bool,

    /// Run screen selection once
    #[arg(long)]
    pub screen: bool,

    /// Run history mode once
    #[arg(long)]
    pub history: bool,

    /// Run hint mode with labels read from FILE, one per line
    #[arg(long, value_name = "FILE")]
    pub hint_spec: Option<PathBuf>,

    /// With --normal: exit on the first button press, returning its index
    #[arg(long)]
    pub oneshot: bool,

    /// Print every action with its key bindings and exit
    #[arg(long)]
    pub list_keys: bool,

    /// Print the effective config as YAML and exit
    #[arg(long)]
    pub dump_config: bool,

    /// Read input from a replay script instead of a live keyboard
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Screen size for the headless backend, e.g. 1920x1080 (repeatable)
    #[arg(long = "screen-size", value_name = "WxH")]
    pub screen_sizes: Vec<String>,
}

/// What the process should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupMode {
    /// Wait for activation chords until input closes
    Daemon,
    /// Run one mode in the foreground
    Foreground(Mode),
    ListKeys,
    DumpConfig,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub mode: StartupMode,
    pub config_path: Option<PathBuf>,
    pub oneshot: bool,
    pub replay: Option<PathBuf>,
    pub screens: Vec<(i32, i32)>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        let mode = if self.list_keys {
            StartupMode::ListKeys
        } else if self.dump_config {
            StartupMode::DumpConfig
        } else if self.normal {
            StartupMode::Foreground(Mode::Normal)
        } else if self.hint {
            StartupMode::Foreground(Mode::Hint)
        } else if self.grid {
            StartupMode::Foreground(Mode::Grid)
        } else if self.screen {
            StartupMode::Foreground(Mode::ScreenSelection)
        } else if self.history {
            StartupMode::Foreground(Mode::History)
        } else if let Some(path) = self.hint_spec {
            StartupMode::Foreground(Mode::HintSpec(path))
        } else {
            StartupMode::Daemon
        };

        if self.oneshot && mode != StartupMode::Foreground(Mode::Normal) {
            return Err("--oneshot only applies to --normal".to_string());
        }

        let screens = self
            .screen_sizes
            .iter()
            .map(|s| parse_screen_size(s).map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StartupConfig {
            mode,
            config_path: self.config,
            oneshot: self.oneshot,
            replay: self.replay,
            screens,
        })
    }
}
