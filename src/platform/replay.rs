//! Replay scripts for the headless backend
//!
//! One directive per line:
//!
//! ```text
//! # activate normal mode, nudge right twice, click
//! tap A-M-c
//! tap 2
//! tap l
//! wait 50
//! press m
//! release m
//! reload
//! ```
//!
//! Blank lines and `#` comments are ignored.

use std::path::Path;
use std::time::Duration;

use super::headless::Step;
use super::PlatformError;
use crate::keymap::{parse_key_sequence, InputEvent};

/// Parse a script into headless steps
pub fn parse_script(content: &str) -> Result<Vec<Step>, PlatformError> {
    let mut steps = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (directive, arg) = match line.split_once(char::is_whitespace) {
            Some((d, a)) => (d, a.trim()),
            None => (line, ""),
        };
        let err = |message: String| PlatformError::Script {
            line: line_no,
            message,
        };

        match directive {
            "press" | "release" | "tap" => {
                if arg.is_empty() {
                    return Err(err(format!("'{}' needs a key", directive)));
                }
                let seq = parse_key_sequence(arg).map_err(|e| err(e.to_string()))?;
                if directive != "release" {
                    steps.push(Step::Event(InputEvent::from_sequence(seq, true)));
                }
                if directive != "press" {
                    steps.push(Step::Event(InputEvent::from_sequence(seq, false)));
                }
            }
            "wait" => {
                let ms: u64 = arg
                    .parse()
                    .map_err(|_| err(format!("invalid wait '{}'", arg)))?;
                steps.push(Step::Wait(Duration::from_millis(ms)));
            }
            "reload" => steps.push(Step::Reload),
            other => return Err(err(format!("unknown directive '{}'", other))),
        }
    }

    Ok(steps)
}

/// Read and parse a script file
pub fn load_script(path: &Path) -> Result<Vec<Step>, PlatformError> {
    let content = std::fs::read_to_string(path).map_err(|e| PlatformError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let steps = parse_script(&content)?;
    tracing::info!("Loaded {} replay steps from {}", steps.len(), path.display());
    Ok(steps)
}
