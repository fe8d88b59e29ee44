//! Platform gateway
//!
//! Everything the engine needs from the outside world: keyboard input,
//! pointer control, screen geometry, overlay drawing, file monitoring and a
//! clock. Modes only ever talk to a `&mut dyn Platform`.

pub mod headless;
pub mod replay;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::color::Color;
use crate::keymap::{InputEvent, KeySequence};
use crate::model::{Hint, HintStyle};

pub use headless::{HeadlessPlatform, Step};

/// Index into [`Platform::screen_list`]
pub type ScreenId = usize;

/// Pointer location, in screen-local pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub screen: ScreenId,
    pub x: i32,
    pub y: i32,
}

pub trait Platform {
    /// Next input event.
    ///
    /// `None` means the timeout elapsed, or with no timeout that the input
    /// source is closed.
    fn next_event(&mut self, timeout: Option<Duration>) -> Result<Option<InputEvent>, PlatformError>;

    /// True once no further input can arrive
    fn is_closed(&self) -> bool {
        false
    }

    /// Block until a press matching one of `sequences` (strictly) arrives.
    ///
    /// Everything else is discarded. `None` means the input source closed.
    fn wait_for_any(
        &mut self,
        sequences: &[KeySequence],
    ) -> Result<Option<InputEvent>, PlatformError> {
        loop {
            match self.next_event(None)? {
                None => return Ok(None),
                Some(event)
                    if event.pressed && sequences.iter().any(|s| s.matches(&event, true)) =>
                {
                    return Ok(Some(event));
                }
                Some(event) => tracing::trace!("Ignoring {:?} while idle", event),
            }
        }
    }

    fn grab_keyboard(&mut self) -> Result<(), PlatformError>;
    fn ungrab_keyboard(&mut self);

    fn mouse_move(&mut self, screen: ScreenId, x: i32, y: i32);
    fn mouse_click(&mut self, button: u8);
    fn mouse_down(&mut self, button: u8);
    fn mouse_up(&mut self, button: u8);
    fn mouse_get_position(&self) -> Pointer;

    fn screen_list(&self) -> Vec<ScreenId>;
    /// `(width, height)` of a screen
    fn screen_get_dimensions(&self, screen: ScreenId) -> (i32, i32);

    fn draw_box(&mut self, screen: ScreenId, x: i32, y: i32, w: i32, h: i32, color: Color);
    fn draw_hints(&mut self, screen: ScreenId, hints: &[Hint], style: &HintStyle);
    fn clear(&mut self, screen: ScreenId);
    /// Flush pending drawing to the display
    fn commit(&mut self);

    /// Start watching a file; changes surface through [`Platform::take_reload`]
    fn monitor_file(&mut self, path: &Path) -> Result<(), PlatformError>;

    /// True (once) if a monitored file changed since the last call
    fn take_reload(&mut self) -> bool {
        false
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// One side effect as recorded by [`HeadlessPlatform`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Grab,
    Ungrab,
    Move { screen: ScreenId, x: i32, y: i32 },
    Click(u8),
    Down(u8),
    Up(u8),
    DrawBox {
        screen: ScreenId,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
    },
    DrawHints { screen: ScreenId, labels: Vec<String> },
    Clear(ScreenId),
    Commit,
}

/// Errors raised by a platform backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The keyboard could not be grabbed
    Grab(String),
    Watch { path: PathBuf, message: String },
    Io { path: PathBuf, message: String },
    /// A replay script line could not be understood
    Script { line: usize, message: String },
    InvalidScreenSize(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::Grab(reason) => write!(f, "Failed to grab keyboard: {}", reason),
            PlatformError::Watch { path, message } => {
                write!(f, "Failed to watch {}: {}", path.display(), message)
            }
            PlatformError::Io { path, message } => {
                write!(f, "Failed to read {}: {}", path.display(), message)
            }
            PlatformError::Script { line, message } => {
                write!(f, "Replay script line {}: {}", line, message)
            }
            PlatformError::InvalidScreenSize(s) => {
                write!(f, "Invalid screen size '{}' (expected WIDTHxHEIGHT)", s)
            }
        }
    }
}

impl std::error::Error for PlatformError {}

/// Parse a `WIDTHxHEIGHT` screen size
pub fn parse_screen_size(s: &str) -> Result<(i32, i32), PlatformError> {
    let invalid = || PlatformError::InvalidScreenSize(s.to_string());
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: i32 = w.trim().parse().map_err(|_| invalid())?;
    let h: i32 = h.trim().parse().map_err(|_| invalid())?;
    if w <= 0 || h <= 0 {
        return Err(invalid());
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_screen_size() {
        assert_eq!(parse_screen_size("1920x1080").unwrap(), (1920, 1080));
        assert_eq!(parse_screen_size("800X600").unwrap(), (800, 600));
        assert!(parse_screen_size("1920").is_err());
        assert!(parse_screen_size("0x10").is_err());
        assert!(parse_screen_size("axb").is_err());
    }
}
