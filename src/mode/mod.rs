//! Interaction modes
//!
//! Each mode reads input straight from the platform until it finishes, then
//! hands back a [`ModeOutcome`]: how it ended plus at most one event it did
//! not consume. The controller decides what runs next.

pub mod controller;
pub mod grid;
pub mod hint;
pub mod normal;
pub mod scroll;

use std::fmt;
use std::path::PathBuf;

use crate::keymap::InputEvent;
use crate::platform::{Platform, Pointer};
use crate::session::Session;

pub use controller::Controller;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Hint,
    /// A hint run that prints its selection instead of entering normal mode
    HintOneshot,
    Grid,
    ScreenSelection,
    History,
    /// Hints labelled from a word list
    HintSpec(PathBuf),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::Hint => write!(f, "hint"),
            Mode::HintOneshot => write!(f, "hint (oneshot)"),
            Mode::Grid => write!(f, "grid"),
            Mode::ScreenSelection => write!(f, "screen selection"),
            Mode::History => write!(f, "history"),
            Mode::HintSpec(path) => write!(f, "hint spec {}", path.display()),
        }
    }
}

/// How a mode ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    /// Leave the activation entirely
    Quit,
    /// Enter another mode fresh
    Switch(Mode),
    /// Finished; continue in normal mode
    Done,
    /// A button binding fired in a oneshot session (1-based index)
    Button(usize),
}

/// A target the mode landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub x: i32,
    pub y: i32,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeOutcome {
    pub exit: Exit,
    /// An event read but not consumed; the next mode sees it first
    pub leftover: Option<InputEvent>,
    pub selection: Option<Selection>,
}

impl ModeOutcome {
    pub fn quit() -> Self {
        Self {
            exit: Exit::Quit,
            leftover: None,
            selection: None,
        }
    }

    pub fn switch(mode: Mode) -> Self {
        Self {
            exit: Exit::Switch(mode),
            leftover: None,
            selection: None,
        }
    }

    pub fn done(leftover: Option<InputEvent>) -> Self {
        Self {
            exit: Exit::Done,
            leftover,
            selection: None,
        }
    }

    pub fn button(index: usize) -> Self {
        Self {
            exit: Exit::Button(index),
            leftover: None,
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }
}

/// Draw the square pointer indicator centred on `pointer`
pub(crate) fn draw_cursor(platform: &mut dyn Platform, session: &Session, pointer: Pointer) {
    let size = session.config.cursor_size;
    if size <= 0 {
        return;
    }
    platform.draw_box(
        pointer.screen,
        pointer.x - size / 2,
        pointer.y - size / 2,
        size,
        size,
        session.config.cursor_color,
    );
}

/// Read the next key press, skipping releases; `None` when input closed
/// Let go of a drag left held by normal mode
pub(crate) fn release_drag(platform: &mut dyn Platform, session: &mut Session) {
    if session.dragging {
        platform.mouse_up(session.config.drag_button);
        session.dragging = false;
    }
}

pub(crate) fn next_press(
    platform: &mut dyn Platform,
) -> Result<Option<InputEvent>, crate::platform::PlatformError> {
    loop {
        match platform.next_event(None)? {
            None => return Ok(None),
            Some(event) if event.pressed => return Ok(Some(event)),
            Some(_) => {}
        }
    }
}
