//! Action enum naming every bindable key option
//!
//! Each action owns its config name, its default chord list and whether it
//! matches strictly (exact modifiers) or loosely (modifiers ignored).

use std::fmt;
use std::str::FromStr;

/// Every key option that can be bound in the `keys:` config section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    // ========================================================================
    // Activation chords (grabbed globally while idle)
    // ========================================================================
    /// Enter normal mode
    Activation,
    /// Enter hint mode, then normal mode
    HintActivation,
    /// Second hint activation variant
    Hint2Activation,
    /// Hint mode, then stop without entering normal mode
    HintOneshot,
    /// Second oneshot hint variant
    Hint2Oneshot,
    /// Enter grid mode, then normal mode
    GridActivation,
    /// Enter screen selection mode
    ScreenActivation,
    /// Enter history mode
    HistoryActivation,

    // ========================================================================
    // Normal mode
    // ========================================================================
    Left,
    Down,
    Up,
    Right,
    /// Warp to the top edge, keeping x
    Top,
    /// Warp to the vertical middle, keeping x
    Middle,
    /// Warp to the bottom edge, keeping x
    Bottom,
    /// Warp to the left edge, keeping y
    Start,
    /// Warp to the right edge, keeping y
    End,
    /// Click buttons 1..n, staying in normal mode
    Buttons,
    /// Click buttons 1..n, then leave after the double-click window
    OneshotButtons,
    /// Toggle holding the drag button
    Drag,
    /// Print pointer coordinates to the output channel
    Print,
    Exit,
    Hint,
    Hint2,
    Grid,
    Screen,
    History,
    HistBack,
    HistForward,
    ScrollDown,
    ScrollUp,

    // ========================================================================
    // Hint mode
    // ========================================================================
    HintUndo,
    HintUndoAll,

    // ========================================================================
    // Grid mode
    // ========================================================================
    /// Sector keys in row-major order
    GridKeys,
    GridUp,
    GridLeft,
    GridDown,
    GridRight,
    GridCutUp,
    GridCutLeft,
    GridCutDown,
    GridCutRight,
    GridExit,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::Activation,
        Action::HintActivation,
        Action::Hint2Activation,
        Action::HintOneshot,
        Action::Hint2Oneshot,
        Action::GridActivation,
        Action::ScreenActivation,
        Action::HistoryActivation,
        Action::Left,
        Action::Down,
        Action::Up,
        Action::Right,
        Action::Top,
        Action::Middle,
        Action::Bottom,
        Action::Start,
        Action::End,
        Action::Buttons,
        Action::OneshotButtons,
        Action::Drag,
        Action::Print,
        Action::Exit,
        Action::Hint,
        Action::Hint2,
        Action::Grid,
        Action::Screen,
        Action::History,
        Action::HistBack,
        Action::HistForward,
        Action::ScrollDown,
        Action::ScrollUp,
        Action::HintUndo,
        Action::HintUndoAll,
        Action::GridKeys,
        Action::GridUp,
        Action::GridLeft,
        Action::GridDown,
        Action::GridRight,
        Action::GridCutUp,
        Action::GridCutLeft,
        Action::GridCutDown,
        Action::GridCutRight,
        Action::GridExit,
    ];

    /// Name used in the config file
    pub const fn name(self) -> &'static str {
        match self {
            Action::Activation => "activation_key",
            Action::HintActivation => "hint_activation_key",
            Action::Hint2Activation => "hint2_activation_key",
            Action::HintOneshot => "hint_oneshot_key",
            Action::Hint2Oneshot => "hint2_oneshot_key",
            Action::GridActivation => "grid_activation_key",
            Action::ScreenActivation => "screen_activation_key",
            Action::HistoryActivation => "history_activation_key",
            Action::Left => "left",
            Action::Down => "down",
            Action::Up => "up",
            Action::Right => "right",
            Action::Top => "top",
            Action::Middle => "middle",
            Action::Bottom => "bottom",
            Action::Start => "start",
            Action::End => "end",
            Action::Buttons => "buttons",
            Action::OneshotButtons => "oneshot_buttons",
            Action::Drag => "drag",
            Action::Print => "print",
            Action::Exit => "exit",
            Action::Hint => "hint",
            Action::Hint2 => "hint2",
            Action::Grid => "grid",
            Action::Screen => "screen",
            Action::History => "history",
            Action::HistBack => "hist_back",
            Action::HistForward => "hist_forward",
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::HintUndo => "hint_undo",
            Action::HintUndoAll => "hint_undo_all",
            Action::GridKeys => "grid_keys",
            Action::GridUp => "grid_up",
            Action::GridLeft => "grid_left",
            Action::GridDown => "grid_down",
            Action::GridRight => "grid_right",
            Action::GridCutUp => "grid_cut_up",
            Action::GridCutLeft => "grid_cut_left",
            Action::GridCutDown => "grid_cut_down",
            Action::GridCutRight => "grid_cut_right",
            Action::GridExit => "grid_exit",
        }
    }

    /// Default chord list, in the same syntax the config file uses
    pub const fn default_keys(self) -> &'static str {
        match self {
            Action::Activation => "A-M-c",
            Action::HintActivation => "A-M-x",
            Action::Hint2Activation => "A-M-X",
            Action::HintOneshot => "A-M-l",
            Action::Hint2Oneshot => "A-M-L",
            Action::GridActivation => "A-M-g",
            Action::ScreenActivation => "A-M-s",
            Action::HistoryActivation => "A-M-h",
            Action::Left => "h",
            Action::Down => "j",
            Action::Up => "k",
            Action::Right => "l",
            Action::Top => "H",
            Action::Middle => "M",
            Action::Bottom => "L",
            Action::Start => "0",
            Action::End => "$",
            Action::Buttons => "m , .",
            Action::OneshotButtons => "n - /",
            Action::Drag => "v",
            Action::Print => "p",
            Action::Exit => "esc",
            Action::Hint => "x",
            Action::Hint2 => "X",
            Action::Grid => "g",
            Action::Screen => "s",
            Action::History => ";",
            Action::HistBack => "C-o",
            Action::HistForward => "C-i",
            Action::ScrollDown => "e",
            Action::ScrollUp => "r",
            Action::HintUndo => "backspace",
            Action::HintUndoAll => "C-u",
            Action::GridKeys => "u i j k",
            Action::GridUp => "w",
            Action::GridLeft => "a",
            Action::GridDown => "s",
            Action::GridRight => "d",
            Action::GridCutUp => "W",
            Action::GridCutLeft => "A",
            Action::GridCutDown => "S",
            Action::GridCutRight => "D",
            Action::GridExit => "c",
        }
    }

    /// Whether matching requires the exact modifier set.
    ///
    /// Loose bindings fire regardless of stray modifiers held with them.
    pub const fn strict(self) -> bool {
        !matches!(self, Action::Exit | Action::HintUndo)
    }

    /// Activation chords are the only ones recognized while idle
    pub const fn is_activation(self) -> bool {
        matches!(
            self,
            Action::Activation
                | Action::HintActivation
                | Action::Hint2Activation
                | Action::HintOneshot
                | Action::Hint2Oneshot
                | Action::GridActivation
                | Action::ScreenActivation
                | Action::HistoryActivation
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.name() == s)
            .ok_or(())
    }
}
