//! Key-sequence matcher
//!
//! This module turns textual chord specs into typed bindings and matches
//! live input events against them:
//! - Parses `[mod-]*base` specs (`A-M-x`, `C--`, `H`, `esc`)
//! - Binds each named option to an ordered list of alternatives
//! - Reports which alternative fired (1-based), so callers can tell
//!   e.g. which mouse button a key stands for
//!
//! # Architecture
//!
//! ```text
//! config `keys:` map → parse_key_list() → ConfigBinding → Keymap::matches(Action, InputEvent)
//! ```

mod action;
mod binding;
#[allow(clippy::module_inception)]
mod keymap;
mod parse;
mod types;

pub use action::Action;
pub use binding::ConfigBinding;
pub use keymap::Keymap;
pub use parse::{format_key_sequence, parse_key_list, parse_key_sequence, KeymapError};
pub use types::{InputEvent, KeyCode, KeySequence, Modifiers};
