//! keywarp - keyboard-driven pointer control
//!
//! A modal engine for moving, clicking and scrolling the pointer from the
//! keyboard. Modes (normal movement, hints, grid, screen selection, click
//! history) run against a [`platform::Platform`], which supplies input and
//! carries out pointer and drawing requests.

pub mod cli;
pub mod color;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod mode;
pub mod model;
pub mod platform;
pub mod session;
pub mod tracing;
pub mod watcher;

// Re-export commonly used types
pub use config::Config;
pub use mode::{Controller, Mode};
pub use platform::{HeadlessPlatform, Platform};
pub use session::Session;
