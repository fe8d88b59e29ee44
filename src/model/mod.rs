//! Pure state for each interaction engine
//!
//! Nothing in here talks to the platform; the drivers in [`crate::mode`]
//! feed events in and act on the results.

pub mod grid;
pub mod hint;
pub mod history;
pub mod scroll;

pub use grid::{AxisSelect, GridState, PanDirection};
pub use hint::{Hint, HintError, HintSet, HintStyle};
pub use history::{HistoryRing, PersistentHistory};
pub use scroll::{ScrollDirection, ScrollParams, ScrollState};
