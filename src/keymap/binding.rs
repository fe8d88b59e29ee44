//! ConfigBinding: one named option mapped to an ordered list of chords

use super::types::{InputEvent, KeySequence};

/// A named binding with one or more alternative chords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBinding {
    /// Option name, for diagnostics
    pub name: String,
    /// Alternatives in declaration order
    pub sequences: Vec<KeySequence>,
    /// Exact modifier comparison when true
    pub strict: bool,
}

impl ConfigBinding {
    pub fn new(name: impl Into<String>, sequences: Vec<KeySequence>, strict: bool) -> Self {
        Self {
            name: name.into(),
            sequences,
            strict,
        }
    }

    /// 1-based index of the first alternative matching the event, 0 for none
    pub fn matches(&self, event: &InputEvent) -> usize {
        self.sequences
            .iter()
            .position(|seq| seq.matches(event, self.strict))
            .map_or(0, |idx| idx + 1)
    }

    /// Spec-form display, e.g. "m , ."
    pub fn display_string(&self) -> String {
        self.sequences
            .iter()
            .map(|seq| seq.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
