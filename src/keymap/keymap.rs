//! Keymap: every Action resolved to a ConfigBinding

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use super::action::Action;
use super::binding::ConfigBinding;
use super::parse::{parse_key_list, KeymapError};
use super::types::{InputEvent, KeyCode, KeySequence};

/// Resolved key table for one config generation
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<Action, ConfigBinding>,
    /// Numeric prefix keys `0`-`9`, matched loosely
    digits: ConfigBinding,
}

impl Keymap {
    /// Build a keymap from the built-in defaults
    pub fn with_defaults() -> Result<Self, KeymapError> {
        Self::from_overrides(&BTreeMap::new())
    }

    /// Build a keymap from defaults plus `name -> chord list` overrides.
    ///
    /// Unknown names and unparseable chords are errors.
    pub fn from_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, KeymapError> {
        let mut bindings = HashMap::with_capacity(Action::ALL.len());

        for action in Action::ALL {
            let sequences = parse_key_list(action.default_keys())?;
            bindings.insert(
                *action,
                ConfigBinding::new(action.name(), sequences, action.strict()),
            );
        }

        for (name, value) in overrides {
            let action =
                Action::from_str(name).map_err(|_| KeymapError::UnknownAction(name.clone()))?;
            let sequences = parse_key_list(value)
                .map_err(|e| KeymapError::InvalidKey(format!("{}: {}", name, e)))?;
            tracing::debug!("Key override {} = {}", name, value);
            bindings.insert(
                action,
                ConfigBinding::new(action.name(), sequences, action.strict()),
            );
        }

        let digits = ConfigBinding::new(
            "digits",
            ('0'..='9')
                .map(|c| KeySequence::key(KeyCode::Char(c)))
                .collect(),
            false,
        );

        Ok(Self { bindings, digits })
    }

    /// 1-based alternative index of `action` matching the event, 0 for none
    pub fn matches(&self, action: Action, event: &InputEvent) -> usize {
        self.bindings
            .get(&action)
            .map_or(0, |binding| binding.matches(event))
    }

    /// Convenience wrapper for `matches(..) != 0`
    pub fn is(&self, action: Action, event: &InputEvent) -> bool {
        self.matches(action, event) != 0
    }

    /// Digit value of a numeric-prefix key, ignoring modifier noise
    pub fn digit(&self, event: &InputEvent) -> Option<u32> {
        match self.digits.matches(event) {
            0 => None,
            idx => Some(idx as u32 - 1),
        }
    }

    /// Get the binding for an action
    pub fn binding(&self, action: Action) -> Option<&ConfigBinding> {
        self.bindings.get(&action)
    }

    /// Every activation chord, in activation-table order
    pub fn activation_sequences(&self) -> Vec<KeySequence> {
        Action::ALL
            .iter()
            .filter(|action| action.is_activation())
            .filter_map(|action| self.bindings.get(action))
            .flat_map(|binding| binding.sequences.iter().copied())
            .collect()
    }

    /// First action of `candidates` (in order) whose binding matches
    pub fn resolve(&self, candidates: &[Action], event: &InputEvent) -> Option<Action> {
        candidates
            .iter()
            .copied()
            .find(|action| self.is(*action, event))
    }
}
