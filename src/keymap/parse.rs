//! Chord-spec parsing
//!
//! Specs look like `A-M-x`, `C--`, `esc` or `H` (a bare uppercase letter
//! implies Shift). Config values may list several specs separated by
//! spaces or commas.

use super::types::{KeyCode, KeySequence, Modifiers};

/// Parse a single chord spec like "A-M-x" into a KeySequence
pub fn parse_key_sequence(spec: &str) -> Result<KeySequence, KeymapError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(KeymapError::InvalidKey(spec.to_string()));
    }

    let mut mods = Modifiers::NONE;
    let mut rest = spec;

    // A modifier prefix is one letter followed by '-' with something after it
    loop {
        let bytes = rest.as_bytes();
        if bytes.len() < 3 || bytes[1] != b'-' {
            break;
        }
        let modifier = match bytes[0] {
            b'A' => Modifiers::ALT,
            b'M' => Modifiers::META,
            b'S' => Modifiers::SHIFT,
            b'C' => Modifiers::CTRL,
            _ => {
                return Err(KeymapError::InvalidKey(format!(
                    "unknown modifier '{}' in {}",
                    bytes[0] as char, spec
                )))
            }
        };
        mods = mods | modifier;
        rest = &rest[2..];
    }

    let mut chars = rest.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_uppercase() {
            mods = mods | Modifiers::SHIFT;
        }
        return Ok(KeySequence::new(mods, KeyCode::Char(c.to_ascii_lowercase())));
    }

    let code = parse_key_name(rest)
        .ok_or_else(|| KeymapError::InvalidKey(format!("unknown key name '{}' in {}", rest, spec)))?;

    Ok(KeySequence::new(mods, code))
}

/// Parse a whitespace/comma separated list of alternatives, keeping order
pub fn parse_key_list(value: &str) -> Result<Vec<KeySequence>, KeymapError> {
    let mut sequences = Vec::new();

    for token in value.split_whitespace() {
        // A lone comma is the comma key, otherwise commas separate specs
        if token == "," {
            sequences.push(parse_key_sequence(token)?);
            continue;
        }
        for part in token.split(',').filter(|p| !p.is_empty()) {
            sequences.push(parse_key_sequence(part)?);
        }
    }

    if sequences.is_empty() {
        return Err(KeymapError::EmptyBinding(value.to_string()));
    }

    Ok(sequences)
}

/// Format a sequence back into spec form
pub fn format_key_sequence(seq: &KeySequence) -> String {
    seq.to_string()
}

fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Escape,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Space,

        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,

        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "insert" => KeyCode::Insert,

        other => {
            let n: u8 = other.strip_prefix('f')?.parse().ok()?;
            if (1..=24).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
    };
    Some(code)
}

/// Errors that can occur when parsing chord specs and key tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    InvalidKey(String),
    EmptyBinding(String),
    UnknownAction(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::EmptyBinding(v) => write!(f, "Binding has no keys: '{}'", v),
            KeymapError::UnknownAction(a) => write!(f, "Unknown key option: {}", a),
        }
    }
}

impl std::error::Error for KeymapError {}
