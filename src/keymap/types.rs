//! Core types for the key-sequence matcher: Modifiers, KeyCode, InputEvent, KeySequence

use std::fmt;

/// Modifier keys as a bitfield for cheap storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b0001;
        }
        if shift {
            bits |= 0b0010;
        }
        if alt {
            bits |= 0b0100;
        }
        if meta {
            bits |= 0b1000;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b0001 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b0010 != 0
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b0100 != 0
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & 0b1000 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Same set with `other` removed
    #[inline]
    pub const fn without(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 & !other.0)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    /// Chord-spec prefix form, e.g. `A-M-`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt() {
            write!(f, "A-")?;
        }
        if self.meta() {
            write!(f, "M-")?;
        }
        if self.shift() {
            write!(f, "S-")?;
        }
        if self.ctrl() {
            write!(f, "C-")?;
        }
        Ok(())
    }
}

/// A platform-neutral key code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character key (letters normalized to lowercase)
    Char(char),

    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    Up,
    Down,
    Left,
    Right,

    Home,
    End,
    PageUp,
    PageDown,
    Insert,

    /// F1-F24
    F(u8),
}

impl KeyCode {
    /// Digit value for `0`-`9` character keys
    pub fn digit(self) -> Option<u32> {
        match self {
            KeyCode::Char(c) => c.to_digit(10),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    /// Chord-spec base form, accepted back by the parser
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => write!(f, "enter"),
            KeyCode::Escape => write!(f, "esc"),
            KeyCode::Tab => write!(f, "tab"),
            KeyCode::Backspace => write!(f, "backspace"),
            KeyCode::Delete => write!(f, "delete"),
            KeyCode::Space => write!(f, "space"),
            KeyCode::Up => write!(f, "up"),
            KeyCode::Down => write!(f, "down"),
            KeyCode::Left => write!(f, "left"),
            KeyCode::Right => write!(f, "right"),
            KeyCode::Home => write!(f, "home"),
            KeyCode::End => write!(f, "end"),
            KeyCode::PageUp => write!(f, "pageup"),
            KeyCode::PageDown => write!(f, "pagedown"),
            KeyCode::Insert => write!(f, "insert"),
            KeyCode::F(n) => write!(f, "f{}", n),
        }
    }
}

/// One device transition as delivered by the platform.
///
/// Letters arrive lowercase with Shift in `mods`. For other printable keys the
/// platform folds Shift into the produced symbol (`$`, not `S-4`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub code: KeyCode,
    pub mods: Modifiers,
    pub pressed: bool,
}

impl InputEvent {
    pub const fn press(code: KeyCode, mods: Modifiers) -> Self {
        Self {
            code,
            mods,
            pressed: true,
        }
    }

    pub const fn release(code: KeyCode, mods: Modifiers) -> Self {
        Self {
            code,
            mods,
            pressed: false,
        }
    }

    /// Press event for the chord a sequence describes
    pub const fn from_sequence(seq: KeySequence, pressed: bool) -> Self {
        Self {
            code: seq.code,
            mods: seq.mods,
            pressed,
        }
    }

    /// The character this event types into a hint prefix, if any.
    ///
    /// Control, alt and meta chords never type; Shift uppercases letters.
    pub fn typed_char(&self) -> Option<char> {
        if self.mods.ctrl() || self.mods.alt() || self.mods.meta() {
            return None;
        }
        match self.code {
            KeyCode::Char(c) if self.mods.shift() => Some(c.to_ascii_uppercase()),
            KeyCode::Char(c) => Some(c),
            _ => None,
        }
    }
}

/// A chord: a base key plus the exact modifier set it requires
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeySequence {
    pub mods: Modifiers,
    pub code: KeyCode,
}

impl KeySequence {
    pub const fn new(mods: Modifiers, code: KeyCode) -> Self {
        Self { mods, code }
    }

    /// Chord with no modifiers
    pub const fn key(code: KeyCode) -> Self {
        Self {
            mods: Modifiers::NONE,
            code,
        }
    }

    /// Compare against a live event; non-strict ignores modifiers entirely
    pub fn matches(&self, event: &InputEvent, strict: bool) -> bool {
        self.code == event.code && (!strict || self.mods == event.mods)
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shift plus a bare letter is written as the uppercase letter
        if let KeyCode::Char(c) = self.code {
            if self.mods == Modifiers::SHIFT && c.is_ascii_lowercase() {
                return write!(f, "{}", c.to_ascii_uppercase());
            }
        }
        write!(f, "{}{}", self.mods, self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_empty() {
        let mods = Modifiers::NONE;
        assert!(mods.is_empty());
        assert!(!mods.ctrl());
        assert!(!mods.shift());
        assert!(!mods.alt());
        assert!(!mods.meta());
    }

    #[test]
    fn test_modifiers_combined() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.ctrl());
        assert!(mods.shift());
        assert!(!mods.alt());
        assert!(mods.contains(Modifiers::SHIFT));
        assert_eq!(mods.without(Modifiers::SHIFT), Modifiers::CTRL);
    }

    #[test]
    fn test_modifiers_display_order() {
        let mods = Modifiers::CTRL | Modifiers::ALT | Modifiers::META;
        assert_eq!(mods.to_string(), "A-M-C-");
    }

    #[test]
    fn test_sequence_display_uppercase_letter() {
        let seq = KeySequence::new(Modifiers::SHIFT, KeyCode::Char('h'));
        assert_eq!(seq.to_string(), "H");

        let seq = KeySequence::new(Modifiers::SHIFT | Modifiers::ALT, KeyCode::Char('h'));
        assert_eq!(seq.to_string(), "A-S-h");
    }

    #[test]
    fn test_strict_and_non_strict_match() {
        let seq = KeySequence::key(KeyCode::Char('5'));
        let noisy = InputEvent::press(KeyCode::Char('5'), Modifiers::SHIFT);

        assert!(!seq.matches(&noisy, true));
        assert!(seq.matches(&noisy, false));
    }

    #[test]
    fn test_typed_char() {
        let ev = InputEvent::press(KeyCode::Char('a'), Modifiers::SHIFT);
        assert_eq!(ev.typed_char(), Some('A'));

        let ev = InputEvent::press(KeyCode::Char('a'), Modifiers::CTRL);
        assert_eq!(ev.typed_char(), None);

        let ev = InputEvent::press(KeyCode::Escape, Modifiers::NONE);
        assert_eq!(ev.typed_char(), None);
    }
}
