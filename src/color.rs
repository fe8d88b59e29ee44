//! RGBA colours for overlay drawing

use serde::{Deserialize, Serialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|part| {
                    u8::from_str_radix(part, 16)
                        .map_err(|e| format!("Invalid color {}: {}", s, e))
                })
        };
        match hex.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#RRGGBB", or "#RRGGBBAA" when not opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_rgb() {
        assert_eq!(Color::from_hex("#ff4500"), Ok(Color::rgb(0xff, 0x45, 0x00)));
        assert_eq!(Color::from_hex("00FF00"), Ok(Color::rgb(0, 255, 0)));
    }

    #[test]
    fn test_from_hex_rgba() {
        assert_eq!(
            Color::from_hex("#1c191280"),
            Ok(Color::rgba(0x1c, 0x19, 0x12, 0x80))
        );
    }

    #[test]
    fn test_from_hex_malformed() {
        assert!(Color::from_hex("#ff45").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#ff45é0").is_err());
    }

    #[test]
    fn test_hex_round_trip() {
        let color = Color::rgba(1, 2, 3, 4);
        assert_eq!(Color::from_hex(&color.to_hex()), Ok(color));
        assert_eq!(Color::rgb(255, 0, 16).to_hex(), "#ff0010");
    }
}
