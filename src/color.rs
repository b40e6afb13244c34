//! RGB colors as the API transmits them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 24-bit RGB color.
///
/// The API is inconsistent about encoding: accent colors arrive as plain
/// integers, banner colors as `#rrggbb` hex strings. Both collapse into
/// this one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Parse `#rrggbb` or `rrggbb`. Malformed input yields `None`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self)
    }

    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(self) -> u8 {
        self.0 as u8
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0 & 0x00FF_FFFF)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Color::from_hex("#1abc9c"), Some(Color(0x1abc9c)));
        assert_eq!(Color::from_hex("1ABC9C"), Some(Color(0x1abc9c)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::from_hex("#1abc9c00"), None);
    }

    #[test]
    fn splits_channels() {
        let c = Color(0x1a_bc_9c);
        assert_eq!((c.r(), c.g(), c.b()), (0x1a, 0xbc, 0x9c));
    }

    #[test]
    fn round_trips_through_hex() {
        let c = Color(0x7c6af7);
        assert_eq!(Color::from_hex(&c.to_hex()), Some(c));
        assert_eq!(c.to_string(), "#7c6af7");
    }
}
