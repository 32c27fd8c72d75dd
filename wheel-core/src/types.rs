use crate::error::ParseColorError;
use serde::Deserialize;

/// Identifier for a marker carried by a [`crate::wheel::Wheel`].
///
/// Ids are handed out in placement order and never reused by the same
/// wheel, so a [`crate::trace::PathTrace`] keeps following its marker even
/// after other markers are removed and positions in the arena shift.
pub type MarkerId = u64;

/// Plain RGB color attached to wheels and markers.
///
/// The core never draws anything; colors are carried through so a
/// rendering adapter can style circles, dots and connector lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0x58, 0xC4, 0xDD);
    pub const RED: Color = Color::rgb(0xFC, 0x62, 0x55);
    pub const GREEN: Color = Color::rgb(0x83, 0xC1, 0x67);
    pub const YELLOW: Color = Color::rgb(0xF7, 0xD9, 0x6F);
    pub const PURPLE: Color = Color::rgb(0x9A, 0x72, 0xAC);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise mean of two colors, used for blended connector lines.
    pub fn average(self, other: Color) -> Color {
        let mid = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
        Color::rgb(mid(self.r, other.r), mid(self.g, other.g), mid(self.b, other.b))
    }

    /// Parses `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_channel_wise_mean() {
        let a = Color::rgb(0, 100, 255);
        let b = Color::rgb(255, 200, 255);
        assert_eq!(a.average(b), Color::rgb(127, 150, 255));
    }

    #[test]
    fn from_hex_accepts_with_and_without_hash() {
        assert_eq!(Color::from_hex("#58C4DD").unwrap(), Color::BLUE);
        assert_eq!(Color::from_hex("fc6255").unwrap(), Color::RED);
    }

    #[test]
    fn from_hex_rejects_malformed_input() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("").is_err());
    }
}
