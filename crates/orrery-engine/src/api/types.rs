use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Linear RGB color, channels in [0, 1].
/// Serialized as a `"#RRGGBB"` string so catalogs stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f32 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f32 / 255.0,
            b: (rgb & 0xFF) as f32 / 255.0,
        }
    }

    /// Parse `"#RRGGBB"` (leading `#` optional).
    pub fn parse(s: &str) -> Result<Self, SceneError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(SceneError::config(format!("bad color {s:?}: expected #RRGGBB")));
        }
        // from_str_radix alone would take a leading sign
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SceneError::config(format!("bad color {s:?}: not hex")));
        }
        let rgb = u32::from_str_radix(digits, 16)
            .map_err(|_| SceneError::config(format!("bad color {s:?}: not hex")))?;
        Ok(Self::hex(rgb))
    }

    pub fn to_hex_string(self) -> String {
        let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", ch(self.r), ch(self.g), ch(self.b))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl TryFrom<String> for Color {
    type Error = SceneError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex_string()
    }
}

/// Identifies one mounted scene instance on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneSlot(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_matches_parsed_string() {
        assert_eq!(Color::hex(0x6B93D6), Color::parse("#6B93D6").unwrap());
        assert_eq!(Color::parse("ffffff").unwrap(), Color::WHITE);
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(Color::parse("#FFF").is_err());
        assert!(Color::parse("#GGGGGG").is_err());
        assert!(Color::parse("+12345").is_err());
        assert!(Color::parse("#+ABCDE").is_err());
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::hex(0xCD5C5C)).unwrap();
        assert_eq!(json, "\"#CD5C5C\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::hex(0xCD5C5C));
    }
}
