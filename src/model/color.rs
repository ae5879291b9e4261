//! Ruler colour value.
//!
//! Colours travel over the command channel as CSS hex strings. They are
//! validated once on entry and normalised to lowercase `#rrggbb`, so every
//! derived style string (gradient stops, border, glow) is built from a
//! known-good base.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::constants::DEFAULT_RULER_COLOR;
use crate::clamp;
use crate::error::RulerError;

/// A validated `#rrggbb` colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RulerColor(String);

impl RulerColor {
    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb` (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, RulerError> {
        let t = s.trim();
        let hex = t.strip_prefix('#').unwrap_or(t);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RulerError::InvalidColor(s.to_string()));
        }
        let hex = hex.to_ascii_lowercase();
        let full = match hex.len() {
            6 => hex,
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(RulerError::InvalidColor(s.to_string())),
        };
        Ok(Self(format!("#{full}")))
    }

    /// The normalised `#rrggbb` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// This colour with a two-digit alpha suffix, e.g. `#ffeb3b80`.
    pub fn with_alpha_hex(&self, alpha: &str) -> String {
        format!("{}{}", self.0, alpha)
    }

    /// This colour with the alpha derived from an opacity in [0, 1].
    pub fn with_opacity(&self, opacity: f64) -> String {
        self.with_alpha_hex(&alpha_hex(opacity))
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

impl Default for RulerColor {
    fn default() -> Self {
        Self(DEFAULT_RULER_COLOR.to_string())
    }
}

impl fmt::Display for RulerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RulerColor {
    type Err = RulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RulerColor {
    type Error = RulerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RulerColor> for String {
    fn from(value: RulerColor) -> Self {
        value.0
    }
}

/// Convert an opacity in [0, 1] to a lowercase two-digit hex alpha.
pub fn alpha_hex(opacity: f64) -> String {
    let a = (clamp(opacity, 0.0, 1.0) * 255.0).round() as u8;
    format!("{:02x}", a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalises_case_and_prefix() {
        assert_eq!(RulerColor::parse("FFEB3B").unwrap().as_str(), "#ffeb3b");
        assert_eq!(RulerColor::parse("  #A1B2C3 ").unwrap().as_str(), "#a1b2c3");
    }

    #[test]
    fn test_parse_expands_short_form() {
        assert_eq!(RulerColor::parse("#0fA").unwrap().as_str(), "#00ffaa");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RulerColor::parse("").is_err());
        assert!(RulerColor::parse("#ffeb3").is_err());
        assert!(RulerColor::parse("#ffeb3b80").is_err());
        assert!(RulerColor::parse("#gggggg").is_err());
        assert!(RulerColor::parse("yellow").is_err());
    }

    #[test]
    fn test_alpha_hex() {
        assert_eq!(alpha_hex(0.0), "00");
        assert_eq!(alpha_hex(0.5), "80");
        assert_eq!(alpha_hex(1.0), "ff");
        assert_eq!(alpha_hex(7.0), "ff");
    }

    #[test]
    fn test_with_alpha_variants() {
        let c = RulerColor::default();
        assert_eq!(c.with_alpha_hex("40"), "#ffeb3b40");
        assert_eq!(c.with_opacity(0.5), "#ffeb3b80");
    }

    #[test]
    fn test_rgb_channels() {
        assert_eq!(RulerColor::default().rgb(), (0xff, 0xeb, 0x3b));
    }

    #[test]
    fn test_serde_validates() {
        let c: RulerColor = serde_json::from_str("\"#ABC\"").unwrap();
        assert_eq!(c.as_str(), "#aabbcc");
        assert!(serde_json::from_str::<RulerColor>("\"nope\"").is_err());
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#aabbcc\"");
    }
}
