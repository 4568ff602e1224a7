//! Hex colors for dots and canvas backgrounds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Color must start with '#': {0}")]
    MissingHash(String),
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

/// An opaque RGB color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor::new(0x00, 0x00, 0x00);
    pub const WHITE: HexColor = HexColor::new(0xFF, 0xFF, 0xFF);
    /// Color of the grid overlay.
    pub const GRID_LINE: HexColor = HexColor::new(0xE0, 0xE0, 0xE0);
    /// Initial pencil color of a new session.
    pub const DEFAULT_SELECTED: HexColor = HexColor::new(0xFF, 0x00, 0x4D);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical `#RRGGBB` form.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 3]> for HexColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    /// Parses `#rgb` or `#rrggbb`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_string()))?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(s.to_string()));
        }

        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidHex(s.to_string()))
        };

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(ColorError::InvalidHex(s.to_string())),
        }
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Fixed drawing palette, old school game style.
pub const PALETTE: [HexColor; 16] = [
    HexColor::new(0x00, 0x00, 0x00),
    HexColor::new(0xFF, 0xFF, 0xFF),
    HexColor::new(0xFF, 0x00, 0x4D),
    HexColor::new(0x00, 0xE4, 0x36),
    HexColor::new(0x29, 0xAD, 0xFF),
    HexColor::new(0xFF, 0x77, 0xA8),
    HexColor::new(0xFF, 0xCC, 0xAA),
    HexColor::new(0xFF, 0xA3, 0x00),
    HexColor::new(0x8F, 0x97, 0x4A),
    HexColor::new(0x7E, 0x25, 0x53),
    HexColor::new(0x83, 0x76, 0x9C),
    HexColor::new(0x5F, 0x57, 0x4F),
    HexColor::new(0xC2, 0xC3, 0xC7),
    HexColor::new(0xFF, 0xF1, 0xE8),
    HexColor::new(0xFF, 0xEC, 0x27),
    HexColor::new(0x00, 0xB5, 0x43),
];
