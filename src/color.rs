//! Hex color parsing and linear mixing.
//!
//! Every color that reaches the palette or the slide XML is a [`HexColor`]:
//! three bytes that always print as six uppercase hex digits with no leading
//! `#`. Parsing happens once at the edge, so mixing is total.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A color string that is not six hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("malformed hex color '{0}': expected 6 hex digits, optional leading '#'")]
    Malformed(String),
}

/// Red/green/blue channels, 0–255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A normalised 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(Rgb);

impl HexColor {
    pub const WHITE: HexColor = HexColor::from_rgb(255, 255, 255);
    pub const BLACK: HexColor = HexColor::from_rgb(0, 0, 0);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        HexColor(Rgb { r, g, b })
    }

    pub fn rgb(self) -> Rgb {
        self.0
    }

    /// Linear interpolation toward `other`: `t = 0` is `self`, `t = 1` is
    /// `other`. Channels round half away from zero and clamp to 0–255.
    pub fn mix(self, other: HexColor, t: f64) -> HexColor {
        let lerp = |a: u8, b: u8| -> u8 {
            let a = f64::from(a);
            let v = a + (f64::from(b) - a) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        let (a, b) = (self.0, other.0);
        HexColor::from_rgb(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.0.r, self.0.g, self.0.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s).map(HexColor)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse `RRGGBB` or `#RRGGBB` (any case) into channels.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::Malformed(hex.to_string()));
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(Rgb { r, g, b }),
        _ => Err(ColorError::Malformed(hex.to_string())),
    }
}

/// String-level [`HexColor::mix`]: parse both inputs and return the mixed
/// color as six uppercase hex digits.
pub fn mix(hex_a: &str, hex_b: &str, t: f64) -> Result<String, ColorError> {
    let a: HexColor = hex_a.parse()?;
    let b: HexColor = hex_b.parse()?;
    Ok(a.mix(b, t).to_string())
}
