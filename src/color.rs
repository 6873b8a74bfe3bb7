//! Hex colour parsing and brightness adjustment
//!
//! Card accents and menu themes both derive lighter and darker shades from a
//! single user-chosen colour. Both go through [`adjust_brightness`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("colour must start with '#': {0}")]
    MissingHash(String),
    #[error("colour must have 3 or 6 hex digits: {0}")]
    InvalidLength(String),
    #[error("invalid hex digit in colour: {0}")]
    InvalidDigit(String),
}

/// An opaque sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Shift every channel by `percent` of the full range.
    ///
    /// Positive values lighten, negative values darken. Channels clamp at
    /// 0 and 255.
    pub fn adjust(self, percent: f64) -> Self {
        let amount = (2.55 * percent).round() as i32;
        let shift = |c: u8| (i32::from(c) + amount).clamp(0, 255) as u8;
        Self {
            r: shift(self.r),
            g: shift(self.g),
            b: shift(self.b),
        }
    }

    /// Relative luminance in 0.0..=1.0 (ITU-R BT.601 weights)
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b))
            / 255.0
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(trimmed.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(trimmed.to_string()));
        }
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(ColorError::InvalidLength(trimmed.to_string())),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidDigit(trimmed.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Lighten (positive `percent`) or darken (negative) a hex colour.
///
/// Input that is not a `#rgb`/`#rrggbb` colour is returned unchanged so a
/// bad theme value never breaks rendering.
pub fn adjust_brightness(hex: &str, percent: f64) -> String {
    match hex.parse::<HexColor>() {
        Ok(color) => color.adjust(percent).to_string(),
        Err(_) => hex.to_string(),
    }
}
