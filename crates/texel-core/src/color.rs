//! 8-bit RGBA color value.
//!
//! [`Color`] is the unit every codec decodes to and encodes from. It is a
//! plain `Copy` value: no color space tagging, no premultiplication.
//!
//! # Luminance
//!
//! Gray conversions use fixed integer weights (0.299 / 0.587 / 0.114):
//!
//! ```rust
//! use texel_core::Color;
//!
//! assert_eq!(Color::WHITE.luminance(), 255);
//! assert_eq!(Color::rgb(255, 0, 0).luminance(), 76);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Red weight of the luminance sum, in thousandths.
pub const LUMA_R: u32 = 299;
/// Green weight of the luminance sum, in thousandths.
pub const LUMA_G: u32 = 587;
/// Blue weight of the luminance sum, in thousandths.
pub const LUMA_B: u32 = 114;

/// Integer luminance of an RGB triple, truncated toward zero.
///
/// Weights sum to exactly 1000, so equal channels map to themselves.
#[inline]
pub const fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B) / 1000) as u8
}

/// Four 8-bit channels: red, green, blue, alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const BLANK: Color = Color::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Color = Color::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Color = Color::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Color = Color::new(0, 0, 255, 255);

    /// Creates a color from four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Creates an opaque gray.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v, 255)
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds a color from `[r, g, b, a]`.
    #[inline]
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Integer luminance of the RGB channels.
    #[inline]
    pub const fn luminance(self) -> u8 {
        luminance(self.r, self.g, self.b)
    }

    /// Linear interpolation per channel, `t` clamped to `[0, 1]`, rounded.
    ///
    /// ```rust
    /// use texel_core::Color;
    ///
    /// let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
    /// assert_eq!(mid, Color::new(128, 128, 128, 255));
    /// ```
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f32 + (b as f32 - a as f32) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Self::from_array(c)
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Parses `#RRGGBB`, `#RRGGBBAA`, or `r,g,b[,a]`.
///
/// ```rust
/// use texel_core::Color;
///
/// assert_eq!("#ff000080".parse::<Color>().unwrap(), Color::new(255, 0, 0, 128));
/// assert_eq!("0,128,255".parse::<Color>().unwrap(), Color::rgb(0, 128, 255));
/// ```
impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || Error::invalid_parameter("color", format!("cannot parse `{s}`"));

        if let Some(hex) = s.strip_prefix('#') {
            if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
                return Err(bad());
            }
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
            let a = if hex.len() == 8 { byte(6)? } else { 255 };
            return Ok(Color::new(byte(0)?, byte(2)?, byte(4)?, a));
        }

        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u8>().map_err(|_| bad()))
            .collect::<Result<Vec<_>, _>>()?;
        match parts.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Color::new(*r, *g, *b, *a)),
            _ => Err(bad()),
        }
    }
}
