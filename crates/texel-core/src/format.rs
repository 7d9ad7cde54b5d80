//! Pixel formats and their byte codecs.
//!
//! [`PixelFormat`] enumerates every encoding an [`Image`](crate::Image) can
//! carry. Uncompressed formats have a fixed byte stride and a [`PixelCodec`]
//! that decodes one pixel to [`Color`] and encodes it back. Block-compressed
//! formats are opaque: they have a buffer size but no codec, and every
//! pixel-level operation rejects them.
//!
//! # Byte layout
//!
//! | format | bytes | layout |
//! |---|---|---|
//! | `Grayscale` | 1 | `[y]` |
//! | `GrayAlpha` | 2 | `[y, a]` |
//! | `R5G6B5` | 2 | LE `u16`: r[15:11] g[10:5] b[4:0] |
//! | `R8G8B8` | 3 | `[r, g, b]` |
//! | `R5G5B5A1` | 2 | LE `u16`: r[15:11] g[10:6] b[5:1] a[0] |
//! | `R4G4B4A4` | 2 | LE `u16`: r[15:12] g[11:8] b[7:4] a[3:0] |
//! | `R8G8B8A8` | 4 | `[r, g, b, a]` |
//!
//! # Bit-depth rules
//!
//! Reducing an 8-bit value `v` to an n-bit field truncates
//! (`v * max / 255`); expanding takes the ceiling (`ceil(q * 255 / max)`).
//! Together they make `encode(decode(bytes)) == bytes` for every format.
//!
//! ```rust
//! use texel_core::{Color, PixelFormat};
//!
//! let codec = PixelFormat::R5G6B5.codec().unwrap();
//! let mut px = [0u8; 2];
//! (codec.encode)(Color::rgb(255, 128, 0), &mut px);
//! let back = (codec.decode)(&px);
//! assert_eq!((back.r, back.b), (255, 0));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::{Color, Error, Result};

/// Pixel encoding of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// 8-bit gray, no alpha.
    Grayscale,
    /// 8-bit gray + 8-bit alpha.
    GrayAlpha,
    /// 16-bit packed RGB, 5/6/5 bits.
    R5G6B5,
    /// 24-bit RGB.
    R8G8B8,
    /// 16-bit packed RGBA, 5/5/5/1 bits.
    R5G5B5A1,
    /// 16-bit packed RGBA, 4 bits per channel.
    R4G4B4A4,
    /// 32-bit RGBA.
    #[default]
    R8G8B8A8,
    /// DXT1 (BC1) RGB, 4 bpp.
    Dxt1Rgb,
    /// DXT1 (BC1) RGBA with 1-bit alpha, 4 bpp.
    Dxt1Rgba,
    /// DXT3 (BC2) RGBA, 8 bpp.
    Dxt3Rgba,
    /// DXT5 (BC3) RGBA, 8 bpp.
    Dxt5Rgba,
    /// ETC1 RGB, 4 bpp.
    Etc1Rgb,
    /// ETC2 RGB, 4 bpp.
    Etc2Rgb,
    /// ETC2 + EAC RGBA, 8 bpp.
    Etc2EacRgba,
    /// PVRTC RGB, 4 bpp.
    PvrtRgb,
    /// PVRTC RGBA, 4 bpp.
    PvrtRgba,
    /// ASTC 4x4 RGBA, 8 bpp.
    Astc4x4Rgba,
    /// ASTC 8x8 RGBA, 2 bpp.
    Astc8x8Rgba,
}

impl PixelFormat {
    /// All formats, uncompressed first.
    pub const ALL: [PixelFormat; 18] = [
        Self::Grayscale,
        Self::GrayAlpha,
        Self::R5G6B5,
        Self::R8G8B8,
        Self::R5G5B5A1,
        Self::R4G4B4A4,
        Self::R8G8B8A8,
        Self::Dxt1Rgb,
        Self::Dxt1Rgba,
        Self::Dxt3Rgba,
        Self::Dxt5Rgba,
        Self::Etc1Rgb,
        Self::Etc2Rgb,
        Self::Etc2EacRgba,
        Self::PvrtRgb,
        Self::PvrtRgba,
        Self::Astc4x4Rgba,
        Self::Astc8x8Rgba,
    ];

    /// Storage bits per pixel (fractional for block formats, averaged).
    pub const fn bits_per_pixel(&self) -> u32 {
        match self {
            Self::Grayscale => 8,
            Self::GrayAlpha | Self::R5G6B5 | Self::R5G5B5A1 | Self::R4G4B4A4 => 16,
            Self::R8G8B8 => 24,
            Self::R8G8B8A8 => 32,
            Self::Dxt1Rgb
            | Self::Dxt1Rgba
            | Self::Etc1Rgb
            | Self::Etc2Rgb
            | Self::PvrtRgb
            | Self::PvrtRgba => 4,
            Self::Dxt3Rgba | Self::Dxt5Rgba | Self::Etc2EacRgba | Self::Astc4x4Rgba => 8,
            Self::Astc8x8Rgba => 2,
        }
    }

    /// Whether pixel data is block-compressed (opaque to this crate).
    #[inline]
    pub const fn is_compressed(&self) -> bool {
        !matches!(
            self,
            Self::Grayscale
                | Self::GrayAlpha
                | Self::R5G6B5
                | Self::R8G8B8
                | Self::R5G5B5A1
                | Self::R4G4B4A4
                | Self::R8G8B8A8
        )
    }

    /// Bytes per pixel for uncompressed formats.
    #[inline]
    pub const fn bytes_per_pixel(&self) -> Option<usize> {
        if self.is_compressed() {
            None
        } else {
            Some(self.bits_per_pixel() as usize / 8)
        }
    }

    /// Whether the format stores an alpha channel.
    pub const fn has_alpha(&self) -> bool {
        !matches!(
            self,
            Self::Grayscale
                | Self::R5G6B5
                | Self::R8G8B8
                | Self::Dxt1Rgb
                | Self::Etc1Rgb
                | Self::Etc2Rgb
                | Self::PvrtRgb
        )
    }

    /// Whether the format stores a single gray channel.
    #[inline]
    pub const fn is_gray(&self) -> bool {
        matches!(self, Self::Grayscale | Self::GrayAlpha)
    }

    /// Bits stored per channel as `[r, g, b, a]`, for uncompressed formats.
    ///
    /// Gray formats report 8 bits for each color channel. A missing alpha
    /// channel reports 8 bits: it decodes as opaque and nothing is lost.
    pub const fn channel_bits(&self) -> Option<[u8; 4]> {
        match self {
            Self::Grayscale | Self::GrayAlpha | Self::R8G8B8 | Self::R8G8B8A8 => Some([8, 8, 8, 8]),
            Self::R5G6B5 => Some([5, 6, 5, 8]),
            Self::R5G5B5A1 => Some([5, 5, 5, 1]),
            Self::R4G4B4A4 => Some([4, 4, 4, 4]),
            _ => None,
        }
    }

    /// Buffer size in bytes for one level of `width x height` pixels.
    ///
    /// Block formats round up to a whole byte. Returns `None` on overflow.
    pub fn data_size(&self, width: u32, height: u32) -> Option<usize> {
        let bits = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(self.bits_per_pixel() as usize)?;
        Some(bits.div_ceil(8))
    }

    /// Resolves the codec for this format.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] for block-compressed formats.
    pub fn codec(self) -> Result<PixelCodec> {
        let (decode, encode): (fn(&[u8]) -> Color, fn(Color, &mut [u8])) = match self {
            Self::Grayscale => (decode_gray, encode_gray),
            Self::GrayAlpha => (decode_gray_alpha, encode_gray_alpha),
            Self::R5G6B5 => (decode_r5g6b5, encode_r5g6b5),
            Self::R8G8B8 => (decode_r8g8b8, encode_r8g8b8),
            Self::R5G5B5A1 => (decode_r5g5b5a1, encode_r5g5b5a1),
            Self::R4G4B4A4 => (decode_r4g4b4a4, encode_r4g4b4a4),
            Self::R8G8B8A8 => (decode_r8g8b8a8, encode_r8g8b8a8),
            _ => return Err(Error::unsupported_format("codec", self)),
        };
        Ok(PixelCodec {
            format: self,
            bytes_per_pixel: self.bits_per_pixel() as usize / 8,
            decode,
            encode,
        })
    }

    /// Short lowercase name, also accepted by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Grayscale => "gray",
            Self::GrayAlpha => "gray-alpha",
            Self::R5G6B5 => "r5g6b5",
            Self::R8G8B8 => "rgb8",
            Self::R5G5B5A1 => "r5g5b5a1",
            Self::R4G4B4A4 => "r4g4b4a4",
            Self::R8G8B8A8 => "rgba8",
            Self::Dxt1Rgb => "dxt1-rgb",
            Self::Dxt1Rgba => "dxt1-rgba",
            Self::Dxt3Rgba => "dxt3-rgba",
            Self::Dxt5Rgba => "dxt5-rgba",
            Self::Etc1Rgb => "etc1-rgb",
            Self::Etc2Rgb => "etc2-rgb",
            Self::Etc2EacRgba => "etc2-eac-rgba",
            Self::PvrtRgb => "pvrt-rgb",
            Self::PvrtRgba => "pvrt-rgba",
            Self::Astc4x4Rgba => "astc-4x4-rgba",
            Self::Astc8x8Rgba => "astc-8x8-rgba",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        let alias = match key.as_str() {
            "grayscale" | "grey" | "l8" => Some(Self::Grayscale),
            "gray-alpha" | "grayalpha" | "la8" => Some(Self::GrayAlpha),
            "rgb" | "r8g8b8" | "rgb888" => Some(Self::R8G8B8),
            "rgba" | "r8g8b8a8" | "rgba8888" => Some(Self::R8G8B8A8),
            "rgb565" => Some(Self::R5G6B5),
            "rgba5551" => Some(Self::R5G5B5A1),
            "rgba4444" => Some(Self::R4G4B4A4),
            _ => None,
        };
        alias
            .or_else(|| Self::ALL.iter().copied().find(|f| f.name() == key))
            .ok_or_else(|| {
                Error::invalid_parameter("format", format!("unknown pixel format `{s}`"))
            })
    }
}

/// Decode/encode table entry for one uncompressed format.
///
/// Resolve it once per operation with [`PixelFormat::codec`] and call the
/// function pointers per pixel; slices passed in must be exactly
/// `bytes_per_pixel` long.
#[derive(Debug, Clone, Copy)]
pub struct PixelCodec {
    /// Format this codec reads and writes.
    pub format: PixelFormat,
    /// Stride of one pixel in bytes.
    pub bytes_per_pixel: usize,
    /// Decodes one pixel.
    pub decode: fn(&[u8]) -> Color,
    /// Encodes one pixel in place.
    pub encode: fn(Color, &mut [u8]),
}

impl PixelCodec {
    /// Decodes a whole buffer into colors.
    pub fn decode_all(&self, data: &[u8]) -> Vec<Color> {
        data.chunks_exact(self.bytes_per_pixel).map(self.decode).collect()
    }

    /// Encodes colors into a fresh buffer.
    pub fn encode_all(&self, colors: &[Color]) -> Vec<u8> {
        let mut out = vec![0u8; colors.len() * self.bytes_per_pixel];
        for (px, &c) in out.chunks_exact_mut(self.bytes_per_pixel).zip(colors) {
            (self.encode)(c, px);
        }
        out
    }
}

/// Reduces an 8-bit value to `bits` bits, truncating toward zero.
#[inline]
pub const fn reduce_channel(v: u8, bits: u8) -> u16 {
    let max = (1u32 << bits) - 1;
    (v as u32 * max / 255) as u16
}

/// Expands a `bits`-bit value to 8 bits, rounding up.
#[inline]
pub const fn expand_channel(q: u16, bits: u8) -> u8 {
    let max = (1u32 << bits) - 1;
    ((q as u32 * 255).div_ceil(max)) as u8
}

#[inline]
fn read_u16(px: &[u8]) -> u16 {
    u16::from_le_bytes([px[0], px[1]])
}

#[inline]
fn write_u16(v: u16, px: &mut [u8]) {
    px[..2].copy_from_slice(&v.to_le_bytes());
}

fn decode_gray(px: &[u8]) -> Color {
    Color::gray(px[0])
}

fn encode_gray(c: Color, px: &mut [u8]) {
    px[0] = c.luminance();
}

fn decode_gray_alpha(px: &[u8]) -> Color {
    Color::gray(px[0]).with_alpha(px[1])
}

fn encode_gray_alpha(c: Color, px: &mut [u8]) {
    px[0] = c.luminance();
    px[1] = c.a;
}

fn decode_r5g6b5(px: &[u8]) -> Color {
    let v = read_u16(px);
    Color::rgb(
        expand_channel((v >> 11) & 0x1f, 5),
        expand_channel((v >> 5) & 0x3f, 6),
        expand_channel(v & 0x1f, 5),
    )
}

fn encode_r5g6b5(c: Color, px: &mut [u8]) {
    let v = (reduce_channel(c.r, 5) << 11) | (reduce_channel(c.g, 6) << 5) | reduce_channel(c.b, 5);
    write_u16(v, px);
}

fn decode_r8g8b8(px: &[u8]) -> Color {
    Color::rgb(px[0], px[1], px[2])
}

fn encode_r8g8b8(c: Color, px: &mut [u8]) {
    px[..3].copy_from_slice(&[c.r, c.g, c.b]);
}

fn decode_r5g5b5a1(px: &[u8]) -> Color {
    let v = read_u16(px);
    Color::new(
        expand_channel((v >> 11) & 0x1f, 5),
        expand_channel((v >> 6) & 0x1f, 5),
        expand_channel((v >> 1) & 0x1f, 5),
        expand_channel(v & 0x1, 1),
    )
}

fn encode_r5g5b5a1(c: Color, px: &mut [u8]) {
    let v = (reduce_channel(c.r, 5) << 11)
        | (reduce_channel(c.g, 5) << 6)
        | (reduce_channel(c.b, 5) << 1)
        | reduce_channel(c.a, 1);
    write_u16(v, px);
}

fn decode_r4g4b4a4(px: &[u8]) -> Color {
    let v = read_u16(px);
    Color::new(
        expand_channel((v >> 12) & 0xf, 4),
        expand_channel((v >> 8) & 0xf, 4),
        expand_channel((v >> 4) & 0xf, 4),
        expand_channel(v & 0xf, 4),
    )
}

fn encode_r4g4b4a4(c: Color, px: &mut [u8]) {
    let v = (reduce_channel(c.r, 4) << 12)
        | (reduce_channel(c.g, 4) << 8)
        | (reduce_channel(c.b, 4) << 4)
        | reduce_channel(c.a, 4);
    write_u16(v, px);
}

fn decode_r8g8b8a8(px: &[u8]) -> Color {
    Color::new(px[0], px[1], px[2], px[3])
}

fn encode_r8g8b8a8(c: Color, px: &mut [u8]) {
    px[..4].copy_from_slice(&c.to_array());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::Grayscale.bytes_per_pixel(), Some(1));
        assert_eq!(PixelFormat::GrayAlpha.bytes_per_pixel(), Some(2));
        assert_eq!(PixelFormat::R5G6B5.bytes_per_pixel(), Some(2));
        assert_eq!(PixelFormat::R8G8B8.bytes_per_pixel(), Some(3));
        assert_eq!(PixelFormat::R8G8B8A8.bytes_per_pixel(), Some(4));
        assert_eq!(PixelFormat::Dxt5Rgba.bytes_per_pixel(), None);
    }

    #[test]
    fn test_data_size() {
        assert_eq!(PixelFormat::R8G8B8A8.data_size(4, 4), Some(64));
        assert_eq!(PixelFormat::Dxt1Rgb.data_size(4, 4), Some(8));
        assert_eq!(PixelFormat::Astc8x8Rgba.data_size(8, 8), Some(16));
        assert_eq!(PixelFormat::Dxt1Rgb.data_size(1, 1), Some(1));
        assert_eq!(PixelFormat::R8G8B8A8.data_size(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_compressed_has_no_codec() {
        for f in PixelFormat::ALL {
            assert_eq!(f.codec().is_ok(), !f.is_compressed(), "{f}");
        }
    }

    #[test]
    fn test_channel_expand_reduce() {
        for bits in 1..=8u8 {
            let max = (1u16 << bits) - 1;
            for q in 0..=max {
                assert_eq!(reduce_channel(expand_channel(q, bits), bits), q, "bits={bits} q={q}");
            }
            assert_eq!(expand_channel(max, bits), 255);
            assert_eq!(reduce_channel(255, bits), max);
        }
    }

    #[test]
    fn test_encode_decode_is_identity_on_bytes() {
        for f in PixelFormat::ALL.into_iter().filter(|f| !f.is_compressed()) {
            let codec = f.codec().unwrap();
            let bpp = codec.bytes_per_pixel;
            // every 16-bit pattern for packed formats, a sample otherwise
            let patterns: Vec<Vec<u8>> = match bpp {
                1 => (0..=255u8).map(|v| vec![v]).collect(),
                2 => (0..=u16::MAX).map(|v| v.to_le_bytes().to_vec()).collect(),
                _ => (0..=255u8)
                    .map(|v| vec![v, v.wrapping_mul(7), v ^ 0x5a, 255 - v][..bpp].to_vec())
                    .collect(),
            };
            for px in patterns {
                let mut out = vec![0u8; bpp];
                (codec.encode)((codec.decode)(&px), &mut out);
                assert_eq!(out, px, "{f}");
            }
        }
    }

    #[test]
    fn test_gray_decode_encode() {
        let codec = PixelFormat::Grayscale.codec().unwrap();
        assert_eq!((codec.decode)(&[77]), Color::gray(77));
        let mut px = [0u8];
        (codec.encode)(Color::new(255, 0, 0, 10), &mut px);
        assert_eq!(px[0], 76);
    }

    #[test]
    fn test_r5g6b5_layout() {
        let codec = PixelFormat::R5G6B5.codec().unwrap();
        let mut px = [0u8; 2];
        (codec.encode)(Color::RED, &mut px);
        assert_eq!(u16::from_le_bytes(px), 0xf800);
        (codec.encode)(Color::GREEN, &mut px);
        assert_eq!(u16::from_le_bytes(px), 0x07e0);
        (codec.encode)(Color::BLUE, &mut px);
        assert_eq!(u16::from_le_bytes(px), 0x001f);
    }

    #[test]
    fn test_r5g5b5a1_alpha_truncates() {
        let codec = PixelFormat::R5G5B5A1.codec().unwrap();
        let mut px = [0u8; 2];
        (codec.encode)(Color::new(0, 0, 0, 254), &mut px);
        assert_eq!((codec.decode)(&px).a, 0);
        (codec.encode)(Color::new(0, 0, 0, 255), &mut px);
        assert_eq!((codec.decode)(&px).a, 255);
    }

    #[test]
    fn test_parse_names() {
        for f in PixelFormat::ALL {
            assert_eq!(f.name().parse::<PixelFormat>().unwrap(), f);
        }
        assert_eq!("RGBA".parse::<PixelFormat>().unwrap(), PixelFormat::R8G8B8A8);
        assert_eq!("rgb565".parse::<PixelFormat>().unwrap(), PixelFormat::R5G6B5);
        assert!("bc7".parse::<PixelFormat>().is_err());
    }
}
