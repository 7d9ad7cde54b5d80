//! Pixel format conversion and Floyd-Steinberg dithering.
//!
//! [`convert`] decodes every pixel with the source codec and re-encodes it
//! with the target codec. Channel expansion and truncation follow the codec
//! rules in `texel_core::format`: gray is replicated into R/G/B, missing
//! alpha becomes 255, dropped channels are discarded, and narrower bit
//! fields truncate toward zero.
//!
//! [`dither`] keeps the format but snaps every channel to a level that an
//! n-bit field can hold, diffusing the quantization error to unvisited
//! neighbours. A later [`convert`] to a format with those depths is then
//! lossless; [`dither_to`] does both steps.
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, Image, PixelFormat};
//! use texel_ops::convert::{convert, dither_to};
//!
//! let mut img = Image::filled(8, 8, Color::rgb(200, 100, 50))?;
//! convert(&mut img, PixelFormat::R8G8B8)?;
//! assert_eq!(img.data().len(), 8 * 8 * 3);
//!
//! dither_to(&mut img, PixelFormat::R5G6B5)?;
//! assert_eq!(img.format(), PixelFormat::R5G6B5);
//! # Ok::<(), texel_core::Error>(())
//! ```

use texel_core::{expand_channel, Color, Error, Image, PixelFormat, Result};
use tracing::debug;

use crate::parallel::for_each_row;

/// Rewrites `image` into `target` format.
///
/// Converting to the current format leaves the image unchanged.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] if either format is block-compressed.
pub fn convert(image: &mut Image, target: PixelFormat) -> Result<()> {
    let src = image.codec_for("convert")?;
    let dst = target
        .codec()
        .map_err(|_| Error::unsupported_format("convert", target))?;
    if image.format() == target {
        return Ok(());
    }

    let (width, height) = image.dimensions();
    debug!(width, height, from = %image.format(), to = %target, "convert");

    let w = width as usize;
    let src_stride = w * src.bytes_per_pixel;
    let mut out = vec![0u8; w * height as usize * dst.bytes_per_pixel];
    let data = image.data();
    for_each_row(&mut out, w * dst.bytes_per_pixel, |y, row| {
        let src_row = &data[y * src_stride..(y + 1) * src_stride];
        for (s, d) in src_row
            .chunks_exact(src.bytes_per_pixel)
            .zip(row.chunks_exact_mut(dst.bytes_per_pixel))
        {
            (dst.encode)((src.decode)(s), d);
        }
    });

    image.replace(width, height, target, out)
}

/// Validates a per-channel bit count.
fn check_bits(name: &'static str, bits: u8) -> Result<()> {
    if (1..=8).contains(&bits) {
        Ok(())
    } else {
        Err(Error::invalid_parameter(name, format!("{bits} bits not in 1..=8")))
    }
}

/// Nearest level an n-bit channel can hold, expressed in 8 bits.
#[inline]
fn snap(v: i16, bits: u8) -> i16 {
    let max = (1i32 << bits) - 1;
    let q = (v as i32 * max + 127) / 255;
    expand_channel(q as u16, bits) as i16
}

/// Floyd-Steinberg dithering to `r_bits`/`g_bits`/`b_bits`/`a_bits` per channel.
///
/// Pixels are visited in raster order. Each channel is snapped to the
/// nearest representable level and the error `e` is spread as `7e/16`
/// right, `3e/16` below-left, `5e/16` below, `e/16` below-right. The image
/// keeps its format; channels already on a level are left unchanged.
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] for compressed images
/// - [`Error::InvalidParameter`] if any bit count is outside `1..=8`
pub fn dither(image: &mut Image, r_bits: u8, g_bits: u8, b_bits: u8, a_bits: u8) -> Result<()> {
    let codec = image.codec_for("dither")?;
    check_bits("r_bits", r_bits)?;
    check_bits("g_bits", g_bits)?;
    check_bits("b_bits", b_bits)?;
    check_bits("a_bits", a_bits)?;

    let (width, height) = image.dimensions();
    debug!(width, height, r_bits, g_bits, b_bits, a_bits, "dither");

    let bits = [r_bits, g_bits, b_bits, a_bits];
    let (w, h) = (width as usize, height as usize);
    let mut plane: Vec<[i16; 4]> = image
        .data()
        .chunks_exact(codec.bytes_per_pixel)
        .map(|px| (codec.decode)(px).to_array().map(i16::from))
        .collect();

    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            let mut err = [0i16; 4];
            for ((v, &b), e) in plane[i].iter_mut().zip(&bits).zip(&mut err) {
                let old = (*v).clamp(0, 255);
                let new = snap(old, b);
                *v = new;
                *e = old - new;
            }
            if err == [0; 4] {
                continue;
            }

            let mut spread = |nx: usize, ny: usize, weight: i16| {
                for (v, e) in plane[ny * w + nx].iter_mut().zip(err) {
                    *v += e * weight / 16;
                }
            };
            if x + 1 < w {
                spread(x + 1, y, 7);
            }
            if y + 1 < h {
                if x > 0 {
                    spread(x - 1, y + 1, 3);
                }
                spread(x, y + 1, 5);
                if x + 1 < w {
                    spread(x + 1, y + 1, 1);
                }
            }
        }
    }

    let colors: Vec<Color> = plane
        .iter()
        .map(|p| Color::from_array(p.map(|v| v.clamp(0, 255) as u8)))
        .collect();
    let format = image.format();
    image.replace(width, height, format, codec.encode_all(&colors))
}

/// Dithers to the channel depths of `target`, then converts to it.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] if either format is block-compressed.
pub fn dither_to(image: &mut Image, target: PixelFormat) -> Result<()> {
    image.codec_for("dither_to")?;
    let [r, g, b, a] = target
        .channel_bits()
        .ok_or_else(|| Error::unsupported_format("dither_to", target))?;
    dither(image, r, g, b, a)?;
    convert(image, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32) -> Image {
        let colors: Vec<Color> = (0..width * height)
            .map(|i| {
                let v = (i * 255 / (width * height - 1)) as u8;
                Color::rgb(v, 255 - v, v / 2)
            })
            .collect();
        Image::from_colors(width, height, &colors).unwrap()
    }

    #[test]
    fn test_convert_gray_to_rgba() {
        let mut img = Image::from_raw(2, 1, PixelFormat::Grayscale, vec![10, 200]).unwrap();
        convert(&mut img, PixelFormat::R8G8B8A8).unwrap();
        assert_eq!(img.data(), &[10, 10, 10, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn test_convert_rgba_to_rgb_drops_alpha() {
        let mut img = Image::from_colors(1, 1, &[Color::new(1, 2, 3, 4)]).unwrap();
        convert(&mut img, PixelFormat::R8G8B8).unwrap();
        assert_eq!(img.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_convert_truncates_to_packed() {
        let mut img = Image::from_colors(1, 1, &[Color::rgb(255, 128, 0)]).unwrap();
        convert(&mut img, PixelFormat::R5G6B5).unwrap();
        let v = u16::from_le_bytes([img.data()[0], img.data()[1]]);
        assert_eq!((v >> 11, (v >> 5) & 0x3f, v & 0x1f), (31, 31, 0));
    }

    #[test]
    fn test_convert_compressed_rejected() {
        let mut img = ramp(4, 4);
        let before = img.clone();
        let err = convert(&mut img, PixelFormat::Dxt5Rgba).unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(img, before);

        let mut packed = Image::from_raw(4, 4, PixelFormat::Etc1Rgb, vec![0; 8]).unwrap();
        assert!(convert(&mut packed, PixelFormat::R8G8B8A8).is_err());
    }

    #[test]
    fn test_dither_rejects_bad_bits() {
        let mut img = ramp(4, 4);
        let before = img.clone();
        assert!(dither(&mut img, 0, 8, 8, 8).unwrap_err().is_parameter_error());
        assert!(dither(&mut img, 8, 8, 9, 8).is_err());
        assert_eq!(img, before);
    }

    #[test]
    fn test_dither_full_depth_is_identity() {
        let mut img = ramp(16, 4);
        let before = img.clone();
        dither(&mut img, 8, 8, 8, 8).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_dither_one_bit_keeps_mean() {
        let mut img = Image::filled(16, 16, Color::gray(128)).unwrap();
        dither(&mut img, 1, 1, 1, 1).unwrap();
        let colors = img.to_colors().unwrap();
        assert!(colors.iter().all(|c| matches!(c.r, 0 | 255) && c.a == 255));
        let mean = colors.iter().map(|c| c.r as u32).sum::<u32>() / colors.len() as u32;
        assert!((108..=148).contains(&mean), "mean {mean}");
    }

    #[test]
    fn test_dither_then_convert_is_lossless() {
        let mut img = ramp(16, 8);
        dither(&mut img, 5, 6, 5, 8).unwrap();
        let dithered = img.to_colors().unwrap();
        convert(&mut img, PixelFormat::R5G6B5).unwrap();
        assert_eq!(img.to_colors().unwrap(), dithered);
    }

    #[test]
    fn test_dither_to_packed() {
        let mut img = ramp(8, 8);
        dither_to(&mut img, PixelFormat::R4G4B4A4).unwrap();
        assert_eq!(img.format(), PixelFormat::R4G4B4A4);
        assert_eq!(img.data().len(), 8 * 8 * 2);
        assert!(dither_to(&mut img, PixelFormat::Dxt1Rgb).is_err());
    }
}
