//! Per-pixel color adjustments.
//!
//! Every function here decodes each pixel with the image's codec, applies
//! an integer transform, and encodes it back in place. Inputs are validated
//! before the first byte is written, so an `Err` leaves the image as it was.
//!
//! | op | channels | rule |
//! |---|---|---|
//! | [`tint`] | RGBA | `(c * t + 127) / 255` |
//! | [`invert`] | RGB | `255 - c` |
//! | [`grayscale`] | RGB | integer luminance, format kept |
//! | [`contrast`] | RGB | `128 + round((c - 128) * ((100 + f) / 100)^2)` |
//! | [`brightness`] | RGB | `c + delta` |
//! | [`alpha_mask`] | A | mask luminance |
//!
//! All results saturate to `[0, 255]`.

use texel_core::{Color, Error, Image, PixelFormat, Result};
use tracing::debug;

use crate::parallel::for_each_pixel;

/// Applies `f` to every decoded pixel, in place.
fn map_colors<F>(image: &mut Image, op: &'static str, f: F) -> Result<()>
where
    F: Fn(Color) -> Color + Send + Sync,
{
    let codec = image.codec_for(op)?;
    let width = image.width() as usize;
    for_each_pixel(image.data_mut(), width, codec.bytes_per_pixel, |px| {
        (codec.encode)(f((codec.decode)(px)), px);
    });
    Ok(())
}

#[inline]
fn map_rgb(c: Color, f: impl Fn(u8) -> u8) -> Color {
    Color::new(f(c.r), f(c.g), f(c.b), c.a)
}

/// Multiplies every channel, alpha included, by `color / 255`.
///
/// ```rust
/// use texel_core::{Color, Image};
/// use texel_ops::adjust::tint;
///
/// let mut img = Image::filled(2, 2, Color::RED)?;
/// tint(&mut img, Color::gray(128))?;
/// assert_eq!(img.pixel(0, 0), Some(Color::new(128, 0, 0, 255)));
/// # Ok::<(), texel_core::Error>(())
/// ```
pub fn tint(image: &mut Image, color: Color) -> Result<()> {
    debug!(width = image.width(), height = image.height(), %color, "tint");
    let t = color.to_array().map(u32::from);
    map_colors(image, "tint", |c| {
        let mul = |v: u8, t: u32| ((v as u32 * t + 127) / 255) as u8;
        Color::new(mul(c.r, t[0]), mul(c.g, t[1]), mul(c.b, t[2]), mul(c.a, t[3]))
    })
}

/// Inverts R, G and B; alpha is untouched.
pub fn invert(image: &mut Image) -> Result<()> {
    debug!(width = image.width(), height = image.height(), "invert");
    map_colors(image, "invert", |c| map_rgb(c, |v| 255 - v))
}

/// Replaces R, G and B with their integer luminance.
///
/// The image keeps its format; alpha is untouched. Use
/// [`convert`](crate::convert::convert) to [`PixelFormat::Grayscale`] to
/// also shrink the buffer.
pub fn grayscale(image: &mut Image) -> Result<()> {
    debug!(width = image.width(), height = image.height(), "grayscale");
    map_colors(image, "grayscale", |c| Color::gray(c.luminance()).with_alpha(c.a))
}

/// Linear contrast around mid-gray.
///
/// `factor` in `[-100, 100]`; 0 is the identity, -100 flattens to 128,
/// positive values push channels toward 0 and 255. The offset from 128 is
/// rounded, so levels equally far above and below mid-gray stay mirrored.
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] for compressed images
/// - [`Error::InvalidParameter`] if `factor` is out of range or not finite
pub fn contrast(image: &mut Image, factor: f32) -> Result<()> {
    if !(-100.0..=100.0).contains(&factor) {
        return Err(Error::invalid_parameter("contrast", format!("{factor} not in [-100, 100]")));
    }
    debug!(width = image.width(), height = image.height(), factor, "contrast");
    let scale = ((100.0 + factor) / 100.0).powi(2);
    map_colors(image, "contrast", |c| {
        map_rgb(c, |v| (128.0 + ((v as f32 - 128.0) * scale).round()).clamp(0.0, 255.0) as u8)
    })
}

/// Adds `delta` to R, G and B, saturating.
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] for compressed images
/// - [`Error::InvalidParameter`] if `delta` is outside `[-255, 255]`
pub fn brightness(image: &mut Image, delta: i32) -> Result<()> {
    if !(-255..=255).contains(&delta) {
        return Err(Error::invalid_parameter("brightness", format!("{delta} not in [-255, 255]")));
    }
    debug!(width = image.width(), height = image.height(), delta, "brightness");
    map_colors(image, "brightness", |c| map_rgb(c, |v| (v as i32 + delta).clamp(0, 255) as u8))
}

/// Format an image is promoted to before it can carry an 8-bit alpha.
fn with_alpha_channel(format: PixelFormat) -> PixelFormat {
    match format {
        PixelFormat::Grayscale | PixelFormat::GrayAlpha => PixelFormat::GrayAlpha,
        _ => PixelFormat::R8G8B8A8,
    }
}

/// Sets the alpha of every pixel to the luminance of the matching `mask` pixel.
///
/// `mask` may be in any uncompressed format. Images without an 8-bit alpha
/// channel are promoted first: `Grayscale` to `GrayAlpha`, everything else
/// to `R8G8B8A8`.
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] if either image is compressed
/// - [`Error::DimensionMismatch`] if the sizes differ
pub fn alpha_mask(image: &mut Image, mask: &Image) -> Result<()> {
    let src = image.codec_for("alpha_mask")?;
    let mask_codec = mask.codec_for("alpha_mask")?;
    if image.dimensions() != mask.dimensions() {
        return Err(Error::dimension_mismatch(image.dimensions(), mask.dimensions()));
    }

    let target = with_alpha_channel(image.format());
    let dst = target.codec()?;
    let (width, height) = image.dimensions();
    debug!(width, height, from = %image.format(), to = %target, "alpha_mask");

    let colors: Vec<Color> = image
        .data()
        .chunks_exact(src.bytes_per_pixel)
        .zip(mask.data().chunks_exact(mask_codec.bytes_per_pixel))
        .map(|(px, m)| (src.decode)(px).with_alpha((mask_codec.decode)(m).luminance()))
        .collect();
    image.replace(width, height, target, dst.encode_all(&colors))
}
