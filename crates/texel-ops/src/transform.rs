//! Geometric transformation operations.
//!
//! Provides crop, flip, and power-of-two padding. All of them move raw
//! pixels by their byte stride without decoding, so they work identically
//! for every uncompressed format.
//!
//! # Operations
//!
//! - [`crop`] - Keep the part of the image inside a rectangle
//! - [`flip_horizontal`] - Left-right mirror
//! - [`flip_vertical`] - Top-bottom mirror
//! - [`to_pot`] - Grow the canvas to power-of-two dimensions
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, Image, Rect};
//! use texel_ops::transform::{crop, flip_horizontal};
//!
//! let mut img = Image::filled(64, 64, Color::WHITE)?;
//! flip_horizontal(&mut img)?;
//! crop(&mut img, Rect::new(16, 16, 32, 32))?;
//! assert_eq!(img.dimensions(), (32, 32));
//! # Ok::<(), texel_core::Error>(())
//! ```

use texel_core::{Color, Error, Image, Rect, Result};
use tracing::{debug, trace};

use crate::parallel::for_each_row;

/// Crops `image` to `rect`, clipped to the image bounds.
///
/// A rectangle covering the whole image leaves it unchanged.
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] for compressed images
/// - [`Error::OutOfBounds`] if nothing of `rect` lies inside the image
///
/// # Example
///
/// ```rust
/// use texel_core::{Image, PixelFormat, Rect};
/// use texel_ops::transform::crop;
///
/// let mut img = Image::new(10, 10, PixelFormat::Grayscale)?;
/// crop(&mut img, Rect::new(8, 8, 5, 5))?;
/// assert_eq!(img.dimensions(), (2, 2));
/// # Ok::<(), texel_core::Error>(())
/// ```
pub fn crop(image: &mut Image, rect: Rect) -> Result<()> {
    let bpp = image.codec_for("crop")?.bytes_per_pixel;
    let (width, height) = image.dimensions();
    let clipped = rect
        .clamp_to(width, height)
        .ok_or_else(|| Error::out_of_bounds(rect, width, height))?;
    if clipped == image.bounds() {
        return Ok(());
    }
    debug!(width, height, %rect, %clipped, "crop");

    let stride = width as usize * bpp;
    let (x, y) = (clipped.x as usize, clipped.y as usize);
    let row_bytes = clipped.width as usize * bpp;
    let mut out = Vec::with_capacity(row_bytes * clipped.height as usize);
    for row in y..y + clipped.height as usize {
        let start = row * stride + x * bpp;
        out.extend_from_slice(&image.data()[start..start + row_bytes]);
    }

    let format = image.format();
    image.replace(clipped.width, clipped.height, format, out)
}

/// Mirrors the image top to bottom, in place.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] for compressed images.
pub fn flip_vertical(image: &mut Image) -> Result<()> {
    let bpp = image.codec_for("flip_vertical")?.bytes_per_pixel;
    let (width, height) = image.dimensions();
    trace!(width, height, "flip_vertical");

    let stride = width as usize * bpp;
    let h = height as usize;
    let data = image.data_mut();
    for y in 0..h / 2 {
        let (top, bottom) = data.split_at_mut((h - 1 - y) * stride);
        top[y * stride..(y + 1) * stride].swap_with_slice(&mut bottom[..stride]);
    }
    Ok(())
}

/// Mirrors the image left to right, in place.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] for compressed images.
pub fn flip_horizontal(image: &mut Image) -> Result<()> {
    let bpp = image.codec_for("flip_horizontal")?.bytes_per_pixel;
    let (width, height) = image.dimensions();
    trace!(width, height, "flip_horizontal");

    let w = width as usize;
    for_each_row(image.data_mut(), w * bpp, |_, row| {
        for x in 0..w / 2 {
            let (left, right) = row.split_at_mut((w - 1 - x) * bpp);
            left[x * bpp..(x + 1) * bpp].swap_with_slice(&mut right[..bpp]);
        }
    });
    Ok(())
}

/// Grows the canvas to the next power of two in each dimension.
///
/// The original pixels stay anchored at the top-left; the new area is
/// filled with `fill` encoded in the image's format. Images already at
/// power-of-two size are left unchanged.
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] for compressed images
/// - [`Error::InvalidDimensions`] if a dimension has no power of two in `u32`
pub fn to_pot(image: &mut Image, fill: Color) -> Result<()> {
    let codec = image.codec_for("to_pot")?;
    let (width, height) = image.dimensions();
    let pot = |v: u32| {
        v.checked_next_power_of_two()
            .ok_or_else(|| Error::invalid_dimensions(width, height, "no power of two fits in u32"))
    };
    let (new_w, new_h) = (pot(width)?, pot(height)?);
    if (new_w, new_h) == (width, height) {
        return Ok(());
    }
    debug!(width, height, new_w, new_h, "to_pot");

    let bpp = codec.bytes_per_pixel;
    let mut fill_px = vec![0u8; bpp];
    (codec.encode)(fill, &mut fill_px);

    let src_stride = width as usize * bpp;
    let dst_stride = new_w as usize * bpp;
    let mut out = fill_px.repeat(new_w as usize * new_h as usize);
    for (src_row, dst_row) in image
        .data()
        .chunks_exact(src_stride)
        .zip(out.chunks_exact_mut(dst_stride))
    {
        dst_row[..src_stride].copy_from_slice(src_row);
    }

    let format = image.format();
    image.replace(new_w, new_h, format, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use texel_core::PixelFormat;

    fn numbered(width: u32, height: u32) -> Image {
        let data = (0..width * height).map(|i| i as u8).collect();
        Image::from_raw(width, height, PixelFormat::Grayscale, data).unwrap()
    }

    #[test]
    fn test_crop() {
        let mut img = numbered(4, 4);
        crop(&mut img, Rect::new(1, 1, 2, 2)).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.data(), &[5, 6, 9, 10]);
    }

    #[test]
    fn test_crop_clips() {
        let mut img = numbered(4, 4);
        crop(&mut img, Rect::new(-1, 2, 3, 10)).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.data(), &[8, 9, 12, 13]);
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let mut img = numbered(4, 4);
        let before = img.clone();
        let err = crop(&mut img, Rect::new(4, 0, 2, 2)).unwrap_err();
        assert!(err.is_bounds_error());
        assert_eq!(img, before);
    }

    #[test]
    fn test_crop_resets_mipmaps() {
        let mut img = numbered(4, 4).with_mipmaps(3);
        crop(&mut img, Rect::new(0, 0, 4, 4)).unwrap();
        assert_eq!(img.mipmaps(), 3);
        crop(&mut img, Rect::new(0, 0, 2, 2)).unwrap();
        assert_eq!(img.mipmaps(), 1);
    }

    #[test]
    fn test_flip_horizontal() {
        let mut img = numbered(3, 2);
        flip_horizontal(&mut img).unwrap();
        assert_eq!(img.data(), &[2, 1, 0, 5, 4, 3]);
    }

    #[test]
    fn test_flip_vertical() {
        let mut img = numbered(2, 3);
        flip_vertical(&mut img).unwrap();
        assert_eq!(img.data(), &[4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn test_flip_multibyte_stride() {
        let colors = [Color::RED, Color::GREEN, Color::BLUE];
        let mut img = Image::from_colors_as(3, 1, &colors, PixelFormat::R5G6B5).unwrap();
        flip_horizontal(&mut img).unwrap();
        assert_eq!(img.to_colors().unwrap(), [Color::BLUE, Color::GREEN, Color::RED]);
    }

    #[test]
    fn test_flip_compressed() {
        let mut img = Image::from_raw(4, 4, PixelFormat::Dxt1Rgb, vec![0; 8]).unwrap();
        assert!(flip_vertical(&mut img).unwrap_err().is_format_error());
        assert!(flip_horizontal(&mut img).is_err());
    }

    #[test]
    fn test_to_pot() {
        let mut img = numbered(3, 2);
        to_pot(&mut img, Color::WHITE).unwrap();
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.data(), &[0, 1, 2, 255, 3, 4, 5, 255]);

        let before = img.clone();
        to_pot(&mut img, Color::BLACK).unwrap();
        assert_eq!(img, before);
    }
}
