//! Image resize and resampling operations.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky); raw byte copy
//! - [`Filter::Bilinear`] - Four-tap linear interpolation (smooth)
//!
//! Bilinear resampling decodes each pixel to 8-bit RGBA, blends all four
//! channels (alpha included), and encodes back into the image's own format.
//! Sample positions are centre-aligned and clamped to the source, so edge
//! pixels never read outside the buffer.
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, Image};
//! use texel_ops::resize::{resize_with, Filter};
//!
//! let mut img = Image::filled(64, 64, Color::RED)?;
//! resize_with(&mut img, 128, 32, Filter::Bilinear)?;
//! assert_eq!(img.dimensions(), (128, 32));
//! # Ok::<(), texel_core::Error>(())
//! ```

use texel_core::{Color, Error, Image, PixelCodec, Result};
use tracing::debug;

use crate::parallel::for_each_row;

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    #[default]
    Bilinear,
}

impl std::str::FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" | "point" => Ok(Self::Nearest),
            "bilinear" | "linear" => Ok(Self::Bilinear),
            _ => Err(Error::invalid_parameter("filter", format!("unknown filter `{s}`"))),
        }
    }
}

/// Shared checks. Returns `None` when the size is unchanged.
fn prepare(image: &Image, op: &'static str, width: u32, height: u32) -> Result<Option<PixelCodec>> {
    let codec = image.codec_for(op)?;
    if width == 0 || height == 0 {
        return Err(Error::invalid_parameter(
            "size",
            format!("target {width}x{height} must be non-zero"),
        ));
    }
    if image.dimensions() == (width, height) {
        return Ok(None);
    }
    Ok(Some(codec))
}

/// Resizes with the given filter.
pub fn resize_with(image: &mut Image, width: u32, height: u32, filter: Filter) -> Result<()> {
    match filter {
        Filter::Nearest => resize_nearest(image, width, height),
        Filter::Bilinear => resize(image, width, height),
    }
}

/// Bilinear resize to `width x height`.
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] for compressed images
/// - [`Error::InvalidParameter`] if either target dimension is zero
pub fn resize(image: &mut Image, width: u32, height: u32) -> Result<()> {
    let Some(codec) = prepare(image, "resize", width, height)? else {
        return Ok(());
    };
    let (src_w, src_h) = image.dimensions();
    debug!(src_w, src_h, width, height, format = %image.format(), "resize bilinear");

    let src = image.to_colors()?;
    let taps = |dst: u32, src_len: u32| -> Vec<(usize, usize, f32)> {
        let scale = src_len as f32 / dst as f32;
        let last = (src_len - 1) as f32;
        (0..dst)
            .map(|d| {
                let s = ((d as f32 + 0.5) * scale - 0.5).clamp(0.0, last);
                let i0 = s.floor() as usize;
                let i1 = (i0 + 1).min(src_len as usize - 1);
                (i0, i1, s - i0 as f32)
            })
            .collect()
    };
    let xs = taps(width, src_w);
    let ys = taps(height, src_h);

    let sw = src_w as usize;
    let bpp = codec.bytes_per_pixel;
    let mut out = vec![0u8; width as usize * height as usize * bpp];
    for_each_row(&mut out, width as usize * bpp, |y, row| {
        let (y0, y1, fy) = ys[y];
        for (&(x0, x1, fx), px) in xs.iter().zip(row.chunks_exact_mut(bpp)) {
            let p00 = src[y0 * sw + x0].to_array();
            let p10 = src[y0 * sw + x1].to_array();
            let p01 = src[y1 * sw + x0].to_array();
            let p11 = src[y1 * sw + x1].to_array();
            let mut c = [0u8; 4];
            for i in 0..4 {
                let top = p00[i] as f32 + (p10[i] as f32 - p00[i] as f32) * fx;
                let bottom = p01[i] as f32 + (p11[i] as f32 - p01[i] as f32) * fx;
                c[i] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
            }
            (codec.encode)(Color::from_array(c), px);
        }
    });

    let format = image.format();
    image.replace(width, height, format, out)
}

/// Nearest-neighbor resize: destination pixel `d` copies source pixel
/// `floor(d * src / dst)` on each axis.
///
/// # Errors
///
/// - [`Error::UnsupportedFormat`] for compressed images
/// - [`Error::InvalidParameter`] if either target dimension is zero
pub fn resize_nearest(image: &mut Image, width: u32, height: u32) -> Result<()> {
    let Some(codec) = prepare(image, "resize_nearest", width, height)? else {
        return Ok(());
    };
    let (src_w, src_h) = image.dimensions();
    debug!(src_w, src_h, width, height, format = %image.format(), "resize nearest");

    let map = |d: u32, dst: u32, src: u32| (d as u64 * src as u64 / dst as u64) as usize;
    let xs: Vec<usize> = (0..width).map(|x| map(x, width, src_w)).collect();

    let bpp = codec.bytes_per_pixel;
    let src_stride = src_w as usize * bpp;
    let data = image.data();
    let mut out = vec![0u8; width as usize * height as usize * bpp];
    for_each_row(&mut out, width as usize * bpp, |y, row| {
        let sy = map(y as u32, height, src_h);
        let src_row = &data[sy * src_stride..(sy + 1) * src_stride];
        for (&sx, px) in xs.iter().zip(row.chunks_exact_mut(bpp)) {
            px.copy_from_slice(&src_row[sx * bpp..(sx + 1) * bpp]);
        }
    });

    let format = image.format();
    image.replace(width, height, format, out)
}
