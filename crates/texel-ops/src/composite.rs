//! Image compositing.
//!
//! [`draw`] copies a source rectangle into a destination rectangle,
//! scaling with nearest-neighbor sampling when the sizes differ and
//! blending every pixel with the 8-bit Porter-Duff "over" operator
//! ([`over_pixel`]).
//!
//! # Clipping
//!
//! The source rectangle is clipped to the source image. Destination pixels
//! are visited over the part of the destination rectangle that lies inside
//! the destination image, and each one samples the clipped source mapped
//! across the full destination rectangle. A rectangle that clips away
//! entirely makes the draw a no-op.
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, Image, Rect};
//! use texel_ops::composite::{draw, over_pixel};
//!
//! let fg = Color::new(255, 0, 0, 128);
//! let bg = Color::BLUE;
//! let mixed = over_pixel(fg, bg);
//! assert!(mixed.r > 100 && mixed.b > 100);
//!
//! let mut canvas = Image::filled(8, 8, Color::BLACK)?;
//! let sprite = Image::filled(2, 2, Color::WHITE)?;
//! draw(&mut canvas, &sprite, sprite.bounds(), Rect::new(2, 2, 4, 4))?;
//! assert_eq!(canvas.pixel(5, 5), Some(Color::WHITE));
//! # Ok::<(), texel_core::Error>(())
//! ```

use texel_core::{Color, Image, Rect, Result};
use tracing::{debug, trace};

use crate::parallel::for_each_row;

/// Composites `fg` over `bg` in 8-bit integer arithmetic.
///
/// `rgb = (fg * a + bg * (255 - a) + 127) / 255`,
/// `alpha = a + (bg.a * (255 - a) + 127) / 255`. An opaque `fg` is
/// returned exactly; a fully transparent one returns `bg` exactly.
#[inline]
pub fn over_pixel(fg: Color, bg: Color) -> Color {
    let a = fg.a as u32;
    let inv = 255 - a;
    let mix = |f: u8, b: u8| ((f as u32 * a + b as u32 * inv + 127) / 255) as u8;
    Color::new(
        mix(fg.r, bg.r),
        mix(fg.g, bg.g),
        mix(fg.b, bg.b),
        (a + (bg.a as u32 * inv + 127) / 255) as u8,
    )
}

/// Draws `src_rect` of `src` into `dst_rect` of `dst`.
///
/// Both images may be in any uncompressed format; source pixels are
/// decoded, blended over the decoded destination, and encoded back in the
/// destination's format.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`](texel_core::Error::UnsupportedFormat) if
/// either image is compressed. Fully clipped rectangles are not an error.
pub fn draw(dst: &mut Image, src: &Image, src_rect: Rect, dst_rect: Rect) -> Result<()> {
    let dst_codec = dst.codec_for("draw")?;
    let src_codec = src.codec_for("draw")?;
    let (dst_w, dst_h) = dst.dimensions();

    let Some(src_clip) = src_rect.clamp_to(src.width(), src.height()) else {
        trace!(%src_rect, "draw: source clipped away");
        return Ok(());
    };
    let Some(dst_clip) = dst_rect.clamp_to(dst_w, dst_h) else {
        trace!(%dst_rect, "draw: destination clipped away");
        return Ok(());
    };
    debug!(%src_clip, %dst_rect, %dst_clip, "draw");

    // nearest source column for each destination column in the clip
    let src_x = |dx: i64| -> usize {
        let u = (dx - dst_rect.x as i64) as u64;
        src_clip.x as usize + (u * src_clip.width as u64 / dst_rect.width as u64) as usize
    };
    let src_y = |dy: i64| -> usize {
        let v = (dy - dst_rect.y as i64) as u64;
        src_clip.y as usize + (v * src_clip.height as u64 / dst_rect.height as u64) as usize
    };
    let cols: Vec<usize> = (dst_clip.x as i64..dst_clip.right()).map(src_x).collect();

    let sbpp = src_codec.bytes_per_pixel;
    let dbpp = dst_codec.bytes_per_pixel;
    let src_stride = src.width() as usize * sbpp;
    let src_data = src.data();
    let (y0, y1) = (dst_clip.y as usize, dst_clip.bottom() as usize);
    let x0 = dst_clip.x as usize;

    for_each_row(dst.data_mut(), dst_w as usize * dbpp, |y, row| {
        if y < y0 || y >= y1 {
            return;
        }
        let sy = src_y(y as i64);
        let src_row = &src_data[sy * src_stride..(sy + 1) * src_stride];
        for (i, &sx) in cols.iter().enumerate() {
            let d = &mut row[(x0 + i) * dbpp..(x0 + i + 1) * dbpp];
            let fg = (src_codec.decode)(&src_row[sx * sbpp..(sx + 1) * sbpp]);
            let out = over_pixel(fg, (dst_codec.decode)(d));
            (dst_codec.encode)(out, d);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use texel_core::PixelFormat;

    #[test]
    fn test_over_opaque() {
        let fg = Color::new(10, 20, 30, 255);
        assert_eq!(over_pixel(fg, Color::new(200, 200, 200, 17)), fg);
    }

    #[test]
    fn test_over_transparent() {
        let bg = Color::new(1, 2, 3, 44);
        assert_eq!(over_pixel(Color::new(255, 255, 255, 0), bg), bg);
    }

    #[test]
    fn test_over_semi_transparent() {
        let out = over_pixel(Color::new(255, 0, 0, 128), Color::BLUE);
        assert_eq!(out, Color::new(128, 0, 127, 255));
    }

    #[test]
    fn test_draw_opaque_is_exact() {
        let colors: Vec<Color> = (0..16).map(|i| Color::new(i * 10, 255 - i, i, 255)).collect();
        let src = Image::from_colors(4, 4, &colors).unwrap();
        let mut dst = Image::filled(6, 6, Color::new(9, 9, 9, 90)).unwrap();
        draw(&mut dst, &src, Rect::new(1, 1, 2, 2), Rect::new(3, 0, 2, 2)).unwrap();
        assert_eq!(dst.pixel(3, 0), src.pixel(1, 1));
        assert_eq!(dst.pixel(4, 1), src.pixel(2, 2));
        assert_eq!(dst.pixel(2, 0), Some(Color::new(9, 9, 9, 90)));
        assert_eq!(dst.pixel(3, 2), Some(Color::new(9, 9, 9, 90)));
    }

    #[test]
    fn test_draw_scales_nearest() {
        let src = Image::from_colors(2, 1, &[Color::RED, Color::GREEN]).unwrap();
        let mut dst = Image::filled(4, 2, Color::BLACK).unwrap();
        let whole = dst.bounds();
        draw(&mut dst, &src, src.bounds(), whole).unwrap();
        let c = dst.to_colors().unwrap();
        assert_eq!(&c[..4], &[Color::RED, Color::RED, Color::GREEN, Color::GREEN]);
        assert_eq!(&c[4..], &c[..4]);
    }

    #[test]
    fn test_draw_partially_clipped() {
        let colors = [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE];
        let src = Image::from_colors(2, 2, &colors).unwrap();
        let mut dst = Image::filled(3, 3, Color::BLACK).unwrap();
        draw(&mut dst, &src, src.bounds(), Rect::new(-1, -1, 2, 2)).unwrap();
        // only the bottom-right source pixel lands inside
        assert_eq!(dst.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(dst.pixel(1, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_draw_clipped_away_is_noop() {
        let src = Image::filled(2, 2, Color::WHITE).unwrap();
        let mut dst = Image::filled(4, 4, Color::BLACK).unwrap();
        let before = dst.clone();
        draw(&mut dst, &src, src.bounds(), Rect::new(10, 10, 2, 2)).unwrap();
        draw(&mut dst, &src, Rect::new(-5, -5, 2, 2), before.bounds()).unwrap();
        draw(&mut dst, &src, src.bounds(), Rect::new(0, 0, 0, 3)).unwrap();
        assert_eq!(dst, before);
    }

    #[test]
    fn test_draw_into_gray() {
        let src = Image::filled(1, 1, Color::WHITE).unwrap();
        let mut dst = Image::new(2, 1, PixelFormat::Grayscale).unwrap();
        draw(&mut dst, &src, src.bounds(), Rect::new(1, 0, 1, 1)).unwrap();
        assert_eq!(dst.data(), &[0, 255]);
    }

    #[test]
    fn test_draw_compressed() {
        let src = Image::from_raw(4, 4, PixelFormat::Dxt1Rgba, vec![0; 8]).unwrap();
        let mut dst = Image::filled(4, 4, Color::BLACK).unwrap();
        let err = draw(&mut dst, &src, src.bounds(), Rect::from_size(4, 4)).unwrap_err();
        assert!(err.is_format_error());
    }
}
