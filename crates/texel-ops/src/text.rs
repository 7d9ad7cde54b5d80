//! Text overlay on top of an external glyph rasterizer.
//!
//! Glyph shapes come from a [`GlyphRasterizer`] implementation (a font
//! engine living outside this crate). This module only lays glyphs out on
//! a single line, tints them with the text color, and blends them into the
//! target with the same "over" operator as [`draw`](crate::composite::draw).
//!
//! A glyph bitmap is expected to be white with coverage in alpha (any
//! uncompressed format works); tinting multiplies it by
//! [`TextStyle::color`].

use texel_core::{Color, Error, Image, PixelFormat, Rect, Result};
use tracing::debug;

use crate::adjust::tint;
use crate::composite::draw;
use crate::convert::convert;

/// One rasterized glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGlyph {
    /// Coverage bitmap.
    pub bitmap: Image,
    /// Horizontal pen advance in pixels.
    pub advance: i32,
    /// Bitmap offset from the pen position (x right, y down).
    pub offset: (i32, i32),
}

/// Source of glyph bitmaps for a string.
pub trait GlyphRasterizer {
    /// Rasterizes `text` at `size` pixels, lazily, one glyph per character.
    fn rasterize<'a>(&'a self, text: &'a str, size: u32) -> impl Iterator<Item = RasterGlyph> + 'a;
}

/// Text size, letter spacing, and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Font size in pixels (line height).
    pub size: u32,
    /// Extra pixels between glyphs.
    pub spacing: i32,
    /// Text color.
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 10,
            spacing: 1,
            color: Color::BLACK,
        }
    }
}

/// Glyph converted to RGBA and tinted, with its placement relative to the origin.
struct Placed {
    bitmap: Image,
    x: i32,
    y: i32,
}

/// Lays glyphs out and returns them with the pen's final advance.
fn layout<R: GlyphRasterizer>(
    rasterizer: &R,
    text: &str,
    style: &TextStyle,
) -> Result<(Vec<Placed>, i32)> {
    let mut pen = 0i32;
    let mut placed = Vec::new();
    for (i, glyph) in rasterizer.rasterize(text, style.size).enumerate() {
        if i > 0 {
            pen = pen.saturating_add(style.spacing);
        }
        let mut bitmap = glyph.bitmap;
        convert(&mut bitmap, PixelFormat::R8G8B8A8)?;
        tint(&mut bitmap, style.color)?;
        placed.push(Placed {
            bitmap,
            x: pen.saturating_add(glyph.offset.0),
            y: glyph.offset.1,
        });
        pen = pen.saturating_add(glyph.advance);
    }
    Ok((placed, pen))
}

/// Extent of laid-out glyphs: the larger of the pen advance and the right
/// edge of every bitmap wide, at least `size` high.
fn extent(glyphs: &[Placed], pen: i32, size: u32) -> (u32, u32) {
    let width = glyphs
        .iter()
        .map(|g| g.x as i64 + g.bitmap.width() as i64)
        .fold(pen as i64, i64::max);
    let height = glyphs
        .iter()
        .map(|g| g.y as i64 + g.bitmap.height() as i64)
        .fold(size as i64, i64::max);
    let clamp = |v: i64| v.clamp(0, u32::MAX as i64) as u32;
    (clamp(width), clamp(height))
}

/// Blends prepared glyphs into `dst` relative to `position`.
fn blend(dst: &mut Image, glyphs: &[Placed], position: (i32, i32)) -> Result<()> {
    for g in glyphs {
        let target = Rect::new(
            position.0.saturating_add(g.x),
            position.1.saturating_add(g.y),
            g.bitmap.width(),
            g.bitmap.height(),
        );
        draw(dst, &g.bitmap, g.bitmap.bounds(), target)?;
    }
    Ok(())
}

/// Size in pixels that `text` occupies when drawn with `style`.
///
/// Width covers both the summed advances and the right edge of every
/// glyph; height is at least `style.size`.
pub fn measure_text<R: GlyphRasterizer>(
    rasterizer: &R,
    text: &str,
    style: &TextStyle,
) -> (u32, u32) {
    let mut pen = 0i64;
    let mut width = 0i64;
    let mut height = style.size as i64;
    for (i, glyph) in rasterizer.rasterize(text, style.size).enumerate() {
        if i > 0 {
            pen += style.spacing as i64;
        }
        width = width.max(pen + glyph.offset.0 as i64 + glyph.bitmap.width() as i64);
        height = height.max(glyph.offset.1 as i64 + glyph.bitmap.height() as i64);
        pen += glyph.advance as i64;
    }
    let clamp = |v: i64| v.clamp(0, u32::MAX as i64) as u32;
    (clamp(width.max(pen)), clamp(height))
}

/// Draws `text` into `dst` with its top-left pen position at `position`.
///
/// All glyphs are prepared before the first one is blended, so a failing
/// glyph leaves `dst` unchanged. Glyphs outside `dst` are clipped.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] if `dst` or a glyph bitmap is compressed.
pub fn draw_text<R: GlyphRasterizer>(
    dst: &mut Image,
    rasterizer: &R,
    text: &str,
    position: (i32, i32),
    style: &TextStyle,
) -> Result<()> {
    dst.codec_for("draw_text")?;
    let (glyphs, _) = layout(rasterizer, text, style)?;
    debug!(
        glyphs = glyphs.len(),
        x = position.0,
        y = position.1,
        size = style.size,
        "draw_text"
    );
    blend(dst, &glyphs, position)
}

/// Renders `text` into a new transparent `R8G8B8A8` image just large enough
/// to hold it (the size [`measure_text`] reports).
///
/// The rasterizer is run once; the image is sized from the same glyphs
/// that are drawn into it.
///
/// # Errors
///
/// [`Error::InvalidDimensions`] if the text measures zero pixels wide or high.
pub fn image_text<R: GlyphRasterizer>(
    rasterizer: &R,
    text: &str,
    style: &TextStyle,
) -> Result<Image> {
    let (glyphs, pen) = layout(rasterizer, text, style)?;
    let (width, height) = extent(&glyphs, pen, style.size);
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "text has no extent"));
    }
    debug!(glyphs = glyphs.len(), width, height, "image_text");
    let mut image = Image::new(width, height, PixelFormat::R8G8B8A8)?;
    blend(&mut image, &glyphs, (0, 0))?;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::over_pixel;
    use std::cell::Cell;

    /// White block half the size wide with uniform `alpha` coverage.
    fn block(size: u32, alpha: u8) -> RasterGlyph {
        let w = (size / 2).max(1);
        let data = [255, alpha].repeat((w * size) as usize);
        RasterGlyph {
            bitmap: Image::from_raw(w, size, PixelFormat::GrayAlpha, data).unwrap(),
            advance: w as i32,
            offset: (0, 0),
        }
    }

    /// Every non-space char is a solid block.
    struct BlockFont;

    impl GlyphRasterizer for BlockFont {
        fn rasterize<'a>(
            &'a self,
            text: &'a str,
            size: u32,
        ) -> impl Iterator<Item = RasterGlyph> + 'a {
            text.chars().map(move |ch| block(size, if ch == ' ' { 0 } else { 255 }))
        }
    }

    /// Blocks with partial coverage; counts how often it is asked to rasterize.
    struct CountingFont {
        coverage: u8,
        calls: Cell<u32>,
    }

    impl CountingFont {
        fn new(coverage: u8) -> Self {
            Self {
                coverage,
                calls: Cell::new(0),
            }
        }
    }

    impl GlyphRasterizer for CountingFont {
        fn rasterize<'a>(
            &'a self,
            text: &'a str,
            size: u32,
        ) -> impl Iterator<Item = RasterGlyph> + 'a {
            self.calls.set(self.calls.get() + 1);
            text.chars().map(move |_| block(size, self.coverage))
        }
    }

    fn style() -> TextStyle {
        TextStyle {
            size: 4,
            spacing: 1,
            color: Color::RED,
        }
    }

    #[test]
    fn test_measure_text() {
        assert_eq!(measure_text(&BlockFont, "ab", &style()), (5, 4));
        assert_eq!(measure_text(&BlockFont, "", &style()), (0, 4));
    }

    #[test]
    fn test_draw_text_tints_and_spaces() {
        let mut dst = Image::filled(8, 6, Color::WHITE).unwrap();
        draw_text(&mut dst, &BlockFont, "a b", (1, 1), &style()).unwrap();
        assert_eq!(dst.pixel(1, 1), Some(Color::RED));
        assert_eq!(dst.pixel(2, 4), Some(Color::RED));
        // spacing column and the transparent space glyph
        assert_eq!(dst.pixel(3, 1), Some(Color::WHITE));
        assert_eq!(dst.pixel(4, 1), Some(Color::WHITE));
        assert_eq!(dst.pixel(7, 1), Some(Color::RED));
        assert_eq!(dst.pixel(1, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_image_text() {
        let img = image_text(&BlockFont, "hi", &style()).unwrap();
        assert_eq!(img.dimensions(), (5, 4));
        assert_eq!(img.pixel(0, 0), Some(Color::RED));
        assert_eq!(img.pixel(2, 0), Some(Color::BLANK));
        assert!(image_text(&BlockFont, "", &style()).is_err());
    }

    #[test]
    fn test_image_text_rasterizes_once() {
        let font = CountingFont::new(255);
        let img = image_text(&font, "abc", &style()).unwrap();
        assert_eq!(font.calls.get(), 1);
        assert_eq!(img.dimensions(), measure_text(&BlockFont, "abc", &style()));
    }

    #[test]
    fn test_draw_text_partial_coverage() {
        let bg = Color::new(10, 200, 30, 255);
        let mut dst = Image::filled(4, 4, bg).unwrap();
        let style = TextStyle {
            color: Color::new(200, 100, 50, 255),
            ..style()
        };
        draw_text(&mut dst, &CountingFont::new(128), "a", (0, 0), &style).unwrap();

        let expected = over_pixel(Color::new(200, 100, 50, 128), bg);
        assert_ne!(expected, bg);
        assert_eq!(dst.pixel(0, 0), Some(expected));
        assert_eq!(dst.pixel(1, 3), Some(expected));
        assert_eq!(dst.pixel(2, 0), Some(bg));
    }

    #[test]
    fn test_draw_text_compressed_target() {
        let mut dst = Image::from_raw(4, 4, PixelFormat::Dxt1Rgb, vec![0; 8]).unwrap();
        assert!(draw_text(&mut dst, &BlockFont, "a", (0, 0), &style()).is_err());
    }
}
