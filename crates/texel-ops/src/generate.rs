//! Procedural image generators.
//!
//! Every generator returns a fresh `R8G8B8A8` image with one mip level.
//! Zero width or height is rejected with
//! [`Error::InvalidDimensions`]. Random generators take the RNG as an
//! argument; seed it (for example with `StdRng::seed_from_u64`) to get a
//! reproducible image.
//!
//! # Generators
//!
//! - [`solid_color`] - Every pixel one color
//! - [`gradient_vertical`] / [`gradient_horizontal`] - Linear two-color ramps
//! - [`gradient_radial`] - Inner-to-outer ramp around the center
//! - [`checkerboard`] - Alternating cells
//! - [`white_noise`] - Random black/white pixels
//! - [`perlin_noise`] / [`perlin_fbm`] - Gradient noise, gray
//! - [`cellular`] - Worley noise, one feature point per tile
//!
//! # Example
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use texel_core::Color;
//! use texel_ops::generate::{checkerboard, perlin_noise};
//!
//! let board = checkerboard(64, 64, 8, 8, Color::BLACK, Color::WHITE)?;
//! assert_eq!(board.pixel(0, 0), Some(Color::BLACK));
//!
//! let clouds = perlin_noise(128, 128, 0.05, &mut StdRng::seed_from_u64(1))?;
//! assert_eq!(clouds.dimensions(), (128, 128));
//! # Ok::<(), texel_core::Error>(())
//! ```

use rand::Rng;
use texel_core::{Color, Error, Image, PixelFormat, Result};
use tracing::debug;

use crate::noise::Perlin;
use crate::parallel::for_each_row;

/// Position along an axis as `t` in `[0, 1]`; 0 for a single pixel.
#[inline]
fn norm(coord: u32, size: u32) -> f32 {
    if size <= 1 {
        0.0
    } else {
        coord as f32 / (size - 1) as f32
    }
}

/// Allocates an RGBA8 image and fills it from `f(x, y)`, one row per task.
fn render<F>(width: u32, height: u32, f: F) -> Result<Image>
where
    F: Fn(u32, u32) -> Color + Send + Sync,
{
    let mut image = Image::new(width, height, PixelFormat::R8G8B8A8)?;
    for_each_row(image.data_mut(), width as usize * 4, |y, row| {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&f(x as u32, y as u32).to_array());
        }
    });
    Ok(image)
}

/// Gray level for a noise value in `[-1, 1]`.
#[inline]
fn noise_gray(v: f32) -> Color {
    Color::gray(((v.clamp(-1.0, 1.0) + 1.0) * 127.5).round() as u8)
}

/// Image with every pixel set to `color`.
pub fn solid_color(width: u32, height: u32, color: Color) -> Result<Image> {
    debug!(width, height, %color, "solid_color");
    Image::filled(width, height, color)
}

/// Vertical ramp from `top` (row 0) to `bottom` (last row).
pub fn gradient_vertical(width: u32, height: u32, top: Color, bottom: Color) -> Result<Image> {
    debug!(width, height, %top, %bottom, "gradient_vertical");
    render(width, height, |_, y| top.lerp(bottom, norm(y, height)))
}

/// Horizontal ramp from `left` (column 0) to `right` (last column).
pub fn gradient_horizontal(width: u32, height: u32, left: Color, right: Color) -> Result<Image> {
    debug!(width, height, %left, %right, "gradient_horizontal");
    render(width, height, |x, _| left.lerp(right, norm(x, width)))
}

/// Radial ramp from `inner` at the center to `outer` at the half-diagonal.
///
/// Distances are normalized by `radius = hypot(width, height) / 2`.
/// `density` in `[0, 1]` holds `inner` solid out to `radius * density`
/// before the ramp starts; `1.0` gives a hard step at the radius.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if `density` is outside `[0, 1]`.
pub fn gradient_radial(
    width: u32,
    height: u32,
    density: f32,
    inner: Color,
    outer: Color,
) -> Result<Image> {
    if !(0.0..=1.0).contains(&density) {
        return Err(Error::invalid_parameter("density", format!("{density} not in [0, 1]")));
    }
    debug!(width, height, density, %inner, %outer, "gradient_radial");

    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let radius = (width as f32).hypot(height as f32) / 2.0;
    let start = radius * density;
    let span = radius - start;
    render(width, height, |x, y| {
        let dist = (x as f32 + 0.5 - cx).hypot(y as f32 + 0.5 - cy);
        let f = if span > 0.0 {
            ((dist - start) / span).clamp(0.0, 1.0)
        } else if dist >= radius {
            1.0
        } else {
            0.0
        };
        inner.lerp(outer, f)
    })
}

/// Checkerboard with `checks_x` by `checks_y` cells.
///
/// Pixel `(x, y)` is `color_a` when `x * checks_x / width + y * checks_y / height` is even.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if either count is zero.
pub fn checkerboard(
    width: u32,
    height: u32,
    checks_x: u32,
    checks_y: u32,
    color_a: Color,
    color_b: Color,
) -> Result<Image> {
    if checks_x == 0 || checks_y == 0 {
        return Err(Error::invalid_parameter(
            "checks",
            format!("{checks_x}x{checks_y} must be non-zero"),
        ));
    }
    debug!(width, height, checks_x, checks_y, "checkerboard");
    render(width, height, |x, y| {
        let cell = x as u64 * checks_x as u64 / width as u64
            + y as u64 * checks_y as u64 / height as u64;
        if cell % 2 == 0 { color_a } else { color_b }
    })
}

/// Each pixel white with probability `factor`, otherwise opaque black.
///
/// Pixels draw from `rng` in raster order.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if `factor` is outside `[0, 1]`.
pub fn white_noise<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    factor: f32,
    rng: &mut R,
) -> Result<Image> {
    if !(0.0..=1.0).contains(&factor) {
        return Err(Error::invalid_parameter("factor", format!("{factor} not in [0, 1]")));
    }
    debug!(width, height, factor, "white_noise");

    let mut image = Image::new(width, height, PixelFormat::R8G8B8A8)?;
    for px in image.data_mut().chunks_exact_mut(4) {
        let c = if rng.r#gen::<f32>() < factor { Color::WHITE } else { Color::BLACK };
        px.copy_from_slice(&c.to_array());
    }
    Ok(image)
}

fn check_scale(scale: f32) -> Result<()> {
    if scale.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_parameter("scale", format!("{scale} is not finite")))
    }
}

/// Gray Perlin noise sampled at `(x * scale, y * scale)`.
///
/// Noise in `[-1, 1]` maps linearly onto `[0, 255]`; alpha is 255.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if `scale` is not finite.
pub fn perlin_noise<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    scale: f32,
    rng: &mut R,
) -> Result<Image> {
    check_scale(scale)?;
    debug!(width, height, scale, "perlin_noise");
    let perlin = Perlin::new(rng);
    render(width, height, |x, y| noise_gray(perlin.noise2(x as f32 * scale, y as f32 * scale)))
}

/// Fractal Perlin noise: `octaves` layers, each `lacunarity` times the
/// frequency and `gain` times the amplitude of the previous one.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if `scale`, `lacunarity` or `gain` is not
/// finite, or `octaves` is zero.
pub fn perlin_fbm<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    scale: f32,
    octaves: u32,
    lacunarity: f32,
    gain: f32,
    rng: &mut R,
) -> Result<Image> {
    check_scale(scale)?;
    if octaves == 0 {
        return Err(Error::invalid_parameter("octaves", "must be at least 1"));
    }
    if !lacunarity.is_finite() || !gain.is_finite() {
        return Err(Error::invalid_parameter(
            "lacunarity",
            format!("lacunarity {lacunarity} and gain {gain} must be finite"),
        ));
    }
    debug!(width, height, scale, octaves, lacunarity, gain, "perlin_fbm");
    let perlin = Perlin::new(rng);
    render(width, height, |x, y| {
        noise_gray(perlin.fbm(x as f32 * scale, y as f32 * scale, octaves, lacunarity, gain))
    })
}

/// Worley noise with one random feature point per `tile_size` square tile.
///
/// Tiles cover the whole image, partial edge tiles included. A pixel's
/// intensity is `min(255, d * 256 / tile_size)` where `d` is the distance
/// to the nearest feature point among the 3x3 surrounding tiles.
///
/// # Errors
///
/// [`Error::InvalidParameter`] if `tile_size` is zero.
pub fn cellular<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    tile_size: u32,
    rng: &mut R,
) -> Result<Image> {
    if tile_size == 0 {
        return Err(Error::invalid_parameter("tile_size", "must be non-zero"));
    }
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    let tiles_x = width.div_ceil(tile_size);
    let tiles_y = height.div_ceil(tile_size);
    debug!(width, height, tile_size, tiles_x, tiles_y, "cellular");

    let tile = tile_size as f32;
    let seeds: Vec<(f32, f32)> = (0..tiles_y)
        .flat_map(|ty| (0..tiles_x).map(move |tx| (tx, ty)))
        .map(|(tx, ty)| {
            let sx = tx as f32 * tile + rng.gen_range(0..tile_size) as f32;
            let sy = ty as f32 * tile + rng.gen_range(0..tile_size) as f32;
            (sx, sy)
        })
        .collect();

    render(width, height, |x, y| {
        let (tx, ty) = ((x / tile_size) as i64, (y / tile_size) as i64);
        let mut min_dist = f32::MAX;
        for ny in (ty - 1).max(0)..=(ty + 1).min(tiles_y as i64 - 1) {
            for nx in (tx - 1).max(0)..=(tx + 1).min(tiles_x as i64 - 1) {
                let (sx, sy) = seeds[(ny * tiles_x as i64 + nx) as usize];
                min_dist = min_dist.min((x as f32 - sx).hypot(y as f32 - sy));
            }
        }
        Color::gray((min_dist * 256.0 / tile).min(255.0) as u8)
    })
}
