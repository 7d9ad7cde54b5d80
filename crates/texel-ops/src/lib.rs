//! # texel-ops
//!
//! CPU-side pixel operations on [`texel_core::Image`].
//!
//! Everything here runs synchronously on a buffer the caller owns. In-place
//! operations take `&mut Image` and validate all inputs before writing, so
//! an `Err` always leaves the image untouched. Generators return a new
//! image.
//!
//! # Modules
//!
//! - [`convert`] - Format conversion and Floyd-Steinberg dithering
//! - [`transform`] - Crop, flips, power-of-two padding
//! - [`resize`] - Bilinear and nearest-neighbor scaling
//! - [`adjust`] - Tint, invert, grayscale, contrast, brightness, alpha mask
//! - [`composite`] - "Over" blending and rectangle drawing
//! - [`text`] - Text overlay on an external glyph rasterizer
//! - [`generate`] - Gradients, checkerboard, white/Perlin/cellular noise
//! - [`noise`] - Seeded improved-Perlin field
//! - [`texture`] - Texture backend seam and in-memory backend
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, PixelFormat, Rect};
//! use texel_ops::{adjust, composite, convert, generate};
//!
//! let mut canvas = generate::gradient_vertical(64, 64, Color::BLUE, Color::BLACK)?;
//! let badge = generate::checkerboard(16, 16, 4, 4, Color::WHITE, Color::RED)?;
//! composite::draw(&mut canvas, &badge, badge.bounds(), Rect::new(8, 8, 32, 32))?;
//! adjust::contrast(&mut canvas, 20.0)?;
//! convert::dither_to(&mut canvas, PixelFormat::R5G6B5)?;
//! # Ok::<(), texel_core::Error>(())
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - Evaluate rows on the rayon pool (enabled by default).
//!   Results are identical with the feature off.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod parallel;

pub mod adjust;
pub mod composite;
pub mod convert;
pub mod generate;
pub mod noise;
pub mod resize;
pub mod text;
pub mod texture;
pub mod transform;

pub use resize::Filter;
pub use text::{GlyphRasterizer, RasterGlyph, TextStyle};
pub use texture::{MemoryBackend, TextureBackend, TextureHandle};
