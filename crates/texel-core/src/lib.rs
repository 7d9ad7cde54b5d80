//! # texel-core
//!
//! Core types for CPU-side image pixel processing.
//!
//! This crate provides the foundational types used throughout the texel workspace:
//!
//! - [`Image`] - Owned pixel buffer with width, height, mip count, and format
//! - [`PixelFormat`] - Uncompressed and block-compressed encodings
//! - [`PixelCodec`] - Per-format decode/encode to [`Color`]
//! - [`Color`] - 8-bit RGBA value
//! - [`Rect`] - Signed-origin rectangle for crop and draw
//! - [`Error`] - The single error type every operation returns
//!
//! ## Crate Structure
//!
//! ```text
//! texel-core (this crate)
//!    ^
//!    |
//!    +-- texel-ops (convert, transform, adjust, composite, text, generate)
//!    +-- texel-cli (command line front end)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use texel_core::prelude::*;
//!
//! let img = Image::filled(2, 2, Color::WHITE)?;
//! let colors = img.to_colors()?;
//! assert!(colors.iter().all(|&c| c == Color::WHITE));
//! # Ok::<(), texel_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color;
pub mod error;
pub mod format;
pub mod image;
pub mod rect;

pub use color::{luminance, Color, LUMA_B, LUMA_G, LUMA_R};
pub use error::{Error, Result};
pub use format::{expand_channel, reduce_channel, PixelCodec, PixelFormat};
pub use image::Image;
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use texel_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::error::{Error, Result};
    pub use crate::format::{PixelCodec, PixelFormat};
    pub use crate::image::Image;
    pub use crate::rect::Rect;
}
