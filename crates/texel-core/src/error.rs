//! Error types for texel operations.
//!
//! Every image operation in the workspace reports failure through the single
//! [`Error`] enum defined here. Operations validate their inputs before they
//! touch the pixel buffer, so an `Err` always means the target image is
//! unchanged.
//!
//! # Categories
//!
//! - **Format errors**: [`UnsupportedFormat`](Error::UnsupportedFormat)
//! - **Shape errors**: [`DimensionMismatch`](Error::DimensionMismatch),
//!   [`InvalidDimensions`](Error::InvalidDimensions)
//! - **Parameter errors**: [`InvalidParameter`](Error::InvalidParameter)
//! - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
//!
//! # Usage
//!
//! ```rust
//! use texel_core::{Error, Result};
//!
//! fn check_factor(factor: f32) -> Result<()> {
//!     if !(0.0..=1.0).contains(&factor) {
//!         return Err(Error::invalid_parameter("factor", format!("{factor} not in [0, 1]")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_factor(0.5).is_ok());
//! assert!(check_factor(2.0).is_err());
//! ```

use crate::{PixelFormat, Rect};
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during image processing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The operation needs decodable pixels but the image is block-compressed.
    #[error("{op}: unsupported pixel format {format}")]
    UnsupportedFormat {
        /// Operation that rejected the format
        op: &'static str,
        /// Offending format
        format: PixelFormat,
    },

    /// Two images that must share dimensions do not.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First image width
        a_width: u32,
        /// First image height
        a_height: u32,
        /// Second image width
        b_width: u32,
        /// Second image height
        b_height: u32,
    },

    /// A factor, delta, bit depth, or size argument is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A rectangle lies wholly outside the image where a non-empty region is required.
    #[error("region {rect} lies outside image bounds {width}x{height}")]
    OutOfBounds {
        /// Requested region
        rect: Rect,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Width/height are zero, overflow, or disagree with the buffer length.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(op: &'static str, format: PixelFormat) -> Self {
        Self::UnsupportedFormat { op, format }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(rect: Rect, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            rect,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error was caused by a compressed format.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if a parameter was rejected.
    #[inline]
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}
