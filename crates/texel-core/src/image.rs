//! Owned pixel buffer with format metadata.
//!
//! [`Image`] holds level 0 of a picture in exactly the byte layout its
//! [`PixelFormat`] declares, with no row padding. The buffer length always
//! equals `format.data_size(width, height)`; every constructor and
//! [`Image::replace`] enforce it, so operations can trust it.
//!
//! # Ownership
//!
//! The buffer is a plain `Vec<u8>` owned by the image. `clone()` is a deep
//! copy and two images never share pixels. Operations in `texel-ops` take
//! `&mut Image` and either fully succeed or leave the image untouched.
//!
//! # Usage
//!
//! ```rust
//! use texel_core::{Color, Image, PixelFormat};
//!
//! let mut img = Image::filled(4, 2, Color::RED).unwrap();
//! assert_eq!(img.format(), PixelFormat::R8G8B8A8);
//! assert_eq!(img.data().len(), 4 * 2 * 4);
//!
//! img.set_pixel(1, 1, Color::BLUE).unwrap();
//! assert_eq!(img.pixel(1, 1), Some(Color::BLUE));
//! ```

use tracing::trace;

use crate::{Color, Error, PixelCodec, PixelFormat, Rect, Result};

/// Owned image: pixel bytes plus width, height, mip count, and format.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
    mipmaps: u32,
    format: PixelFormat,
}

/// Checks dimensions and returns the required buffer size.
fn checked_size(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    format
        .data_size(width, height)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}

impl Image {
    /// Creates a zero-filled image.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if either dimension is zero or the
    /// buffer size overflows.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let size = checked_size(width, height, format)?;
        Ok(Self {
            data: vec![0; size],
            width,
            height,
            mipmaps: 1,
            format,
        })
    }

    /// Wraps existing bytes laid out in `format`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if `data.len()` differs from the size
    /// `format` requires.
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = checked_size(width, height, format)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("{format} needs {expected} bytes, got {}", data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            mipmaps: 1,
            format,
        })
    }

    /// Builds an `R8G8B8A8` image from row-major colors.
    pub fn from_colors(width: u32, height: u32, colors: &[Color]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if colors.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {expected} colors, got {}", colors.len()),
            ));
        }
        let data = colors.iter().flat_map(|c| c.to_array()).collect();
        Self::from_raw(width, height, PixelFormat::R8G8B8A8, data)
    }

    /// Encodes row-major colors into `format`.
    pub fn from_colors_as(
        width: u32,
        height: u32,
        colors: &[Color],
        format: PixelFormat,
    ) -> Result<Self> {
        let codec = format.codec()?;
        let expected = width as usize * height as usize;
        if colors.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {expected} colors, got {}", colors.len()),
            ));
        }
        Self::from_raw(width, height, format, codec.encode_all(colors))
    }

    /// Creates an `R8G8B8A8` image with every pixel set to `color`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        checked_size(width, height, PixelFormat::R8G8B8A8)?;
        let data = std::iter::repeat_n(color.to_array(), width as usize * height as usize)
            .flatten()
            .collect();
        Self::from_raw(width, height, PixelFormat::R8G8B8A8, data)
    }

    /// Records how many mip levels the producer generated.
    ///
    /// Only level 0 is stored; the count is carried as metadata for the
    /// texture backend. Zero is treated as 1.
    pub fn with_mipmaps(mut self, mipmaps: u32) -> Self {
        self.mipmaps = mipmaps.max(1);
        self
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of mip levels declared (at least 1).
    #[inline]
    pub fn mipmaps(&self) -> u32 {
        self.mipmaps
    }

    /// Pixel format of the buffer.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Rectangle covering the whole image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Raw pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes. The length cannot change through this slice.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the image, returning its bytes.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Codec for this image's format.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] tagged with `op` for compressed images.
    pub fn codec_for(&self, op: &'static str) -> Result<PixelCodec> {
        self.format
            .codec()
            .map_err(|_| Error::unsupported_format(op, self.format))
    }

    /// Swaps in a new buffer, dimensions, and format in one step.
    ///
    /// This is the only way to change an image's shape. Mip count resets
    /// to 1 when the dimensions change.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if `data` does not match; the image is
    /// left untouched.
    pub fn replace(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<()> {
        let next = Self::from_raw(width, height, format, data)?;
        trace!(
            from = %format_args!("{}x{} {}", self.width, self.height, self.format),
            to = %format_args!("{width}x{height} {format}"),
            "image buffer replaced"
        );
        let mipmaps = if next.dimensions() == self.dimensions() {
            self.mipmaps
        } else {
            1
        };
        *self = next;
        self.mipmaps = mipmaps;
        Ok(())
    }

    /// Decodes every pixel to [`Color`], row-major.
    pub fn to_colors(&self) -> Result<Vec<Color>> {
        Ok(self.codec_for("to_colors")?.decode_all(&self.data))
    }

    /// Byte offset of pixel (x, y) for a given stride.
    #[inline]
    fn offset(&self, x: u32, y: u32, bpp: usize) -> usize {
        (y as usize * self.width as usize + x as usize) * bpp
    }

    /// Decodes the pixel at (x, y); `None` if out of bounds or compressed.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let codec = self.format.codec().ok()?;
        let at = self.offset(x, y, codec.bytes_per_pixel);
        Some((codec.decode)(&self.data[at..at + codec.bytes_per_pixel]))
    }

    /// Encodes `color` at (x, y).
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] for compressed images,
    /// [`Error::OutOfBounds`] if the coordinate is outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> Result<()> {
        let codec = self.codec_for("set_pixel")?;
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(
                Rect::new(x.min(i32::MAX as u32) as i32, y.min(i32::MAX as u32) as i32, 1, 1),
                self.width,
                self.height,
            ));
        }
        let at = self.offset(x, y, codec.bytes_per_pixel);
        (codec.encode)(color, &mut self.data[at..at + codec.bytes_per_pixel]);
        Ok(())
    }

    /// Raw bytes of row `y`; `None` for compressed images or `y` out of range.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let bpp = self.format.bytes_per_pixel()?;
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * bpp;
        let start = y as usize * stride;
        Some(&self.data[start..start + stride])
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("mipmaps", &self.mipmaps)
            .field("format", &self.format)
            .field("bytes", &self.data.len())
            .finish()
    }
}
