//! Seam to a texture backend.
//!
//! A [`TextureBackend`] takes a finished [`Image`] and stores it somewhere
//! this crate cannot see (typically GPU memory), handing back a
//! [`TextureHandle`]. The only contract is the byte layout: an image's
//! buffer is exactly `format.data_size(width, height)` bytes with no row
//! padding, so a backend can copy it verbatim.
//!
//! [`MemoryBackend`] keeps textures in a `HashMap` and enforces that
//! contract; it backs tests and the CLI's upload check.
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, Image};
//! use texel_ops::texture::{MemoryBackend, TextureBackend};
//!
//! let img = Image::filled(4, 4, Color::RED)?;
//! let mut backend = MemoryBackend::new();
//! let tex = backend.upload(&img)?;
//! assert_eq!(backend.download(&tex)?, img);
//! # Ok::<(), texel_core::Error>(())
//! ```

use std::collections::HashMap;

use texel_core::{Error, Image, PixelFormat, Result};
use tracing::{debug, trace};

/// Backend-issued texture reference with the metadata it was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    /// Backend id (never 0).
    pub id: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Mip level count declared by the source image.
    pub mipmaps: u32,
    /// Pixel format of the stored bytes.
    pub format: PixelFormat,
}

/// Consumer of finished images.
pub trait TextureBackend {
    /// Stores a copy of `image` and returns its handle.
    fn upload(&mut self, image: &Image) -> Result<TextureHandle>;

    /// Replaces the texture's pixels; `pixels` must be exactly the size
    /// of the texture in its format.
    fn update(&mut self, handle: &TextureHandle, pixels: &[u8]) -> Result<()>;

    /// Reads the texture back as an image.
    fn download(&self, handle: &TextureHandle) -> Result<Image>;
}

/// In-process backend that stores byte-exact copies.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    textures: HashMap<u32, Image>,
    next_id: u32,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// `true` if no texture is stored.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Drops a texture; returns `false` if the handle was unknown.
    pub fn unload(&mut self, handle: &TextureHandle) -> bool {
        self.textures.remove(&handle.id).is_some()
    }

    fn get(&self, handle: &TextureHandle) -> Result<&Image> {
        self.textures
            .get(&handle.id)
            .ok_or_else(|| {
                Error::invalid_parameter("handle", format!("unknown texture id {}", handle.id))
            })
    }
}

impl TextureBackend for MemoryBackend {
    fn upload(&mut self, image: &Image) -> Result<TextureHandle> {
        let expected = image
            .format()
            .data_size(image.width(), image.height())
            .unwrap_or(usize::MAX);
        if image.data().len() != expected {
            return Err(Error::invalid_dimensions(
                image.width(),
                image.height(),
                format!("buffer is {} bytes, layout needs {expected}", image.data().len()),
            ));
        }

        let id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| Error::invalid_parameter("handle", "texture ids exhausted"))?;
        self.next_id = id;
        let handle = TextureHandle {
            id,
            width: image.width(),
            height: image.height(),
            mipmaps: image.mipmaps(),
            format: image.format(),
        };
        debug!(
            id = handle.id,
            width = handle.width,
            height = handle.height,
            format = %handle.format,
            "texture upload"
        );
        self.textures.insert(handle.id, image.clone());
        Ok(handle)
    }

    fn update(&mut self, handle: &TextureHandle, pixels: &[u8]) -> Result<()> {
        let stored = self.get(handle)?;
        let (width, height) = stored.dimensions();
        let format = stored.format();
        let updated =
            Image::from_raw(width, height, format, pixels.to_vec())?.with_mipmaps(stored.mipmaps());
        trace!(id = handle.id, bytes = pixels.len(), "texture update");
        self.textures.insert(handle.id, updated);
        Ok(())
    }

    fn download(&self, handle: &TextureHandle) -> Result<Image> {
        trace!(id = handle.id, "texture download");
        self.get(handle).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texel_core::Color;

    #[test]
    fn test_upload_download_verbatim() {
        let img = Image::from_colors_as(3, 2, &[Color::RED; 6], PixelFormat::R5G6B5)
            .unwrap()
            .with_mipmaps(2);
        let mut backend = MemoryBackend::new();
        let tex = backend.upload(&img).unwrap();
        assert_eq!(
            (tex.width, tex.height, tex.mipmaps, tex.format),
            (3, 2, 2, PixelFormat::R5G6B5)
        );
        let back = backend.download(&tex).unwrap();
        assert_eq!(back.data(), img.data());
        assert_eq!(back, img);
    }

    #[test]
    fn test_compressed_upload() {
        let img = Image::from_raw(8, 8, PixelFormat::Dxt5Rgba, vec![7; 64]).unwrap();
        let mut backend = MemoryBackend::new();
        let tex = backend.upload(&img).unwrap();
        assert_eq!(backend.download(&tex).unwrap(), img);
    }

    #[test]
    fn test_update() {
        let img = Image::new(2, 2, PixelFormat::Grayscale).unwrap();
        let mut backend = MemoryBackend::new();
        let tex = backend.upload(&img).unwrap();
        backend.update(&tex, &[1, 2, 3, 4]).unwrap();
        assert_eq!(backend.download(&tex).unwrap().data(), &[1, 2, 3, 4]);
        assert!(backend.update(&tex, &[1, 2, 3]).is_err());
    }

    #[test]
    fn test_unknown_handle() {
        let mut backend = MemoryBackend::new();
        let tex = backend.upload(&Image::filled(1, 1, Color::WHITE).unwrap()).unwrap();
        assert_ne!(tex.id, 0);
        assert!(backend.unload(&tex));
        assert!(backend.is_empty());
        assert!(backend.download(&tex).unwrap_err().is_parameter_error());
        assert!(!backend.unload(&tex));
    }

    #[test]
    fn test_ids_exhausted() {
        let mut backend = MemoryBackend {
            next_id: u32::MAX - 1,
            ..MemoryBackend::default()
        };
        let img = Image::filled(1, 1, Color::WHITE).unwrap();
        assert_eq!(backend.upload(&img).unwrap().id, u32::MAX);
        assert!(backend.upload(&img).unwrap_err().is_parameter_error());
        assert_eq!(backend.len(), 1);
    }
}
