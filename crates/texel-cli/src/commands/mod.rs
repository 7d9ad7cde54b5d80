//! CLI command implementations

pub mod adjust;
pub mod convert;
pub mod crop;
pub mod draw;
pub mod flip;
pub mod generate;
pub mod info;
pub mod resize;

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use texel_core::{Image, PixelFormat};

use crate::RawArgs;

/// Parses `WIDTHxHEIGHT`.
pub fn parse_dims(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{s}`"))?;
    let w = w.trim().parse().map_err(|_| format!("bad width in `{s}`"))?;
    let h = h.trim().parse().map_err(|_| format!("bad height in `{s}`"))?;
    Ok((w, h))
}

/// Reads a headerless pixel file.
///
/// `header` bytes are skipped; anything after the pixel data is ignored.
pub fn load_raw(
    path: &Path,
    dims: (u32, u32),
    format: PixelFormat,
    header: usize,
) -> Result<Image> {
    let bytes = fs::read(path).with_context(|| format!("Failed to load: {}", path.display()))?;
    let (width, height) = dims;
    let Some(size) = format.data_size(width, height) else {
        bail!("{width}x{height} {format} is too large");
    };
    let Some(pixels) = header.checked_add(size).and_then(|end| bytes.get(header..end)) else {
        bail!(
            "{}: {} bytes, need {} for {width}x{height} {format} after a {header} byte header",
            path.display(),
            bytes.len(),
            size + header
        );
    };
    let image = Image::from_raw(width, height, format, pixels.to_vec())
        .with_context(|| format!("Invalid raw image: {}", path.display()))?;
    Ok(image)
}

/// Reads the input described by `raw`.
pub fn load_image(path: &Path, raw: &RawArgs) -> Result<Image> {
    load_raw(path, raw.dims, raw.format, raw.header)
}

/// Writes the image bytes verbatim.
pub fn save_image(path: &Path, image: &Image) -> Result<()> {
    fs::write(path, image.data()).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use texel_core::Color;

    #[test]
    fn test_parse_dims() {
        assert_eq!(parse_dims("640x480"), Ok((640, 480)));
        assert_eq!(parse_dims("2X3"), Ok((2, 3)));
        assert!(parse_dims("640").is_err());
        assert!(parse_dims("ax4").is_err());
    }

    #[test]
    fn test_raw_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.raw");
        let colors = [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE];
        let img = Image::from_colors(2, 2, &colors).unwrap();
        save_image(&path, &img).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 16);
        let back = load_raw(&path, (2, 2), PixelFormat::R8G8B8A8, 0).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_load_raw_header_and_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.raw");
        fs::write(&path, [0xAA, 0xBB, 1, 2, 3, 4, 9]).unwrap();
        let img = load_raw(&path, (2, 2), PixelFormat::Grayscale, 2).unwrap();
        assert_eq!(img.data(), &[1, 2, 3, 4]);
        assert!(load_raw(&path, (3, 3), PixelFormat::Grayscale, 0).is_err());
        let missing = dir.path().join("missing.raw");
        assert!(load_raw(&missing, (1, 1), PixelFormat::Grayscale, 0).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
