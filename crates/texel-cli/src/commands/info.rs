//! Info command: dimensions, layout, and mean color of a raw file.

use crate::InfoArgs;
use anyhow::{bail, Context, Result};
use std::fs;
use tracing::{debug, trace};
use texel_core::{Color, Image};
use texel_ops::texture::{MemoryBackend, TextureBackend};

/// Mean of each channel, rounded.
fn mean_color(colors: &[Color]) -> Color {
    let n = colors.len().max(1) as u64;
    let mut sum = [0u64; 4];
    for c in colors {
        for (s, v) in sum.iter_mut().zip(c.to_array()) {
            *s += v as u64;
        }
    }
    Color::from_array(sum.map(|s| ((s + n / 2) / n) as u8))
}

/// Uploads to an in-memory backend and checks the bytes come back unchanged.
fn upload_check(image: &Image) -> Result<()> {
    let mut backend = MemoryBackend::new();
    let handle = backend.upload(image)?;
    debug!(id = handle.id, format = %handle.format, "uploaded");
    let back = backend.download(&handle)?;
    if back.data() != image.data() || back.format() != image.format() {
        bail!("texture round trip altered the image");
    }
    Ok(())
}

pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "info::run");
    let file_size = fs::metadata(&args.input)
        .with_context(|| format!("Failed to stat: {}", args.input.display()))?
        .len();
    let image = super::load_image(&args.input, &args.raw)?;
    let format = image.format();

    println!("{}", args.input.display());
    println!("  Resolution: {}x{}", image.width(), image.height());
    println!("  Format:     {} ({} bits/px)", format, format.bits_per_pixel());
    println!("  Pixels:     {}", image.pixel_count());
    println!("  Data size:  {}", super::format_size(image.data().len() as u64));
    println!("  File size:  {}", super::format_size(file_size));

    if format.is_compressed() {
        println!("  Compressed: pixel statistics unavailable");
    } else {
        let colors = image.to_colors()?;
        println!("  Mean color: {}", mean_color(&colors));
        if let Some(first) = colors.first().filter(|_| verbose > 0) {
            println!("  First px:   {first}");
        }
    }

    if args.upload_check {
        upload_check(&image)?;
        println!("  Upload:     ok");
    }

    Ok(())
}
