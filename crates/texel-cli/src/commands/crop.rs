//! Crop command

use crate::CropArgs;
use tracing::trace;
use anyhow::Result;
use texel_core::Rect;
use texel_ops::transform::crop;

pub fn run(args: CropArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), x = args.x, y = args.y, "crop::run");
    let mut image = super::load_image(&args.input, &args.raw)?;
    let (w, h) = image.dimensions();

    if verbose > 0 {
        println!("Cropping {}x{} @ ({},{}) from {}x{}", args.cw, args.ch, args.x, args.y, w, h);
    }

    crop(&mut image, Rect::new(args.x, args.y, args.cw, args.ch))?;
    super::save_image(&args.output, &image)?;

    if verbose > 0 {
        println!("Done: {}x{}", image.width(), image.height());
    }

    Ok(())
}
