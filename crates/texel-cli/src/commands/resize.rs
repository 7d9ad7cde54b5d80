//! Resize command

use crate::ResizeArgs;
use tracing::trace;
use anyhow::Result;
use texel_ops::resize::resize_with;

pub fn run(args: ResizeArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), filter = ?args.filter, "resize::run");
    let mut image = super::load_image(&args.input, &args.raw)?;
    let (w, h) = image.dimensions();

    if verbose > 0 {
        println!("Resizing {}x{} -> {}x{} ({:?})", w, h, args.width, args.height, args.filter);
    }

    resize_with(&mut image, args.width, args.height, args.filter)?;
    super::save_image(&args.output, &image)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
