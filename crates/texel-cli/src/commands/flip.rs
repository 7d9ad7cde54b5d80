//! Flip command

use crate::FlipArgs;
use tracing::trace;
use anyhow::{bail, Result};
use texel_ops::transform::{flip_horizontal, flip_vertical};

pub fn run(args: FlipArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), h = args.horizontal, v = args.vertical, "flip::run");
    if !args.horizontal && !args.vertical {
        bail!("nothing to do: pass --horizontal and/or --vertical");
    }

    let mut image = super::load_image(&args.input, &args.raw)?;

    if args.horizontal {
        flip_horizontal(&mut image)?;
    }
    if args.vertical {
        flip_vertical(&mut image)?;
    }

    super::save_image(&args.output, &image)?;

    if verbose > 0 {
        println!("Flipped h={} v={} -> {}", args.horizontal, args.vertical, args.output.display());
    }

    Ok(())
}
