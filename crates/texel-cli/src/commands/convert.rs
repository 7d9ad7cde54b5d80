//! Convert command

use crate::ConvertArgs;
use tracing::{info, trace};
use anyhow::Result;
use texel_ops::convert::{convert, dither_to};

pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), to = %args.to, dither = args.dither, "convert::run");
    let mut image = super::load_image(&args.input, &args.raw)?;
    let from = image.format();
    info!(from = %from, to = %args.to, "Converting");

    if args.dither {
        dither_to(&mut image, args.to)?;
    } else {
        convert(&mut image, args.to)?;
    }

    super::save_image(&args.output, &image)?;

    if verbose > 0 {
        println!(
            "Converted {} -> {}{} ({} bytes)",
            from,
            args.to,
            if args.dither { " (dithered)" } else { "" },
            image.data().len()
        );
    }

    Ok(())
}
