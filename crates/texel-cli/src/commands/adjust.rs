//! Adjust command: tint, invert, grayscale, contrast, brightness, in that order.

use crate::AdjustArgs;
use tracing::{info, trace};
use anyhow::{bail, Result};
use texel_ops::adjust;

pub fn run(args: AdjustArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "adjust::run");
    let any = args.tint.is_some()
        || args.invert
        || args.grayscale
        || args.contrast.is_some()
        || args.brightness.is_some();
    if !any {
        bail!("nothing to do: pass at least one adjustment");
    }

    let mut image = super::load_image(&args.input, &args.raw)?;
    let mut applied = Vec::new();

    if let Some(color) = args.tint {
        adjust::tint(&mut image, color)?;
        applied.push(format!("tint {color}"));
    }
    if args.invert {
        adjust::invert(&mut image)?;
        applied.push("invert".to_string());
    }
    if args.grayscale {
        adjust::grayscale(&mut image)?;
        applied.push("grayscale".to_string());
    }
    if let Some(factor) = args.contrast {
        adjust::contrast(&mut image, factor)?;
        applied.push(format!("contrast {factor}"));
    }
    if let Some(delta) = args.brightness {
        adjust::brightness(&mut image, delta)?;
        applied.push(format!("brightness {delta}"));
    }

    info!(ops = %applied.join(", "), "Applied adjustments");
    super::save_image(&args.output, &image)?;

    if verbose > 0 {
        println!("Applied: {}", applied.join(", "));
    }

    Ok(())
}
