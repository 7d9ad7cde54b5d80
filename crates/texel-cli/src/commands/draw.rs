//! Draw command: composite a source rectangle over a destination rectangle.

use crate::DrawArgs;
use tracing::{info, trace};
use anyhow::Result;
use texel_ops::composite::draw;

pub fn run(args: DrawArgs, verbose: u8) -> Result<()> {
    trace!(dst = %args.dst.display(), src = %args.src.display(), "draw::run");
    let mut dst = super::load_image(&args.dst, &args.raw)?;
    let src = super::load_raw(&args.src, args.src_dims, args.src_format, args.src_header)?;
    let src_rect = args.src_rect.unwrap_or_else(|| src.bounds());

    if verbose > 0 {
        println!(
            "Drawing {} of {} onto {} of {}",
            src_rect,
            args.src.display(),
            args.dst_rect,
            args.dst.display()
        );
    }

    info!(src_rect = %src_rect, dst_rect = %args.dst_rect, "Drawing");
    draw(&mut dst, &src, src_rect, args.dst_rect)?;
    super::save_image(&args.output, &dst)?;

    Ok(())
}
