//! Gen command: procedural images written as rgba8.

use crate::{GenArgs, GenKind};
use tracing::{info, trace};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use texel_ops::generate;

pub fn run(args: GenArgs, verbose: u8) -> Result<()> {
    trace!(kind = ?args.kind, seed = args.seed, "generate::run");
    let (w, h) = (args.width, args.height);
    let (a, b) = (args.color_a, args.color_b);
    let mut rng = StdRng::seed_from_u64(args.seed);
    info!(width = w, height = h, "Generating {:?}", args.kind);

    let image = match args.kind {
        GenKind::Color => generate::solid_color(w, h, a)?,
        GenKind::GradientV => generate::gradient_vertical(w, h, a, b)?,
        GenKind::GradientH => generate::gradient_horizontal(w, h, a, b)?,
        GenKind::Radial => generate::gradient_radial(w, h, args.density, a, b)?,
        GenKind::Checked => generate::checkerboard(w, h, args.checks, args.checks, a, b)?,
        GenKind::WhiteNoise => generate::white_noise(w, h, args.factor, &mut rng)?,
        GenKind::Perlin if args.octaves > 1 => {
            generate::perlin_fbm(w, h, args.scale, args.octaves, 2.0, 0.5, &mut rng)?
        }
        GenKind::Perlin => generate::perlin_noise(w, h, args.scale, &mut rng)?,
        GenKind::Cellular => generate::cellular(w, h, args.tile, &mut rng)?,
    };

    super::save_image(&args.output, &image)?;

    if verbose > 0 {
        println!("Generated {:?} {}x{} rgba8 -> {}", args.kind, w, h, args.output.display());
    }

    Ok(())
}
