//! texel - pixel operations on raw image dumps
//!
//! Reads and writes headerless pixel files laid out exactly as a
//! [`PixelFormat`] declares, so results can be fed straight to a texture
//! upload or inspected with any raw viewer.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use texel_core::{Color, PixelFormat, Rect};
use texel_ops::Filter;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "texel")]
#[command(author, version, about = "CPU-side image pixel operations")]
#[command(long_about = "
Generate, convert, and transform raw pixel buffers.

Raw files carry no header: pass their size with --dims and their layout
with --format (gray, gray-alpha, r5g6b5, rgb8, r5g5b5a1, r4g4b4a4, rgba8, ...).

Examples:
  texel gen checked -W 256 -H 256 -o board.rgba --checks 8
  texel gen perlin -W 512 -H 512 -o clouds.rgba --scale 0.02 --octaves 4 --seed 7
  texel info board.rgba --dims 256x256
  texel convert board.rgba board.565 --dims 256x256 --to r5g6b5 --dither
  texel resize board.rgba -o small.rgba --dims 256x256 --width 64 --height 64
  texel adjust board.rgba -o dark.rgba --dims 256x256 --brightness -40 --contrast 20
  texel draw bg.rgba logo.rgba -o out.rgba --dims 512x512 --src-dims 64x64 --dst-rect 10,10,128,128
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace; RUST_LOG overrides)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a procedural image
    #[command(visible_alias = "g")]
    Gen(GenArgs),

    /// Display raw image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert pixel format
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Resize/scale image
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Crop image
    Crop(CropArgs),

    /// Flip image horizontally and/or vertically
    Flip(FlipArgs),

    /// Apply color adjustments
    Adjust(AdjustArgs),

    /// Draw one image onto another
    Draw(DrawArgs),
}

/// Layout of a headerless input file.
#[derive(Args, Debug, Clone)]
struct RawArgs {
    /// Input size as WIDTHxHEIGHT
    #[arg(long, value_parser = commands::parse_dims)]
    dims: (u32, u32),

    /// Input pixel format
    #[arg(short, long, default_value = "rgba8")]
    format: PixelFormat,

    /// Bytes to skip before the pixel data
    #[arg(long, default_value_t = 0)]
    header: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum GenKind {
    /// Solid color-a
    Color,
    /// color-a (top) to color-b (bottom)
    GradientV,
    /// color-a (left) to color-b (right)
    GradientH,
    /// color-a (center) to color-b (edge)
    Radial,
    /// Checkerboard of color-a and color-b
    Checked,
    /// White pixels with probability --factor
    WhiteNoise,
    /// Perlin noise (fbm when --octaves > 1)
    Perlin,
    /// Cellular (Worley) noise
    Cellular,
}

#[derive(Args)]
struct GenArgs {
    /// Generator
    kind: GenKind,

    /// Output width
    #[arg(short = 'W', long)]
    width: u32,

    /// Output height
    #[arg(short = 'H', long)]
    height: u32,

    /// Output raw file (rgba8)
    #[arg(short, long)]
    output: PathBuf,

    /// First color (#RRGGBB[AA] or r,g,b[,a])
    #[arg(long, default_value = "#000000")]
    color_a: Color,

    /// Second color
    #[arg(long, default_value = "#ffffff")]
    color_b: Color,

    /// Checker cells per axis
    #[arg(long, default_value_t = 8)]
    checks: u32,

    /// Radial gradient density in [0, 1]
    #[arg(long, default_value_t = 0.0)]
    density: f32,

    /// White noise probability in [0, 1]
    #[arg(long, default_value_t = 0.5)]
    factor: f32,

    /// Perlin sample scale
    #[arg(long, default_value_t = 0.05)]
    scale: f32,

    /// Perlin octaves
    #[arg(long, default_value_t = 1)]
    octaves: u32,

    /// Cellular tile size in pixels
    #[arg(long, default_value_t = 32)]
    tile: u32,

    /// RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Args)]
struct InfoArgs {
    /// Input raw file
    input: PathBuf,

    #[command(flatten)]
    raw: RawArgs,

    /// Round-trip the image through an in-memory texture backend
    #[arg(long)]
    upload_check: bool,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input raw file
    input: PathBuf,

    /// Output raw file
    output: PathBuf,

    #[command(flatten)]
    raw: RawArgs,

    /// Target pixel format
    #[arg(long)]
    to: PixelFormat,

    /// Floyd-Steinberg dither to the target depth first
    #[arg(long)]
    dither: bool,
}

#[derive(Args)]
struct ResizeArgs {
    /// Input raw file
    input: PathBuf,

    /// Output raw file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    raw: RawArgs,

    /// Target width
    #[arg(long)]
    width: u32,

    /// Target height
    #[arg(long)]
    height: u32,

    /// Filter: nearest, bilinear
    #[arg(long, default_value = "bilinear")]
    filter: Filter,
}

#[derive(Args)]
struct CropArgs {
    /// Input raw file
    input: PathBuf,

    /// Output raw file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    raw: RawArgs,

    /// X offset
    #[arg(short, allow_hyphen_values = true)]
    x: i32,

    /// Y offset
    #[arg(short, allow_hyphen_values = true)]
    y: i32,

    /// Crop width
    #[arg(long)]
    cw: u32,

    /// Crop height
    #[arg(long)]
    ch: u32,
}

#[derive(Args)]
struct FlipArgs {
    /// Input raw file
    input: PathBuf,

    /// Output raw file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    raw: RawArgs,

    /// Mirror left-right
    #[arg(long)]
    horizontal: bool,

    /// Mirror top-bottom
    #[arg(long)]
    vertical: bool,
}

#[derive(Args)]
struct AdjustArgs {
    /// Input raw file
    input: PathBuf,

    /// Output raw file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    raw: RawArgs,

    /// Multiply by a color
    #[arg(long)]
    tint: Option<Color>,

    /// Invert RGB
    #[arg(long)]
    invert: bool,

    /// Replace RGB with luminance
    #[arg(long)]
    grayscale: bool,

    /// Contrast in [-100, 100]
    #[arg(long, allow_hyphen_values = true)]
    contrast: Option<f32>,

    /// Brightness delta in [-255, 255]
    #[arg(long, allow_hyphen_values = true)]
    brightness: Option<i32>,
}

#[derive(Args)]
struct DrawArgs {
    /// Destination raw file
    dst: PathBuf,

    /// Source raw file
    src: PathBuf,

    /// Output raw file (destination format)
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    raw: RawArgs,

    /// Source size as WIDTHxHEIGHT
    #[arg(long, value_parser = commands::parse_dims)]
    src_dims: (u32, u32),

    /// Source pixel format
    #[arg(long, default_value = "rgba8")]
    src_format: PixelFormat,

    /// Bytes to skip before the source pixel data
    #[arg(long, default_value_t = 0)]
    src_header: usize,

    /// Source rectangle x,y,w,h (default: whole source)
    #[arg(long, allow_hyphen_values = true)]
    src_rect: Option<Rect>,

    /// Destination rectangle x,y,w,h
    #[arg(long, allow_hyphen_values = true)]
    dst_rect: Rect,
}

/// Installs the stderr subscriber; RUST_LOG wins over -v.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Gen(args) => commands::generate::run(args, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Resize(args) => commands::resize::run(args, cli.verbose),
        Commands::Crop(args) => commands::crop::run(args, cli.verbose),
        Commands::Flip(args) => commands::flip::run(args, cli.verbose),
        Commands::Adjust(args) => commands::adjust::run(args, cli.verbose),
        Commands::Draw(args) => commands::draw::run(args, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gen() {
        let cli = Cli::parse_from([
            "texel", "gen", "checked", "-W", "16", "-H", "8", "-o", "out.rgba", "--color-a",
            "255,0,0",
        ]);
        let Commands::Gen(args) = cli.command else {
            panic!("expected gen");
        };
        assert_eq!(args.kind, GenKind::Checked);
        assert_eq!((args.width, args.height), (16, 8));
        assert_eq!(args.color_a, Color::RED);
    }

    #[test]
    fn test_parse_crop_negative() {
        let cli = Cli::parse_from([
            "texel", "-vv", "crop", "in.raw", "-o", "out.raw", "--dims", "4x4", "-f", "gray", "-x",
            "-2", "-y", "1", "--cw", "3", "--ch", "3",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Crop(args) = cli.command else {
            panic!("expected crop");
        };
        assert_eq!((args.x, args.y), (-2, 1));
        assert_eq!(args.raw.format, PixelFormat::Grayscale);
        assert_eq!(args.raw.dims, (4, 4));
    }
}
