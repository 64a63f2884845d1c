//! kmsim - cosmetic color simulation CLI
//!
//! Drives the simulation pipeline end to end: cosmetic swatch calibration,
//! boundary-line extraction, region growing, feathering, and Kubelka-Munk
//! compositing over a face photograph.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "kmsim")]
#[command(author, version, about = "Cosmetic color simulation over face photographs")]
#[command(long_about = "
Simulates how a cosmetic product would look applied to a face photograph,
using a two-flux Kubelka-Munk layer model over an estimated skin baseline.

Examples:
  kmsim patch lipstick1.jpg lipstick2.jpg       # Calibrate swatches
  kmsim patch swatches/*.jpg --report rgb.txt
  kmsim extract-line annotated.png -o line.png  # Red annotation -> line mask
  kmsim fill boundary.png --seed 144,269 --value 200 -o mask.png
  kmsim feather boundary.png --line upper.png --seed 144,269 -o field.png
  kmsim simulate face.jpg --color 120,40,60 --mask mask.png --mask-value 200 \\
      --opacity 1.5 -o out.png --bare-face bare.png
  kmsim simulate face.jpg --texture knit.png --texture-scale 0.62 \\
      --thickness field.png -o out.png
  kmsim deltae 120,40,60 118,45,58              # Diagnostic color distance
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract cosmetic reflectance from swatch images
    #[command(visible_alias = "p")]
    Patch(PatchArgs),

    /// Extract a line mask from a red-annotated photograph
    #[command(name = "extract-line", visible_alias = "xl")]
    ExtractLine(ExtractLineArgs),

    /// Flood fill a drawn boundary with a constant value
    Fill(FillArgs),

    /// Flood fill a drawn boundary with a feathered thickness field
    Feather(FeatherArgs),

    /// Simulate a cosmetic on a face photograph
    #[command(visible_alias = "sim")]
    Simulate(SimulateArgs),

    /// Color distance (CIELAB delta E) between two sRGB triples
    Deltae(DeltaeArgs),
}

#[derive(Args)]
struct PatchArgs {
    /// Swatch image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Write a text report (one line per swatch) to this file
    #[arg(short, long)]
    report: Option<PathBuf>,
}

#[derive(Args)]
struct ExtractLineArgs {
    /// Photograph with the boundary drawn in pure red (255,0,0)
    input: PathBuf,

    /// Output line mask
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct FillArgs {
    /// Single-channel boundary image (line pixels = 255)
    boundary: PathBuf,

    /// Seed point inside the boundary, as X,Y
    #[arg(short, long)]
    seed: String,

    /// Fill value (1-254)
    #[arg(long, default_value = "200")]
    value: u8,

    /// Output mask image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct FeatherArgs {
    /// Single-channel boundary image enclosing the region
    boundary: PathBuf,

    /// Single-channel feather-line image (the edge to thin toward)
    #[arg(short, long)]
    line: PathBuf,

    /// Seed point inside the boundary, as X,Y
    #[arg(short, long)]
    seed: String,

    /// Output thickness-field image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct SimulateArgs {
    /// Face photograph
    face: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Cosmetic color as sRGB bytes R,G,B (from `kmsim patch`)
    #[arg(short, long, conflicts_with = "texture")]
    color: Option<String>,

    /// Textured cosmetic patch image, tiled over the face
    #[arg(short, long)]
    texture: Option<PathBuf>,

    /// Scale factor applied to the texture patch before tiling (face
    /// pixels-per-inch divided by the patch scan's)
    #[arg(long, default_value = "1.0", requires = "texture")]
    texture_scale: f32,

    /// Region mask from `kmsim fill`; restricts baseline estimation and
    /// defines where the cosmetic is applied
    #[arg(short, long)]
    mask: Option<PathBuf>,

    /// Mask value selecting the region
    #[arg(long, default_value = "200", requires = "mask")]
    mask_value: u8,

    /// Uniform layer thickness
    #[arg(long, default_value = "1.0")]
    opacity: f32,

    /// Per-pixel thickness field from `kmsim feather`, scaled by --opacity
    #[arg(long)]
    thickness: Option<PathBuf>,

    /// Reference skin luminance for the shading map
    #[arg(long, default_value = "0.4")]
    skin_luminance: f32,

    /// Also write the synthesized bare face (baseline x shading)
    #[arg(long)]
    bare_face: Option<PathBuf>,
}

#[derive(Args)]
struct DeltaeArgs {
    /// First color as sRGB bytes R,G,B
    a: String,

    /// Second color as sRGB bytes R,G,B
    b: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Patch(args) => commands::patch::run(args),
        Commands::ExtractLine(args) => commands::line::run(args),
        Commands::Fill(args) => commands::fill::run(args),
        Commands::Feather(args) => commands::feather::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Deltae(args) => commands::deltae::run(args),
    }
}
