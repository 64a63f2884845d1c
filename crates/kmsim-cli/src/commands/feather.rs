//! Feather command: distance-feathered fill of a drawn boundary.

use crate::FeatherArgs;
use anyhow::{Context, Result};
use kmsim_region::{flood_fill, FeatheredValue};

pub fn run(args: FeatherArgs) -> Result<()> {
    let mut grid = super::load_label(&args.boundary)?;
    let line = super::load_label(&args.line)?;
    let seed = super::parse_point(&args.seed)?;

    let mut feather = FeatheredValue::from_line_image(&line)
        .with_context(|| format!("No feather line in {}", args.line.display()))?;
    let filled = flood_fill(&mut grid, seed, &mut feather)
        .with_context(|| format!("Fill from seed {} failed", args.seed))?;
    feather.renormalize(&mut grid);
    println!("Feathered {filled} pixels toward {} line points", feather.line_len());

    super::save_label(&args.output, &grid)?;
    Ok(())
}
