//! Fill command: constant flood fill of a drawn boundary.

use crate::FillArgs;
use anyhow::{Context, Result};
use kmsim_region::{flood_fill, ConstantValue};

pub fn run(args: FillArgs) -> Result<()> {
    let mut grid = super::load_label(&args.boundary)?;
    let seed = super::parse_point(&args.seed)?;

    let filled = flood_fill(&mut grid, seed, &mut ConstantValue::new(args.value))
        .with_context(|| format!("Fill from seed {} failed", args.seed))?;
    println!("Filled {filled} pixels with value {}", args.value);

    super::save_label(&args.output, &grid)?;
    Ok(())
}
