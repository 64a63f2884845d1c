//! Extract-line command: red annotation to line mask.

use crate::ExtractLineArgs;
use anyhow::Result;
use kmsim_region::line_from_red;

pub fn run(args: ExtractLineArgs) -> Result<()> {
    let photo = super::load_srgb(&args.input)?;
    let line = line_from_red(&photo);
    super::save_label(&args.output, &line)?;
    Ok(())
}
