//! Patch command: cosmetic swatch calibration.

use crate::PatchArgs;
use anyhow::{Context, Result};
use kmsim_color::{darkest_color, transfer};
use std::fmt::Write as _;

pub fn run(args: PatchArgs) -> Result<()> {
    let mut report = String::new();

    for path in &args.input {
        let swatch = super::load_srgb(path)?;
        let refl = darkest_color(&swatch)
            .with_context(|| format!("No usable pixels in {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        println!(
            "{name}  R {:.6}  G {:.6}  B {:.6}  (sRGB {},{},{})",
            refl[0],
            refl[1],
            refl[2],
            transfer::encode(refl[0]),
            transfer::encode(refl[1]),
            transfer::encode(refl[2]),
        );
        writeln!(
            report,
            "{name}  R {}  G {}  B {}",
            refl[0], refl[1], refl[2]
        )?;
    }

    if let Some(report_path) = &args.report {
        std::fs::write(report_path, report)
            .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    }
    Ok(())
}
