//! Deltae command: CIELAB distance between two sRGB colors.

use crate::DeltaeArgs;
use anyhow::Result;
use kmsim_color::{delta_e_reflectance, transfer};

pub fn run(args: DeltaeArgs) -> Result<()> {
    let a = transfer::decode_rgb(super::parse_rgb(&args.a)?);
    let b = transfer::decode_rgb(super::parse_rgb(&args.b)?);
    println!("{:.4}", delta_e_reflectance(a, b));
    Ok(())
}
