//! Simulate command: the full pipeline over a face photograph.

use crate::SimulateArgs;
use anyhow::{bail, Context, Result};
use kmsim_color::transfer;
use kmsim_core::{LabelImage, ReflectanceImage, ScalarField, BOUNDARY_MARKER};
use kmsim_ops::{
    limit_channel_overflow, parallel, resize, shading_map, skin_baseline, synthesize, tile,
    CosmeticReflectance, Thickness,
};
use tracing::debug;

pub fn run(args: SimulateArgs) -> Result<()> {
    let face = super::load_srgb(&args.face)?;
    let (width, height) = face.dimensions();
    let refl = transfer::decode_image(&face);

    let shading = shading_map(&refl, args.skin_luminance)
        .context("Failed to build the shading map")?;

    let mask = match &args.mask {
        Some(path) => Some(super::load_label(path)?),
        None => None,
    };
    let baseline = skin_baseline(
        &refl,
        &shading,
        mask.as_ref().map(|m| (m, args.mask_value)),
    )
    .context("Failed to estimate the skin baseline")?;
    debug!(
        r = baseline[0],
        g = baseline[1],
        b = baseline[2],
        "skin baseline"
    );

    if let Some(bare_path) = &args.bare_face {
        let mut bare = synthesize(&shading, baseline);
        limit_channel_overflow(&mut bare);
        super::save_srgb(bare_path, &transfer::encode_image(&bare))?;
    }

    let cosmetic = match (&args.color, &args.texture) {
        (Some(color), None) => {
            CosmeticReflectance::Uniform(transfer::decode_rgb(super::parse_rgb(color)?))
        }
        (None, Some(path)) => {
            let patch = resize(&super::load_srgb(path)?, args.texture_scale)
                .with_context(|| format!("Failed to scale texture {}", path.display()))?;
            let tiled = tile(&patch, width, height)
                .with_context(|| format!("Failed to tile texture {}", path.display()))?;
            // Cosmetic scans carry reflectance directly; no transfer curve.
            CosmeticReflectance::Textured(transfer::normalize_image(&tiled)?)
        }
        (None, None) | (Some(_), Some(_)) => {
            bail!("Exactly one of --color or --texture is required")
        }
    };

    let thickness = build_thickness(&args, mask.as_ref(), width, height)?;

    let skin = ReflectanceImage::filled(width, height, baseline);
    let mut out = parallel::composite(&skin, &shading, &thickness, &cosmetic)
        .context("Compositing failed")?;
    limit_channel_overflow(&mut out);

    super::save_srgb(&args.output, &transfer::encode_image(&out))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

/// Resolves the layer thickness from the arguments.
///
/// A `--thickness` field wins: boundary pixels (255) get zero, the rest are
/// scaled to `value / 255 * opacity`. Otherwise a mask confines a uniform
/// `--opacity` layer to the region, and with neither the layer is uniform
/// over the whole face.
fn build_thickness(
    args: &SimulateArgs,
    mask: Option<&LabelImage>,
    width: u32,
    height: u32,
) -> Result<Thickness> {
    if !args.opacity.is_finite() || args.opacity < 0.0 {
        bail!("--opacity must be non-negative, got {}", args.opacity);
    }

    if let Some(path) = &args.thickness {
        let grid = super::load_label(path)?;
        if grid.dimensions() != (width, height) {
            bail!(
                "Thickness field {} is {}x{}, face is {width}x{height}",
                path.display(),
                grid.dimensions().0,
                grid.dimensions().1,
            );
        }
        let mut field = ScalarField::new(width, height);
        for (x, y, v) in grid.pixels() {
            let t = if v[0] == BOUNDARY_MARKER {
                0.0
            } else {
                v[0] as f32 / 255.0 * args.opacity
            };
            field.set_pixel(x, y, [t]);
        }
        return Ok(Thickness::Field(field));
    }

    if let Some(mask) = mask {
        let mut field = ScalarField::new(width, height);
        for (x, y, v) in mask.pixels() {
            if v[0] == args.mask_value {
                field.set_pixel(x, y, [args.opacity]);
            }
        }
        return Ok(Thickness::Field(field));
    }

    Ok(Thickness::Uniform(args.opacity))
}
