//! Texture tiling for patterned cosmetics.
//!
//! A small scanned patch (a knit swatch, a lace sample) is repeated over the
//! face extent before being used as a textured cosmetic. The patch is first
//! [resized](resize) to the photograph's resolution, then [tiled](tile);
//! plain repetition leaves visible seams, so tiles alternate mirrored
//! orientations to keep every seam continuous.

use crate::{OpsError, OpsResult};
use kmsim_core::SrgbImage;

/// Rescales a patch by a uniform factor with bilinear sampling.
///
/// Texture scans rarely match the photograph's resolution; `scale` is the
/// face's pixels-per-inch divided by the scan's. A scale of 1.0 returns the
/// patch unchanged.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] for an empty patch or a scale
/// that is not finite and positive.
pub fn resize(patch: &SrgbImage, scale: f32) -> OpsResult<SrgbImage> {
    if patch.is_empty() {
        return Err(OpsError::invalid_parameter("texture patch has no pixels"));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(OpsError::invalid_parameter(format!(
            "scale must be positive, got {scale}"
        )));
    }

    let (pw, ph) = patch.dimensions();
    let width = ((pw as f32 * scale) as u32).max(1);
    let height = ((ph as f32 * scale) as u32).max(1);

    let mut out = SrgbImage::new(width, height);
    for y in 0..height {
        let sy = ((y as f32 + 0.5) / scale - 0.5).clamp(0.0, (ph - 1) as f32);
        let y0 = sy as u32;
        let y1 = (y0 + 1).min(ph - 1);
        let fy = sy - y0 as f32;
        for x in 0..width {
            let sx = ((x as f32 + 0.5) / scale - 0.5).clamp(0.0, (pw - 1) as f32);
            let x0 = sx as u32;
            let x1 = (x0 + 1).min(pw - 1);
            let fx = sx - x0 as f32;

            let p00 = patch.pixel(x0, y0);
            let p10 = patch.pixel(x1, y0);
            let p01 = patch.pixel(x0, y1);
            let p11 = patch.pixel(x1, y1);
            let mut px = [0u8; 3];
            for c in 0..3 {
                let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
                let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
                px[c] = (top * (1.0 - fy) + bottom * fy + 0.5) as u8;
            }
            out.set_pixel(x, y, px);
        }
    }
    Ok(out)
}

/// Tiles `patch` over a `width` x `height` extent.
///
/// Tiles alternate a horizontal flip along x and a vertical flip along y
/// (odd-indexed tiles are mirrored), so adjacent tiles share their border
/// pixels and the pattern reads as continuous.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] if the patch or the target extent
/// is empty.
pub fn tile(patch: &SrgbImage, width: u32, height: u32) -> OpsResult<SrgbImage> {
    if patch.is_empty() {
        return Err(OpsError::invalid_parameter("texture patch has no pixels"));
    }
    if width == 0 || height == 0 {
        return Err(OpsError::invalid_parameter(format!(
            "target extent {width}x{height} is empty"
        )));
    }

    let (pw, ph) = patch.dimensions();
    let mut out = SrgbImage::new(width, height);
    for y in 0..height {
        let ty = y / ph;
        let mut sy = y % ph;
        if ty % 2 == 1 {
            sy = ph - 1 - sy;
        }
        for x in 0..width {
            let tx = x / pw;
            let mut sx = x % pw;
            if tx % 2 == 1 {
                sx = pw - 1 - sx;
            }
            out.set_pixel(x, y, patch.pixel(sx, sy));
        }
    }
    Ok(out)
}
