//! Shading-map construction and skin baseline estimation.
//!
//! A face photograph mixes two things the compositor needs apart: the
//! intrinsic skin reflectance and the geometric shading of the face. The
//! split uses the skin luminance proxy: the *shading map* is the per-pixel
//! proxy divided by a reference skin luminance, and the *baseline* is the
//! average intrinsic reflectance that, multiplied by the shading map,
//! reproduces the photograph's overall color.

use crate::{OpsError, OpsResult};
use kmsim_core::{luminance_skin, LabelImage, ReflectanceImage, ShadingMap};
use tracing::debug;

/// Builds the shading map of a face image.
///
/// Each pixel is the skin luminance proxy of the reflectance divided by
/// `y_skin`, the reference luminance of flatly lit skin. Pixels brighter
/// than the reference exceed 1.0; the baseline estimate accounts for that
/// (see [`skin_baseline`]).
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] unless `y_skin` is finite and
/// positive.
pub fn shading_map(refl: &ReflectanceImage, y_skin: f32) -> OpsResult<ShadingMap> {
    if !y_skin.is_finite() || y_skin <= 0.0 {
        return Err(OpsError::invalid_parameter(format!(
            "reference skin luminance must be positive, got {y_skin}"
        )));
    }
    let (width, height) = refl.dimensions();
    let mut shading = ShadingMap::new(width, height);
    for (x, y, px) in refl.pixels() {
        shading.set_pixel(x, y, [luminance_skin(px) / y_skin]);
    }
    Ok(shading)
}

/// Estimates the intrinsic skin reflectance of a face.
///
/// Per channel, the estimate is `sum(refl_c) / sum(shading)` over the
/// selected pixels: all pixels, or only those where `mask` equals
/// `mask_value` when a mask is given (the typical mask is a region-grown
/// fill of the area of interest).
///
/// The raw averages are then limited so the synthesized face cannot
/// overflow the display range: for each channel, the brightest displayable
/// value is `max(shading) * avg_c` with the maximum taken over the *whole*
/// shading map (masked estimation still synthesizes the whole face), and
/// any channel whose displayable maximum exceeds 1.0 is scaled down by it.
///
/// # Errors
///
/// Dimension mismatches, or a selection whose shading sums to zero.
pub fn skin_baseline(
    refl: &ReflectanceImage,
    shading: &ShadingMap,
    mask: Option<(&LabelImage, u8)>,
) -> OpsResult<[f32; 3]> {
    refl.ensure_same_dimensions(shading)?;
    if let Some((mask_img, _)) = mask {
        refl.ensure_same_dimensions(mask_img)?;
    }

    let mut sum_refl = [0.0f64; 3];
    let mut sum_shading = 0.0f64;
    let mut selected = 0u64;
    for (x, y, px) in refl.pixels() {
        if let Some((mask_img, value)) = mask {
            if mask_img.pixel(x, y)[0] != value {
                continue;
            }
        }
        for c in 0..3 {
            sum_refl[c] += px[c] as f64;
        }
        sum_shading += shading.pixel(x, y)[0] as f64;
        selected += 1;
    }

    if sum_shading <= 0.0 {
        return Err(OpsError::empty_region(format!(
            "selection of {selected} pixels has zero total shading"
        )));
    }

    let mut avg = [0.0f32; 3];
    for c in 0..3 {
        avg[c] = (sum_refl[c] / sum_shading) as f32;
    }

    // The shading maximum is global: even a masked estimate drives a
    // whole-face synthesis.
    let max_shading = shading
        .pixels()
        .fold(0.0f32, |acc, (_, _, s)| acc.max(s[0]));
    for c in 0..3 {
        let display_max = (max_shading * avg[c]).max(1.0);
        avg[c] /= display_max;
    }

    debug!(
        selected,
        r = avg[0],
        g = avg[1],
        b = avg[2],
        "skin baseline estimated"
    );
    Ok(avg)
}

/// Synthesizes a bare face: the baseline reflectance under the shading map.
///
/// The result is what the camera would have seen if the skin were perfectly
/// uniform; comparing it to the photograph shows how much detail the
/// two-factor model discards.
pub fn synthesize(shading: &ShadingMap, baseline: [f32; 3]) -> ReflectanceImage {
    let (width, height) = shading.dimensions();
    let mut out = ReflectanceImage::new(width, height);
    for (x, y, s) in shading.pixels() {
        out.set_pixel(
            x,
            y,
            [baseline[0] * s[0], baseline[1] * s[0], baseline[2] * s[0]],
        );
    }
    out
}
