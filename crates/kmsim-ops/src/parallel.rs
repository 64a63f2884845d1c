//! Parallel compositing using Rayon.
//!
//! Row-parallel variant of [`composite`](crate::composite) with identical
//! semantics; worthwhile for full-resolution face images.

use crate::compositor::{composite_pixel, validate_inputs, CosmeticReflectance, Thickness};
use crate::OpsResult;
use kmsim_core::{ReflectanceImage, ShadingMap};
use rayon::prelude::*;
use tracing::debug;

/// Composites a cosmetic layer over skin, one row per work item.
///
/// Same inputs, outputs, and errors as [`composite`](crate::composite).
///
/// # Example
///
/// ```
/// use kmsim_core::{ReflectanceImage, ShadingMap};
/// use kmsim_ops::{parallel, CosmeticReflectance, Thickness};
///
/// let skin = ReflectanceImage::filled(64, 64, [0.6, 0.45, 0.4]);
/// let shading = ShadingMap::filled(64, 64, [1.0]);
/// let out = parallel::composite(
///     &skin,
///     &shading,
///     &Thickness::Uniform(1.0),
///     &CosmeticReflectance::Uniform([0.2, 0.1, 0.3]),
/// ).unwrap();
/// assert_eq!(out.dimensions(), (64, 64));
/// ```
pub fn composite(
    skin: &ReflectanceImage,
    shading: &ShadingMap,
    thickness: &Thickness,
    cosmetic: &CosmeticReflectance,
) -> OpsResult<ReflectanceImage> {
    validate_inputs(skin, shading, thickness, cosmetic)?;
    let (width, height) = skin.dimensions();
    debug!(width, height, "compositing cosmetic layer (parallel)");

    let row_len = width as usize * 3;
    let mut data = vec![0.0f32; row_len * height as usize];

    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            for x in 0..width {
                let a = match cosmetic {
                    CosmeticReflectance::Uniform(a) => *a,
                    CosmeticReflectance::Textured(tex) => tex.pixel(x, y),
                };
                let t = match thickness {
                    Thickness::Uniform(t) => *t,
                    Thickness::Field(field) => field.pixel(x, y)[0],
                };
                let px = composite_pixel(skin.pixel(x, y), a, t, shading.pixel(x, y)[0]);
                let i = x as usize * 3;
                row[i..i + 3].copy_from_slice(&px);
            }
        });

    // Dimensions and buffer length agree by construction.
    Ok(ReflectanceImage::from_data(width, height, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmsim_core::ScalarField;

    #[test]
    fn test_matches_sequential_composite() {
        // A gradient skin, varying shading, and a thickness field: the
        // parallel path must reproduce the sequential result exactly.
        let mut skin = ReflectanceImage::new(16, 9);
        let mut shading = ShadingMap::new(16, 9);
        let mut field = ScalarField::new(16, 9);
        for y in 0..9u32 {
            for x in 0..16u32 {
                let v = (x + y * 16) as f32 / 160.0;
                skin.set_pixel(x, y, [0.3 + v, 0.4, 0.5 - v]);
                shading.set_pixel(x, y, [0.5 + v]);
                field.set_pixel(x, y, [v * 4.0]);
            }
        }
        let thickness = Thickness::Field(field);
        let cosmetic = CosmeticReflectance::Uniform([0.2, 0.6, 0.1]);

        let seq = crate::composite(&skin, &shading, &thickness, &cosmetic).unwrap();
        let par = composite(&skin, &shading, &thickness, &cosmetic).unwrap();
        assert_eq!(seq.data(), par.data());
    }

    #[test]
    fn test_rejects_mismatched_inputs() {
        let skin = ReflectanceImage::filled(8, 8, [0.5, 0.5, 0.5]);
        let shading = ShadingMap::filled(8, 4, [1.0]);
        let result = composite(
            &skin,
            &shading,
            &Thickness::Uniform(1.0),
            &CosmeticReflectance::Uniform([0.5, 0.5, 0.5]),
        );
        assert!(result.is_err());
    }
}
