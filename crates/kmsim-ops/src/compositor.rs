//! Kubelka-Munk layer compositing.
//!
//! The two-flux Kubelka-Munk model predicts the reflectance of a thin
//! scattering cosmetic layer over skin. Per channel, with `S` the skin
//! reflectance, `a` the cosmetic's infinite-thickness reflectance, and `T`
//! the layer thickness:
//!
//! ```text
//! F = exp(-T * (1 - a^2) / a)
//! D = S - a
//! G = D*a + a^2 - 1
//! R = (D*F - G*a) / (D*F*a - G)
//! ```
//!
//! The observed pixel is `R * shading`, re-applying the facial geometry the
//! baseline estimate factored out.
//!
//! Three identities pin the model down: `T = 0` gives `R = S` (a transparent
//! layer is invisible), `S = a` gives `R = S` for any `T` (cosmetic matching
//! the skin cannot be seen), and `T -> inf` gives `R -> a` (a thick layer
//! hides the skin completely).

use crate::{OpsError, OpsResult};
use kmsim_core::{ReflectanceImage, ScalarField, ShadingMap};
use tracing::debug;

/// Lower clamp for reflectances entering the model. Zero would make the
/// exponent in `F` divide by zero.
pub const MIN_COSMETIC_REFLECTANCE: f32 = 0.01;

/// Upper clamp for reflectances entering the model. Exactly 1.0 makes the
/// exponent vanish and `F` degenerate to 1 for every thickness.
pub const MAX_COSMETIC_REFLECTANCE: f32 = 0.99;

/// Clamps a reflectance into the open interval the model is defined on.
#[inline]
pub fn clamp_into_open_unit(v: f32) -> f32 {
    v.clamp(MIN_COSMETIC_REFLECTANCE, MAX_COSMETIC_REFLECTANCE)
}

/// The cosmetic's infinite-thickness reflectance, per pixel or uniform.
#[derive(Debug, Clone)]
pub enum CosmeticReflectance {
    /// One reflectance triple for the whole layer (a plain product).
    Uniform([f32; 3]),
    /// Per-pixel reflectance (a textured product such as a knit pattern).
    Textured(ReflectanceImage),
}

/// Layer thickness, per pixel or uniform.
#[derive(Debug, Clone)]
pub enum Thickness {
    /// One thickness for the whole region; an opacity-style control.
    Uniform(f32),
    /// Per-pixel thickness, typically a renormalized feather field.
    Field(ScalarField),
}

/// Single-channel Kubelka-Munk reflectance.
///
/// `a` must already be clamped into the open unit interval and `t` must be
/// non-negative; [`composite`] takes care of both. `s` needs no margin: with
/// `a` interior, `G = S*a - 1 < 0`, so the denominator `D*F*a - G` stays
/// strictly positive for any `S` in [0, 1].
#[inline]
fn km_reflectance(s: f32, a: f32, t: f32) -> f32 {
    let f = (-t * (1.0 - a * a) / a).exp();
    let d = s - a;
    let g = d * a + a * a - 1.0;
    (d * f - g * a) / (d * f * a - g)
}

/// One full pixel: three channels of Kubelka-Munk, then shading.
#[inline]
pub(crate) fn composite_pixel(skin: [f32; 3], cosmetic: [f32; 3], t: f32, shading: f32) -> [f32; 3] {
    let t = t.max(0.0);
    let mut out = [0.0f32; 3];
    for c in 0..3 {
        let s = skin[c].clamp(0.0, 1.0);
        let a = clamp_into_open_unit(cosmetic[c]);
        out[c] = km_reflectance(s, a, t) * shading;
    }
    out
}

/// Checks that every per-pixel input matches the skin image's dimensions.
pub(crate) fn validate_inputs(
    skin: &ReflectanceImage,
    shading: &ShadingMap,
    thickness: &Thickness,
    cosmetic: &CosmeticReflectance,
) -> OpsResult<()> {
    if skin.is_empty() {
        return Err(OpsError::empty_region("skin image has no pixels"));
    }
    skin.ensure_same_dimensions(shading)?;
    if let Thickness::Field(field) = thickness {
        skin.ensure_same_dimensions(field)?;
    }
    if let CosmeticReflectance::Textured(tex) = cosmetic {
        skin.ensure_same_dimensions(tex)?;
    }
    if let Thickness::Uniform(t) = thickness {
        if !t.is_finite() || *t < 0.0 {
            return Err(OpsError::invalid_parameter(format!(
                "thickness must be finite and non-negative, got {t}"
            )));
        }
    }
    Ok(())
}

/// Composites a cosmetic layer over skin.
///
/// `skin` is the intrinsic (shading-free) skin reflectance, `shading` the
/// per-pixel geometric shading factor, and the result is the observed
/// reflectance `R * shading`. The cosmetic reflectance is clamped into
/// `(0.01, 0.99)` before entering the model; skin values are clamped to
/// `[0, 1]` and negative thickness values in a field are treated as zero.
///
/// # Errors
///
/// Dimension mismatches between `skin` and any per-pixel input, an empty
/// skin image, or a non-finite/negative uniform thickness.
///
/// # Example
///
/// ```
/// use kmsim_core::{ReflectanceImage, ShadingMap};
/// use kmsim_ops::{composite, CosmeticReflectance, Thickness};
///
/// let skin = ReflectanceImage::filled(4, 4, [0.6, 0.45, 0.4]);
/// let shading = ShadingMap::filled(4, 4, [1.0]);
/// let out = composite(
///     &skin,
///     &shading,
///     &Thickness::Uniform(0.0),
///     &CosmeticReflectance::Uniform([0.2, 0.1, 0.3]),
/// ).unwrap();
/// // A zero-thickness layer is invisible.
/// assert!((out.pixel(0, 0)[0] - 0.6).abs() < 1e-5);
/// ```
pub fn composite(
    skin: &ReflectanceImage,
    shading: &ShadingMap,
    thickness: &Thickness,
    cosmetic: &CosmeticReflectance,
) -> OpsResult<ReflectanceImage> {
    validate_inputs(skin, shading, thickness, cosmetic)?;
    let (width, height) = skin.dimensions();
    debug!(width, height, "compositing cosmetic layer");

    let mut out = ReflectanceImage::new(width, height);
    for y in 0..height {
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
            out.set_pixel(x, y, px);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SKIN: [f32; 3] = [0.6, 0.45, 0.4];

    fn uniform_setup() -> (ReflectanceImage, ShadingMap) {
        (
            ReflectanceImage::filled(4, 4, SKIN),
            ShadingMap::filled(4, 4, [1.0]),
        )
    }

    #[test]
    fn test_zero_thickness_is_invisible() {
        let (skin, shading) = uniform_setup();
        let out = composite(
            &skin,
            &shading,
            &Thickness::Uniform(0.0),
            &CosmeticReflectance::Uniform([0.2, 0.8, 0.1]),
        )
        .unwrap();
        let px = out.pixel(2, 2);
        for c in 0..3 {
            assert_relative_eq!(px[c], SKIN[c], epsilon = 1e-5);
        }
    }

    #[test]
    fn test_zero_thickness_preserves_boundary_skin_values() {
        // Pure black and pure white skin are valid reflectances; only the
        // cosmetic gets the open-interval margin, so a transparent layer
        // leaves them untouched.
        let mut skin = ReflectanceImage::new(3, 1);
        skin.set_pixel(0, 0, [0.0, 0.0, 0.0]);
        skin.set_pixel(1, 0, [0.005, 0.005, 0.005]);
        skin.set_pixel(2, 0, [1.0, 1.0, 1.0]);
        let shading = ShadingMap::filled(3, 1, [1.0]);
        let out = composite(
            &skin,
            &shading,
            &Thickness::Uniform(0.0),
            &CosmeticReflectance::Uniform([0.5, 0.5, 0.5]),
        )
        .unwrap();
        for x in 0..3 {
            let expected = skin.pixel(x, 0);
            let px = out.pixel(x, 0);
            for c in 0..3 {
                assert!(
                    (px[c] - expected[c]).abs() < 1e-5,
                    "skin {} at x={x} came back as {}",
                    expected[c],
                    px[c]
                );
            }
        }
    }

    #[test]
    fn test_matching_cosmetic_is_invisible_at_any_thickness() {
        let (skin, shading) = uniform_setup();
        for t in [0.1, 1.0, 7.5] {
            let out = composite(
                &skin,
                &shading,
                &Thickness::Uniform(t),
                &CosmeticReflectance::Uniform(SKIN),
            )
            .unwrap();
            let px = out.pixel(0, 0);
            for c in 0..3 {
                assert_relative_eq!(px[c], SKIN[c], epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_thick_layer_hides_skin() {
        let (skin, shading) = uniform_setup();
        let cosmetic = [0.2, 0.1, 0.3];
        let out = composite(
            &skin,
            &shading,
            &Thickness::Uniform(100.0),
            &CosmeticReflectance::Uniform(cosmetic),
        )
        .unwrap();
        let px = out.pixel(1, 1);
        for c in 0..3 {
            assert_relative_eq!(px[c], cosmetic[c], epsilon = 1e-4);
        }
    }

    #[test]
    fn test_shading_scales_output() {
        let skin = ReflectanceImage::filled(2, 2, SKIN);
        let mut shading = ShadingMap::filled(2, 2, [1.0]);
        shading.set_pixel(0, 0, [0.5]);
        let out = composite(
            &skin,
            &shading,
            &Thickness::Uniform(0.0),
            &CosmeticReflectance::Uniform(SKIN),
        )
        .unwrap();
        assert_relative_eq!(out.pixel(0, 0)[0], out.pixel(1, 1)[0] * 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_thickness_field_varies_coverage() {
        // Thicker pixels sit closer to the cosmetic, thinner ones to skin.
        let skin = ReflectanceImage::filled(2, 1, [0.8, 0.8, 0.8]);
        let shading = ShadingMap::filled(2, 1, [1.0]);
        let mut field = ScalarField::new(2, 1);
        field.set_pixel(0, 0, [0.1]);
        field.set_pixel(1, 0, [2.0]);
        let out = composite(
            &skin,
            &shading,
            &Thickness::Field(field),
            &CosmeticReflectance::Uniform([0.1, 0.1, 0.1]),
        )
        .unwrap();
        assert!(out.pixel(1, 0)[0] < out.pixel(0, 0)[0]);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let skin = ReflectanceImage::filled(4, 4, SKIN);
        let shading = ShadingMap::filled(3, 4, [1.0]);
        let result = composite(
            &skin,
            &shading,
            &Thickness::Uniform(1.0),
            &CosmeticReflectance::Uniform(SKIN),
        );
        assert!(matches!(result, Err(OpsError::Core(_))));
    }

    #[test]
    fn test_negative_uniform_thickness_rejected() {
        let (skin, shading) = uniform_setup();
        let result = composite(
            &skin,
            &shading,
            &Thickness::Uniform(-1.0),
            &CosmeticReflectance::Uniform(SKIN),
        );
        assert!(matches!(result, Err(OpsError::InvalidParameter(_))));
    }

    #[test]
    fn test_output_between_skin_and_cosmetic() {
        // For intermediate thickness the result lands between the two
        // extremes on every channel.
        let (skin, shading) = uniform_setup();
        let cosmetic = [0.2, 0.1, 0.3];
        let out = composite(
            &skin,
            &shading,
            &Thickness::Uniform(1.0),
            &CosmeticReflectance::Uniform(cosmetic),
        )
        .unwrap();
        let px = out.pixel(0, 0);
        for c in 0..3 {
            let (lo, hi) = if cosmetic[c] < SKIN[c] {
                (cosmetic[c], SKIN[c])
            } else {
                (SKIN[c], cosmetic[c])
            };
            assert!(px[c] > lo && px[c] < hi, "channel {c}: {} not in ({lo}, {hi})", px[c]);
        }
    }
}
