//! Cosmetic swatch calibration.
//!
//! A swatch image is an sRGB capture of a cosmetic smear against a
//! controlled white background, with at least some pixels showing the
//! product at full opacity (a thick layer). The darkest pixel of the
//! swatch, ranked by the skin luminance proxy, is taken as the cosmetic's
//! **infinite-thickness reflectance** - the `a` parameter of the
//! Kubelka-Munk compositing formula.

use crate::transfer::decode_rgb;
use crate::{ColorError, ColorResult};
use kmsim_core::{luminance_skin, SrgbImage};

/// Extracts the infinite-thickness reflectance from a swatch image.
///
/// Every pixel is decoded to linear reflectance and ranked by the luminance
/// proxy `0.33*R + 0.66*G + 0.07*B`; the minimum wins. Comparison is a
/// strict less-than, so ties resolve to the first pixel in row-major scan
/// order.
///
/// # Errors
///
/// Returns [`ColorError::EmptyImage`] for a zero-area swatch.
///
/// # Example
///
/// ```
/// use kmsim_core::SrgbImage;
/// use kmsim_color::darkest_color;
///
/// let swatch = SrgbImage::filled(8, 8, [255, 255, 255]);
/// assert_eq!(darkest_color(&swatch).unwrap(), [1.0, 1.0, 1.0]);
/// ```
pub fn darkest_color(swatch: &SrgbImage) -> ColorResult<[f32; 3]> {
    if swatch.is_empty() {
        return Err(ColorError::EmptyImage(
            "swatch has no pixels to rank".into(),
        ));
    }

    let mut darkest = [0.0f32; 3];
    let mut dark = f32::INFINITY;
    for (_, _, px) in swatch.pixels() {
        let refl = decode_rgb(px);
        let y = luminance_skin(refl);
        if y < dark {
            dark = y;
            darkest = refl;
        }
    }
    Ok(darkest)
}
