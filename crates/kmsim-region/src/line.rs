//! Boundary-line extraction from annotated photographs.
//!
//! Boundaries and feather lines can be drawn directly on a face photograph
//! in pure red, then lifted out into a single-channel line image suitable
//! for [`flood_fill`](crate::flood_fill) and
//! [`FeatheredValue`](crate::FeatheredValue).

use kmsim_core::{LabelImage, SrgbImage, BOUNDARY_MARKER};
use tracing::debug;

/// The annotation color: pure red, full saturation.
const RED: [u8; 3] = [255, 0, 0];

/// Extracts a line image from a red-annotated photograph.
///
/// Pixels exactly equal to `(255, 0, 0)` become [`BOUNDARY_MARKER`] (255);
/// everything else becomes 0. The match is exact, so the annotation must be
/// drawn with a hard brush and the image stored losslessly; JPEG ringing
/// around the stroke breaks the extraction.
pub fn line_from_red(photo: &SrgbImage) -> LabelImage {
    let (width, height) = photo.dimensions();
    let mut line = LabelImage::new(width, height);
    let mut count = 0u32;
    for (x, y, px) in photo.pixels() {
        if px == RED {
            line.set_pixel(x, y, [BOUNDARY_MARKER]);
            count += 1;
        }
    }
    debug!(count, "red annotation pixels extracted");
    line
}
