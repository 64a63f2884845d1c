//! Display-range overflow guard.
//!
//! Composited reflectances can exceed 1.0 where bright shading meets a
//! bright cosmetic. Truncating per pixel would shift hue; instead each
//! channel is rescaled as a whole so its maximum lands at 1.0.

use kmsim_core::ReflectanceImage;
use tracing::debug;

/// Limits each channel of `image` to the displayable range.
///
/// Finds the per-channel maximum, raises it to at least 1.0, and divides
/// the channel through by it. Channels already within range are untouched.
/// Returns the divisor applied per channel, so callers can report how much
/// was compressed.
pub fn limit_channel_overflow(image: &mut ReflectanceImage) -> [f32; 3] {
    let mut max = [0.0f32; 3];
    for (_, _, px) in image.pixels() {
        for c in 0..3 {
            max[c] = max[c].max(px[c]);
        }
    }

    let mut limit = [1.0f32; 3];
    for c in 0..3 {
        limit[c] = max[c].max(1.0);
    }
    if limit != [1.0, 1.0, 1.0] {
        debug!(r = limit[0], g = limit[1], b = limit[2], "limiting channel overflow");
        image.map_pixels(|px| [px[0] / limit[0], px[1] / limit[1], px[2] / limit[2]]);
    }
    limit
}
