//! Distance-based feathering for soft cosmetic edges.
//!
//! A feathered fill produces a thickness field instead of a flat mask: the
//! value at each pixel grows with its distance from a user-drawn *feather
//! line*, so the cosmetic layer thins out smoothly toward that edge.
//!
//! The pass runs in two phases. During the fill, [`FeatheredValue`] writes a
//! sentinel into the grid and records each visited pixel together with its
//! distance term. After the fill, [`FeatheredValue::renormalize`] rescales
//! the recorded distances so the farthest pixel lands on 254 and writes the
//! final values back into the grid.

use crate::fill::ValueSource;
use crate::{RegionError, RegionResult};
use kmsim_core::{LabelImage, BOUNDARY_MARKER, MAX_FILL_VALUE};
use tracing::debug;

/// Sentinel written during the fill phase; overwritten by renormalization.
pub const FEATHER_SENTINEL: u8 = 1;

/// Exponent applied to the squared distance. Flattens the falloff so the
/// thickness ramps up quickly near the line and plateaus away from it.
const DISTANCE_EXPONENT: f32 = 0.3;

/// Value source producing a distance-feathered fill.
///
/// Built from a line image (feather line pixels = 255, rest 0). For every
/// pixel the fill visits, the source computes the minimum squared distance
/// to any line point, raised to the 0.3 power, and records it; the grid
/// itself only receives [`FEATHER_SENTINEL`] until
/// [`renormalize`](Self::renormalize) runs.
#[derive(Debug, Clone)]
pub struct FeatheredValue {
    line: Vec<(f32, f32)>,
    recorded: Vec<(u32, u32, f32)>,
}

impl FeatheredValue {
    /// Collects feather-line points from a line image.
    ///
    /// The line is thinned as it is collected: after a line pixel is
    /// accepted, its 8 neighbors are cleared in a scratch copy so a
    /// several-pixel-wide stroke contributes a sparse set of points rather
    /// than every pixel of its width. This keeps the per-pixel distance
    /// scan cheap without changing the falloff shape noticeably.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::EmptyLine`] if the image contains no pixels
    /// with value 255.
    pub fn from_line_image(line: &LabelImage) -> RegionResult<Self> {
        let (width, height) = line.dimensions();
        let mut scratch = line.clone();
        let mut points = Vec::new();

        for y in 0..height {
            for x in 0..width {
                if scratch.pixel(x, y)[0] != BOUNDARY_MARKER {
                    continue;
                }
                points.push((x as f32, y as f32));
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x as i64 + dx;
                        let ny = y as i64 + dy;
                        if nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64 {
                            scratch.set_pixel(nx as u32, ny as u32, [0]);
                        }
                    }
                }
            }
        }

        if points.is_empty() {
            return Err(RegionError::EmptyLine);
        }
        debug!(points = points.len(), "feather line collected");
        Ok(Self {
            line: points,
            recorded: Vec::new(),
        })
    }

    /// Number of collected feather-line points.
    pub fn line_len(&self) -> usize {
        self.line.len()
    }

    /// Distance term for a pixel: minimum squared distance to the line,
    /// raised to the falloff exponent.
    fn distance(&self, x: u32, y: u32) -> f32 {
        let (px, py) = (x as f32, y as f32);
        let mut min_sq = f32::INFINITY;
        for &(lx, ly) in &self.line {
            let dx = px - lx;
            let dy = py - ly;
            let sq = dx * dx + dy * dy;
            if sq < min_sq {
                min_sq = sq;
            }
        }
        min_sq.powf(DISTANCE_EXPONENT)
    }

    /// Writes the renormalized thickness values into `grid`.
    ///
    /// Recorded distances are scaled linearly so the maximum maps to 254.
    /// If every recorded distance is zero (the region degenerates onto the
    /// line itself), all recorded pixels get 254; there is no division in
    /// that path.
    ///
    /// Call after the fill pass that used this source; pixels the fill
    /// never visited are left untouched.
    pub fn renormalize(&self, grid: &mut LabelImage) {
        let max = self
            .recorded
            .iter()
            .fold(0.0f32, |acc, &(_, _, d)| acc.max(d));

        if max == 0.0 {
            for &(x, y, _) in &self.recorded {
                grid.set_pixel(x, y, [MAX_FILL_VALUE]);
            }
            return;
        }

        let scale = MAX_FILL_VALUE as f32 / max;
        for &(x, y, d) in &self.recorded {
            let v = (d * scale).round().clamp(FEATHER_SENTINEL as f32, MAX_FILL_VALUE as f32);
            grid.set_pixel(x, y, [v as u8]);
        }
        debug!(
            pixels = self.recorded.len(),
            max_distance = max,
            "feather renormalized"
        );
    }
}

impl ValueSource for FeatheredValue {
    fn value_at(&mut self, x: u32, y: u32) -> u8 {
        let d = self.distance(x, y);
        self.recorded.push((x, y, d));
        FEATHER_SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::flood_fill;

    /// Line image with a single vertical stroke at x = `lx`.
    fn vertical_line(width: u32, height: u32, lx: u32) -> LabelImage {
        let mut img = LabelImage::new(width, height);
        for y in 0..height {
            img.set_pixel(lx, y, [255]);
        }
        img
    }

    #[test]
    fn test_empty_line_rejected() {
        let img = LabelImage::new(8, 8);
        assert!(matches!(
            FeatheredValue::from_line_image(&img),
            Err(RegionError::EmptyLine)
        ));
    }

    #[test]
    fn test_line_thinning_reduces_points() {
        // A 3-wide stroke thins to far fewer points than its pixel count.
        let mut img = LabelImage::new(10, 10);
        for y in 0..10 {
            for x in 3..6 {
                img.set_pixel(x, y, [255]);
            }
        }
        let feather = FeatheredValue::from_line_image(&img).unwrap();
        assert!(feather.line_len() < 30);
        assert!(feather.line_len() >= 1);
    }

    #[test]
    fn test_feathered_fill_monotone_with_distance() {
        // Fill a borderless strip; feather line runs down the left edge.
        // After renormalization, thickness must not decrease moving away
        // from the line, and the farthest column must hit 254.
        let line = vertical_line(16, 4, 0);
        let mut feather = FeatheredValue::from_line_image(&line).unwrap();
        let mut grid = LabelImage::new(16, 4);
        flood_fill(&mut grid, (8, 2), &mut feather).unwrap();
        feather.renormalize(&mut grid);

        let row: Vec<u8> = (0..16).map(|x| grid.pixel(x, 2)[0]).collect();
        for pair in row.windows(2) {
            assert!(pair[1] >= pair[0], "thickness dipped: {:?}", row);
        }
        assert_eq!(*row.last().unwrap(), 254);
    }

    #[test]
    fn test_renormalize_degenerate_region() {
        // Every recorded pixel sits on the line itself: uniform 254.
        let mut line = LabelImage::new(4, 1);
        line.set_pixel(2, 0, [255]);
        let mut feather = FeatheredValue::from_line_image(&line).unwrap();
        feather.recorded.push((2, 0, 0.0));
        let mut grid = LabelImage::new(4, 1);
        feather.renormalize(&mut grid);
        assert_eq!(grid.pixel(2, 0), [254]);
        assert_eq!(grid.pixel(0, 0), [0]); // unvisited pixels untouched
    }

    #[test]
    fn test_sentinel_written_during_fill() {
        let line = vertical_line(6, 6, 0);
        let mut feather = FeatheredValue::from_line_image(&line).unwrap();
        let mut grid = LabelImage::new(6, 6);
        // Block renormalization: check the raw fill output first.
        flood_fill(&mut grid, (3, 3), &mut feather).unwrap();
        assert_eq!(grid.pixel(3, 3), [FEATHER_SENTINEL]);
        feather.renormalize(&mut grid);
        assert!(grid.pixel(5, 3)[0] > FEATHER_SENTINEL);
    }

    #[test]
    fn test_values_stay_in_fill_range() {
        let line = vertical_line(12, 6, 5);
        let mut feather = FeatheredValue::from_line_image(&line).unwrap();
        let mut grid = LabelImage::new(12, 6);
        flood_fill(&mut grid, (2, 2), &mut feather).unwrap();
        feather.renormalize(&mut grid);
        for (_, _, px) in grid.pixels() {
            assert!(px[0] <= 254);
        }
    }
}
