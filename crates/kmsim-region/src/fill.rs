//! Breadth-first region growing.
//!
//! The fill walks a [`LabelImage`] from a seed point, visiting 8-connected
//! neighbors. Pixel states are encoded in the grid values themselves:
//!
//! - `0` - unvisited, fillable
//! - `1..=254` - filled content
//! - `255` - pre-drawn boundary marker, never overwritten
//!
//! Each filled pixel gets its value from a [`ValueSource`], which is what
//! lets a constant mask fill and a distance-feathered fill share one
//! traversal.

use crate::{RegionError, RegionResult};
use kmsim_core::{LabelImage, MAX_FILL_VALUE};
use std::collections::VecDeque;
use tracing::debug;

/// Per-pixel value strategy for region growing.
///
/// Implementations may carry state: [`FeatheredValue`](crate::FeatheredValue)
/// records every queried point for its later renormalization pass, which is
/// why `value_at` takes `&mut self`.
pub trait ValueSource {
    /// Returns the fill value for the pixel at `(x, y)`.
    ///
    /// Must return a value in `1..=254`; `0` would leave the pixel looking
    /// unvisited and stall the traversal, and `255` is reserved for the
    /// boundary marker.
    fn value_at(&mut self, x: u32, y: u32) -> u8;
}

/// Value source producing a flat fill.
#[derive(Debug, Clone, Copy)]
pub struct ConstantValue(u8);

impl ConstantValue {
    /// Creates a constant source; the value is clamped into `1..=254`.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, MAX_FILL_VALUE))
    }

    /// The value written to every filled pixel.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl ValueSource for ConstantValue {
    #[inline]
    fn value_at(&mut self, _x: u32, _y: u32) -> u8 {
        self.0
    }
}

/// The 8-connected neighborhood offsets.
const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Grows a region from `seed`, writing values from `source` into `grid`.
///
/// Breadth-first, 8-connected. Only pixels whose current value is 0 are
/// filled; boundary markers (255) and already-filled pixels are left alone.
/// Neighbor coordinates are bounds-checked, so a boundary that touches the
/// image edge is safe (the fill simply stops at the edge).
///
/// Returns the number of pixels filled, including the seed.
///
/// # Errors
///
/// - [`RegionError::SeedOutOfBounds`] if the seed lies outside the grid.
/// - [`RegionError::SeedNotFillable`] if the seed pixel is non-zero.
///
/// # Precondition
///
/// The boundary must fully enclose the seed; an open boundary makes the
/// fill flood the whole image (see the crate-level docs).
///
/// # Example
///
/// ```
/// use kmsim_core::LabelImage;
/// use kmsim_region::{flood_fill, ConstantValue};
///
/// // A 5x5 grid with a ring of boundary pixels around the center.
/// let mut grid = LabelImage::new(5, 5);
/// for i in 1..4 {
///     grid.set_pixel(i, 1, [255]);
///     grid.set_pixel(i, 3, [255]);
///     grid.set_pixel(1, i, [255]);
///     grid.set_pixel(3, i, [255]);
/// }
/// let filled = flood_fill(&mut grid, (2, 2), &mut ConstantValue::new(100)).unwrap();
/// assert_eq!(filled, 1);
/// assert_eq!(grid.pixel(2, 2), [100]);
/// ```
pub fn flood_fill(
    grid: &mut LabelImage,
    seed: (u32, u32),
    source: &mut dyn ValueSource,
) -> RegionResult<u32> {
    let (width, height) = grid.dimensions();
    let (sx, sy) = seed;

    if !grid.in_bounds(sx, sy) {
        return Err(RegionError::SeedOutOfBounds {
            x: sx,
            y: sy,
            width,
            height,
        });
    }
    let seed_value = grid.pixel(sx, sy)[0];
    if seed_value != 0 {
        return Err(RegionError::SeedNotFillable {
            x: sx,
            y: sy,
            value: seed_value,
        });
    }

    let mut filled = 0u32;
    let mut queue = VecDeque::new();

    grid.set_pixel(sx, sy, [source.value_at(sx, sy)]);
    filled += 1;
    queue.push_back((sx, sy));

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if grid.pixel(nx, ny)[0] == 0 {
                grid.set_pixel(nx, ny, [source.value_at(nx, ny)]);
                filled += 1;
                queue.push_back((nx, ny));
            }
        }
    }

    debug!(filled, seed_x = sx, seed_y = sy, "region grown");
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmsim_core::LabelImage;

    /// Builds a grid with a rectangular boundary ring of 255s.
    fn ring_grid(width: u32, height: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> LabelImage {
        let mut grid = LabelImage::new(width, height);
        for x in x0..=x1 {
            grid.set_pixel(x, y0, [255]);
            grid.set_pixel(x, y1, [255]);
        }
        for y in y0..=y1 {
            grid.set_pixel(x0, y, [255]);
            grid.set_pixel(x1, y, [255]);
        }
        grid
    }

    #[test]
    fn test_fill_enclosed_rectangle() {
        // 10x10 interior surrounded by a ring; every interior pixel gets the
        // value, every boundary pixel stays 255.
        let mut grid = ring_grid(12, 12, 0, 0, 11, 11);
        let filled = flood_fill(&mut grid, (5, 5), &mut ConstantValue::new(100)).unwrap();
        assert_eq!(filled, 100); // 10x10 interior

        for (x, y, px) in grid.pixels() {
            if x == 0 || y == 0 || x == 11 || y == 11 {
                assert_eq!(px, [255], "boundary at ({}, {}) changed", x, y);
            } else {
                assert_eq!(px, [100], "interior at ({}, {}) not filled", x, y);
            }
        }
    }

    #[test]
    fn test_fill_does_not_cross_boundary() {
        let mut grid = ring_grid(20, 20, 4, 4, 12, 12);
        flood_fill(&mut grid, (8, 8), &mut ConstantValue::new(50)).unwrap();
        // Outside the ring stays untouched.
        assert_eq!(grid.pixel(0, 0), [0]);
        assert_eq!(grid.pixel(15, 15), [0]);
        // Inside is filled.
        assert_eq!(grid.pixel(5, 5), [50]);
    }

    #[test]
    fn test_open_boundary_floods_everything() {
        // Documented precondition violation: a gap in the ring leaks.
        let mut grid = ring_grid(8, 8, 2, 2, 5, 5);
        grid.set_pixel(3, 2, [0]); // cut a gap in the top edge
        flood_fill(&mut grid, (3, 3), &mut ConstantValue::new(9)).unwrap();
        assert_eq!(grid.pixel(0, 0), [9]);
        assert_eq!(grid.pixel(7, 7), [9]);
    }

    #[test]
    fn test_diagonal_connectivity() {
        // An 8-connected fill passes through a diagonal gap a 4-connected
        // fill would not.
        let mut grid = LabelImage::new(3, 3);
        grid.set_pixel(1, 0, [255]);
        grid.set_pixel(0, 1, [255]);
        flood_fill(&mut grid, (0, 0), &mut ConstantValue::new(7)).unwrap();
        assert_eq!(grid.pixel(1, 1), [7]);
        assert_eq!(grid.pixel(2, 2), [7]);
    }

    #[test]
    fn test_seed_out_of_bounds() {
        let mut grid = LabelImage::new(4, 4);
        let result = flood_fill(&mut grid, (10, 1), &mut ConstantValue::new(1));
        assert!(matches!(result, Err(RegionError::SeedOutOfBounds { .. })));
    }

    #[test]
    fn test_seed_on_boundary_rejected() {
        let mut grid = LabelImage::new(4, 4);
        grid.set_pixel(2, 2, [255]);
        let result = flood_fill(&mut grid, (2, 2), &mut ConstantValue::new(1));
        assert!(matches!(result, Err(RegionError::SeedNotFillable { .. })));
    }

    #[test]
    fn test_constant_value_clamps_reserved_values() {
        assert_eq!(ConstantValue::new(0).value(), 1);
        assert_eq!(ConstantValue::new(255).value(), 254);
        assert_eq!(ConstantValue::new(100).value(), 100);
    }

    #[test]
    fn test_fill_at_image_edge_is_safe() {
        // No boundary at all: fill touches every pixel without panicking.
        let mut grid = LabelImage::new(6, 4);
        let filled = flood_fill(&mut grid, (0, 0), &mut ConstantValue::new(3)).unwrap();
        assert_eq!(filled, 24);
    }
}
