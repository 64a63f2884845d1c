//! Error types for region operations.

use thiserror::Error;

/// Error type for region growing and feathering.
#[derive(Error, Debug)]
pub enum RegionError {
    /// The seed point lies outside the grid.
    #[error("seed ({x}, {y}) out of bounds for grid {width}x{height}")]
    SeedOutOfBounds {
        /// Seed x coordinate.
        x: u32,
        /// Seed y coordinate.
        y: u32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// The seed pixel is not fillable (already filled, or on a boundary).
    #[error("seed ({x}, {y}) is not fillable: grid value is {value}, expected 0")]
    SeedNotFillable {
        /// Seed x coordinate.
        x: u32,
        /// Seed y coordinate.
        y: u32,
        /// The value found at the seed.
        value: u8,
    },

    /// A feather line image contained no line pixels.
    #[error("line image contains no boundary pixels (value 255)")]
    EmptyLine,

    /// Underlying buffer error.
    #[error(transparent)]
    Core(#[from] kmsim_core::Error),
}

/// Result type for region operations.
pub type RegionResult<T> = Result<T, RegionError>;
