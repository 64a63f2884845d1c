//! Error types for color operations.

use thiserror::Error;

/// Error type for color conversions and patch extraction.
#[derive(Error, Debug)]
pub enum ColorError {
    /// The input image has no pixels to work with.
    #[error("empty image: {0}")]
    EmptyImage(String),

    /// Underlying buffer error.
    #[error(transparent)]
    Core(#[from] kmsim_core::Error),
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
