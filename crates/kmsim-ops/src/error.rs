//! Error types for compositing and estimation operations.

use thiserror::Error;

/// Error type for the ops crate.
#[derive(Error, Debug)]
pub enum OpsError {
    /// A scalar parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A selection (mask or region) matched no usable pixels.
    #[error("empty region: {0}")]
    EmptyRegion(String),

    /// Underlying buffer or dimension error.
    #[error(transparent)]
    Core(#[from] kmsim_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::InvalidParameter`].
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Creates an [`OpsError::EmptyRegion`].
    pub fn empty_region(msg: impl Into<String>) -> Self {
        Self::EmptyRegion(msg.into())
    }
}

/// Result type for the ops crate.
pub type OpsResult<T> = Result<T, OpsError>;
