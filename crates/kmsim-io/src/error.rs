//! Error types for image I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for loading and saving raster images.
#[derive(Error, Debug)]
pub enum IoError {
    /// The codec failed to read or write the file.
    #[error("image codec error for {path}: {source}")]
    Codec {
        /// The file involved.
        path: PathBuf,
        /// The underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// The decoded buffer did not map onto a core image.
    #[error(transparent)]
    Core(#[from] kmsim_core::Error),
}

impl IoError {
    /// Creates an [`IoError::Codec`] for `path`.
    pub fn codec(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Codec {
            path: path.into(),
            source,
        }
    }
}

/// Result type for image I/O.
pub type IoResult<T> = Result<T, IoError>;
