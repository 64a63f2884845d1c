//! # kmsim-io
//!
//! Raster I/O for the simulation pipeline: 8-bit sRGB color images and
//! single-channel label images, via the `image` crate's codecs (PNG, JPEG,
//! BMP).

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod raster;

pub use error::{IoError, IoResult};
pub use raster::{load_label, load_srgb, save_label, save_srgb};
