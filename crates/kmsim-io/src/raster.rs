//! Load and save 8-bit raster images.
//!
//! Thin adapters between the `image` crate's buffers and the core image
//! types. Anything the codec can decode is accepted; color inputs are
//! converted to 8-bit RGB, mask and line inputs to 8-bit luma.

use crate::{IoError, IoResult};
use kmsim_core::{LabelImage, SrgbImage};
use std::path::Path;
use tracing::debug;

/// Loads an sRGB color image.
pub fn load_srgb(path: impl AsRef<Path>) -> IoResult<SrgbImage> {
    let path = path.as_ref();
    let decoded = image::open(path)
        .map_err(|e| IoError::codec(path, e))?
        .to_rgb8();
    let (width, height) = decoded.dimensions();
    debug!(path = %path.display(), width, height, "loaded sRGB image");
    Ok(SrgbImage::from_data(width, height, decoded.into_raw())?)
}

/// Loads a single-channel label image (a mask, boundary, or line grid).
pub fn load_label(path: impl AsRef<Path>) -> IoResult<LabelImage> {
    let path = path.as_ref();
    let decoded = image::open(path)
        .map_err(|e| IoError::codec(path, e))?
        .to_luma8();
    let (width, height) = decoded.dimensions();
    debug!(path = %path.display(), width, height, "loaded label image");
    Ok(LabelImage::from_data(width, height, decoded.into_raw())?)
}

/// Saves an sRGB color image; the format follows the file extension.
pub fn save_srgb(image: &SrgbImage, path: impl AsRef<Path>) -> IoResult<()> {
    let path = path.as_ref();
    let (width, height) = image.dimensions();
    let buffer = image::RgbImage::from_raw(width, height, image.data().to_vec())
        .ok_or_else(|| {
            kmsim_core::Error::invalid_dimensions(width, height, "buffer length mismatch")
        })?;
    buffer.save(path).map_err(|e| IoError::codec(path, e))?;
    debug!(path = %path.display(), width, height, "saved sRGB image");
    Ok(())
}

/// Saves a single-channel label image; the format follows the file extension.
pub fn save_label(image: &LabelImage, path: impl AsRef<Path>) -> IoResult<()> {
    let path = path.as_ref();
    let (width, height) = image.dimensions();
    let buffer = image::GrayImage::from_raw(width, height, image.data().to_vec())
        .ok_or_else(|| {
            kmsim_core::Error::invalid_dimensions(width, height, "buffer length mismatch")
        })?;
    buffer.save(path).map_err(|e| IoError::codec(path, e))?;
    debug!(path = %path.display(), width, height, "saved label image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_srgb_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("face.png");
        let mut original = SrgbImage::filled(6, 4, [180, 150, 130]);
        original.set_pixel(2, 1, [255, 0, 0]);

        save_srgb(&original, &path).unwrap();
        let loaded = load_srgb(&path).unwrap();
        assert_eq!(loaded.dimensions(), (6, 4));
        assert_eq!(loaded.data(), original.data());
    }

    #[test]
    fn test_label_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mask.png");
        let mut original = LabelImage::new(5, 5);
        original.set_pixel(0, 0, [255]);
        original.set_pixel(3, 3, [200]);

        save_label(&original, &path).unwrap();
        let loaded = load_label(&path).unwrap();
        assert_eq!(loaded.data(), original.data());
    }

    #[test]
    fn test_missing_file_is_codec_error() {
        let result = load_srgb("/nonexistent/face.png");
        assert!(matches!(result, Err(IoError::Codec { .. })));
    }
}
