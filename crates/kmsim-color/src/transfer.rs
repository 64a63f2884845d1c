//! sRGB transfer function.
//!
//! The sRGB standard uses a piecewise curve combining a linear segment near
//! black with a power segment (approximately gamma 2.2) for the rest. The
//! simulation works in linear reflectance, so every image coming off disk is
//! decoded through this curve and every result is encoded back through it
//! for display.
//!
//! A reflectance of 1.0 corresponds to sRGB 255; the capture pipeline is
//! assumed to be white-balanced against an sRGB (255, 255, 255) background.
//!
//! # Range
//!
//! - Byte forms: [0, 255] <-> [0.0, 1.0]
//! - Normalized forms: [0, 1] <-> [0, 1]
//!
//! # Reference
//!
//! IEC 61966-2-1:1999

use crate::ColorError;
use kmsim_core::{PixelFormat, ReflectanceImage, SrgbImage};

/// Encoded-domain breakpoint of the piecewise curve.
const ENCODED_KNEE: f32 = 0.04045;

/// Linear-domain breakpoint, the image of `ENCODED_KNEE / 12.92`.
const LINEAR_KNEE: f32 = 0.003_130_8;

/// Slope of the linear segment.
const LINEAR_SLOPE: f32 = 12.92;

/// Offset of the power segment.
const OFFSET: f32 = 0.055;

/// Decodes a normalized sRGB value to linear reflectance.
///
/// # Formula
///
/// ```text
/// if V < 0.04045:
///     L = V / 12.92
/// else:
///     L = ((V + 0.055) / 1.055)^2.4
/// ```
#[inline]
pub fn decode_norm(v: f32) -> f32 {
    if v < ENCODED_KNEE {
        v / LINEAR_SLOPE
    } else {
        ((v + OFFSET) / (1.0 + OFFSET)).powf(2.4)
    }
}

/// Encodes linear reflectance to a normalized sRGB value.
///
/// Exact mathematical inverse of [`decode_norm`]; the breakpoints match
/// (`0.0031308` maps back to `0.04045 / 12.92`).
///
/// # Formula
///
/// ```text
/// if L < 0.0031308:
///     V = L * 12.92
/// else:
///     V = 1.055 * L^(1/2.4) - 0.055
/// ```
#[inline]
pub fn encode_norm(l: f32) -> f32 {
    if l < LINEAR_KNEE {
        l * LINEAR_SLOPE
    } else {
        (1.0 + OFFSET) * l.powf(1.0 / 2.4) - OFFSET
    }
}

/// Decodes an sRGB byte to linear reflectance in [0.0, 1.0].
///
/// # Example
///
/// ```
/// use kmsim_color::transfer::decode;
///
/// assert_eq!(decode(0), 0.0);
/// assert!((decode(255) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn decode(byte: u8) -> f32 {
    decode_norm(byte as f32 / 255.0)
}

/// Encodes linear reflectance in [0.0, 1.0] to an sRGB byte.
///
/// Out-of-range inputs are clamped; callers re-encoding composited images
/// should run the overflow guard first so clamping never discards signal.
#[inline]
pub fn encode(r: f32) -> u8 {
    (encode_norm(r.clamp(0.0, 1.0)) * 255.0 + 0.5) as u8
}

/// Decodes a gamma-encoded triple to linear reflectance.
#[inline]
pub fn decode_rgb(rgb: [u8; 3]) -> [f32; 3] {
    [decode(rgb[0]), decode(rgb[1]), decode(rgb[2])]
}

/// Encodes a linear reflectance triple to sRGB bytes.
#[inline]
pub fn encode_rgb(rgb: [f32; 3]) -> [u8; 3] {
    [encode(rgb[0]), encode(rgb[1]), encode(rgb[2])]
}

/// Decodes an entire sRGB image into a linear reflectance image.
pub fn decode_image(img: &SrgbImage) -> ReflectanceImage {
    let data = img.data().iter().map(|&b| decode(b)).collect();
    // Length is preserved channel for channel, so this cannot fail.
    ReflectanceImage::from_data(img.width(), img.height(), data)
        .expect("decode preserves buffer length")
}

/// Encodes a linear reflectance image back to display sRGB bytes.
///
/// Values are clamped to [0.0, 1.0] per channel; run
/// `kmsim_ops::guard::limit_channel_overflow` beforehand when the image may
/// legitimately exceed the displayable range.
pub fn encode_image(img: &ReflectanceImage) -> SrgbImage {
    let data = img.data().iter().map(|&r| encode(r)).collect();
    SrgbImage::from_data(img.width(), img.height(), data)
        .expect("encode preserves buffer length")
}

/// Normalizes raw sRGB bytes to [0, 1] **without** applying the transfer
/// curve.
///
/// Used for cosmetic texture images whose calibration already absorbed the
/// display curve; face images must go through [`decode_image`] instead.
pub fn normalize_image(img: &SrgbImage) -> Result<ReflectanceImage, ColorError> {
    let data = img.data().iter().map(|&b| b.to_f32()).collect();
    Ok(ReflectanceImage::from_data(img.width(), img.height(), data)?)
}
