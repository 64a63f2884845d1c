//! Pixel data formats and luminance constants.
//!
//! # Types
//!
//! - [`PixelFormat`] - Trait for channel data types (u8, f32)
//!
//! # Luminance proxy
//!
//! The simulation uses the calibration-specific luminance proxy
//! `Y = 0.33*R + 0.66*G + 0.07*B` everywhere a single brightness value is
//! needed (patch ranking, shading-map construction). The coefficients come
//! from the original calibration and deliberately differ from the Rec.709
//! set; they are defined once here so all crates agree.

/// Luminance proxy coefficient for the red channel.
///
/// Used in the proxy formula: `Y = 0.33*R + 0.66*G + 0.07*B`
pub const SKIN_LUMA_R: f32 = 0.33;

/// Luminance proxy coefficient for the green channel.
pub const SKIN_LUMA_G: f32 = 0.66;

/// Luminance proxy coefficient for the blue channel.
pub const SKIN_LUMA_B: f32 = 0.07;

/// Luminance proxy coefficients as an array `[R, G, B]`.
pub const SKIN_LUMA: [f32; 3] = [SKIN_LUMA_R, SKIN_LUMA_G, SKIN_LUMA_B];

/// Calculates the luminance proxy from linear RGB values.
///
/// # Example
///
/// ```
/// use kmsim_core::luminance_skin;
///
/// let y = luminance_skin([1.0, 1.0, 1.0]);
/// assert!((y - 1.06).abs() < 1e-6);
/// ```
#[inline]
pub fn luminance_skin(rgb: [f32; 3]) -> f32 {
    rgb[0] * SKIN_LUMA_R + rgb[1] * SKIN_LUMA_G + rgb[2] * SKIN_LUMA_B
}

/// Trait for pixel channel data types.
///
/// Implemented for the two formats the simulation needs:
///
/// - `u8` - 8-bit display values and fill labels (0-255)
/// - `f32` - linear reflectances, shading ratios, thickness values
///
/// Integer conversion normalizes to [0.0, 1.0]; floats pass through.
pub trait PixelFormat: Copy + Clone + Default + Send + Sync + PartialOrd + 'static {
    /// Number of bits per channel.
    const BITS: u32;

    /// Whether this is a floating-point format.
    const IS_FLOAT: bool;

    /// Converts to f32, normalizing integers to [0.0, 1.0].
    fn to_f32(self) -> f32;

    /// Converts from f32; integers expect [0.0, 1.0] and clamp.
    fn from_f32(v: f32) -> Self;

    /// Zero value.
    fn zero() -> Self;

    /// One value (1.0 for floats, the maximum for integers).
    fn one() -> Self;
}

impl PixelFormat for u8 {
    const BITS: u32 = 8;
    const IS_FLOAT: bool = false;

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32 / 255.0
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        255
    }
}

impl PixelFormat for f32 {
    const BITS: u32 = 32;
    const IS_FLOAT: bool = true;

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }

    #[inline]
    fn from_f32(v: f32) -> Self {
        v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }
}
