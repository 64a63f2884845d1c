//! # kmsim-core
//!
//! Core types for cosmetic layer simulation.
//!
//! This crate provides the foundational types used throughout the kmsim
//! workspace:
//!
//! - [`ColorState`] - Trait and marker types tracking what pixel values mean
//! - [`Image`] - Owned row-major image buffer with color-state awareness
//! - [`PixelFormat`] - Trait over the supported channel types (u8, f32)
//!
//! ## Design Philosophy
//!
//! The core principle is **compile-time color-state safety**. A
//! gamma-encoded sRGB image cannot be accidentally fed into the
//! Kubelka-Munk compositor, which operates on linear reflectance, and a
//! fill-label grid cannot be mistaken for photometric data:
//!
//! ```ignore
//! let face: SrgbImage = load_srgb("face.png")?;
//! let refl: ReflectanceImage = decode_image(&face); // explicit transfer
//! // composite(&face, ...);  // Compile error!
//! ```
//!
//! ## Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal
//! dependencies. All other kmsim crates depend on `kmsim-core`:
//!
//! ```text
//! kmsim-core (this crate)
//!    ^
//!    |
//!    +-- kmsim-color (transfer functions, CIELAB, patch extraction)
//!    +-- kmsim-region (region growing, feathering)
//!    +-- kmsim-ops (baseline, Kubelka-Munk compositor)
//!    +-- kmsim-io (raster load/save)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;
pub mod state;

pub use error::{Error, Result};
pub use image::Image;
pub use pixel::{
    luminance_skin, PixelFormat, SKIN_LUMA, SKIN_LUMA_B, SKIN_LUMA_G, SKIN_LUMA_R,
};
pub use state::{ColorState, Label, Linear, Srgb};

/// Gamma-encoded 3-channel byte image, as read from disk.
pub type SrgbImage = Image<Srgb, u8, 3>;

/// Linear reflectance image, one f32 triple per pixel, nominally in [0, 1].
pub type ReflectanceImage = Image<Linear, f32, 3>;

/// Single-channel linear-light field (shading ratios, thickness values).
pub type ScalarField = Image<Linear, f32, 1>;

/// Per-pixel multiplicative luminance factors; 1.0 marks a pixel whose
/// luminance equals the reference skin luminance.
pub type ShadingMap = ScalarField;

/// Single-channel label grid used by region growing: 0 = unvisited,
/// 1-254 = filled/feathered content, 255 = boundary marker.
pub type LabelImage = Image<Label, u8, 1>;

/// Boundary marker value in [`LabelImage`] grids. Never overwritten by fills.
pub const BOUNDARY_MARKER: u8 = 255;

/// Largest value a fill or feather pass may write (255 is reserved for the
/// boundary marker).
pub const MAX_FILL_VALUE: u8 = 254;
