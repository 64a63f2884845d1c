//! Color-state definitions and compile-time pixel-meaning safety.
//!
//! This module provides the [`ColorState`] trait and marker types describing
//! what the numbers inside an [`Image`](crate::Image) mean.
//!
//! # Design
//!
//! Color states are zero-sized marker types implementing [`ColorState`].
//! They carry no data and exist only at the type level, so mixing up a
//! gamma-encoded image with a linear reflectance image, or a fill-label grid
//! with either, is a compile error instead of a silent numeric bug.
//!
//! # States
//!
//! - [`Srgb`] - gamma-encoded display values (bytes as read from disk)
//! - [`Linear`] - linear-light values: reflectances or luminance ratios
//! - [`Label`] - non-photometric grids: fill values, masks, boundary markers
//!
//! # Usage
//!
//! ```
//! use kmsim_core::{ColorState, Image};
//!
//! fn describe<C: ColorState>(img: &Image<C, f32, 3>) {
//!     println!("image is {}", C::NAME);
//! }
//! ```

use std::fmt;

/// Trait for color-state marker types.
///
/// Provides compile-time information about what an image's channel values
/// represent.
pub trait ColorState: Copy + Clone + Default + Send + Sync + fmt::Debug + 'static {
    /// Human-readable name of the state, used for display and logging.
    const NAME: &'static str;

    /// Whether channel values are linear-light quantities.
    ///
    /// `false` for gamma-encoded display values and for label grids.
    const IS_LINEAR: bool;
}

/// Gamma-encoded sRGB display values (IEC 61966-2-1 transfer function).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Srgb;

impl ColorState for Srgb {
    const NAME: &'static str = "sRGB";
    const IS_LINEAR: bool = false;
}

/// Linear-light values: reflectances in [0, 1] or luminance ratios.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Linear;

impl ColorState for Linear {
    const NAME: &'static str = "Linear";
    const IS_LINEAR: bool = true;
}

/// Non-photometric label values: fill state, masks, boundary markers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Label;

impl ColorState for Label {
    const NAME: &'static str = "Label";
    const IS_LINEAR: bool = false;
}
