//! # kmsim-ops
//!
//! Compositing and estimation operations for cosmetic simulation.
//!
//! The pipeline these operations serve: decode a face photograph to linear
//! reflectance, split it into a skin [baseline](skin_baseline) and a
//! [shading map](shading_map), lay a cosmetic over the skin with the
//! [Kubelka-Munk compositor](composite), and [guard](limit_channel_overflow)
//! the result back into display range before encoding.
//!
//! # Modules
//!
//! - [`baseline`] - shading-map construction and skin baseline estimation
//! - [`compositor`] - the Kubelka-Munk layer model
//! - [`guard`] - display-range overflow limiting
//! - [`texture`] - mirrored tiling of patterned cosmetic patches
//! - [`parallel`] - rayon-parallel compositing (feature `parallel`, on by
//!   default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod baseline;
pub mod compositor;
mod error;
pub mod guard;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod texture;

pub use baseline::{shading_map, skin_baseline, synthesize};
pub use compositor::{
    clamp_into_open_unit, composite, CosmeticReflectance, Thickness, MAX_COSMETIC_REFLECTANCE,
    MIN_COSMETIC_REFLECTANCE,
};
pub use error::{OpsError, OpsResult};
pub use guard::limit_channel_overflow;
pub use texture::{resize, tile};
