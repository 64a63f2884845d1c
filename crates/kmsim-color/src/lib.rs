//! # kmsim-color
//!
//! Color science for cosmetic layer simulation.
//!
//! # Modules
//!
//! - [`transfer`] - sRGB transfer function (byte and normalized forms) and
//!   whole-image decode/encode between [`SrgbImage`](kmsim_core::SrgbImage)
//!   and [`ReflectanceImage`](kmsim_core::ReflectanceImage)
//! - [`lab`] - CIE XYZ / L\*a\*b\* conversion (D65) and perceptual distance
//! - [`patch`] - infinite-thickness cosmetic reflectance extraction from
//!   swatch images
//!
//! # Example
//!
//! ```
//! use kmsim_color::transfer::{decode, encode};
//!
//! // A mid-gray sRGB byte decodes to roughly 21% reflectance.
//! let r = decode(128);
//! assert!((r - 0.215).abs() < 0.01);
//! assert_eq!(encode(r), 128);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod lab;
pub mod patch;
pub mod transfer;

pub use error::{ColorError, ColorResult};
pub use lab::{delta_e, delta_e_reflectance, Lab, Xyz};
pub use patch::darkest_color;
