//! # kmsim-region
//!
//! Region growing over label grids for cosmetic mask construction.
//!
//! The user draws an enclosing boundary on a single-channel image (boundary
//! pixels = 255, everything else 0). Region growing floods outward from a
//! seed point inside the boundary, assigning each reached pixel a value from
//! a pluggable [`ValueSource`]:
//!
//! - [`ConstantValue`] - a flat mask (every pixel the same value)
//! - [`FeatheredValue`] - a thickness field that falls off toward a drawn
//!   feather line, for soft cosmetic edges
//!
//! # Modules
//!
//! - [`fill`] - the breadth-first 8-connected fill itself
//! - [`feather`] - distance-based feathering and its renormalization pass
//! - [`line`] - boundary-line extraction from red-annotated photographs
//!
//! # Preconditions
//!
//! The boundary must fully enclose the seed. The fill does not attempt to
//! detect an open boundary; if the drawn curve leaks, the fill floods the
//! entire image, which is observable in the output but not an error the
//! library recovers from.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod feather;
pub mod fill;
pub mod line;

pub use error::{RegionError, RegionResult};
pub use feather::FeatheredValue;
pub use fill::{flood_fill, ConstantValue, ValueSource};
pub use line::line_from_red;
