//! Region-of-interest masking
//!
//! Keeps only the trapezoid in front of the vehicle and zeroes the rest of an
//! edge map before line detection.

mod mask;
pub mod polygon;

pub use mask::apply_region_mask;
pub use polygon::RoiPolygon;
