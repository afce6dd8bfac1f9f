//! Lane line fitting
//!
//! Splits detected segments into left/right buckets by slope sign and fits
//! one straight boundary per bucket by least squares.

mod classify;
mod least_squares;
pub mod types;

pub use classify::SlopeBuckets;
pub use least_squares::{fit_lanes, fit_line};
pub use types::{DegenerateFit, FittedLine, LaneLines, LaneSide};
