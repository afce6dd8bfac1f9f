//! Line segment detection
//!
//! Progressive probabilistic Hough transform over a binary edge map.

mod probabilistic;
pub mod types;

pub use probabilistic::detect_segments;
pub use types::HoughParams;
