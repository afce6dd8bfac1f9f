//! Common utilities module
//!
//! Error type and the small geometric types shared by every stage.

pub mod error;
pub mod types;

pub use error::{LaneError, Result};
pub use types::LineSegment;
