//! Pipeline configuration
//!
//! Every tunable of the lane pipeline lives in [`LaneConfig`]; defaults match
//! the 960x540 dash-camera footage the constants were tuned on.

pub mod types;

pub use types::{LaneConfig, LaneConfigBuilder};
