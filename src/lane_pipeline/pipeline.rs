//! Pipeline orchestration
//!
//! Runs the edge, mask, Hough, fitting and rendering stages in order and
//! wires them to image decoding and encoding.

mod lane_line_pipeline;
pub mod types;

pub use lane_line_pipeline::LaneLinePipeline;
pub use types::{LaneDetection, StageOutputs};
