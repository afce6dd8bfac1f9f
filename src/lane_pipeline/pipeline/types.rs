//! Pipeline result types

use image::{GrayImage, RgbImage};

use crate::lane_pipeline::common::types::LineSegment;
use crate::lane_pipeline::fitting::types::LaneLines;

/// Result of running the pipeline on one frame
#[derive(Debug, Clone)]
pub struct LaneDetection {
    /// Original frame with the lane lines composited on top
    pub annotated: RgbImage,
    /// Raw segments from the Hough stage
    pub segments: Vec<LineSegment>,
    /// Fitted boundaries, `None` for a side with no usable fit
    pub lanes: LaneLines,
}

/// Every intermediate image of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutputs {
    pub gray: GrayImage,
    pub blurred: GrayImage,
    pub edges: GrayImage,
    pub masked: GrayImage,
    pub segments: Vec<LineSegment>,
    pub lanes: LaneLines,
    /// Lane lines alone on a black canvas
    pub canvas: RgbImage,
    pub annotated: RgbImage,
}

impl StageOutputs {
    pub fn into_detection(self) -> LaneDetection {
        LaneDetection {
            annotated: self.annotated,
            segments: self.segments,
            lanes: self.lanes,
        }
    }
}
