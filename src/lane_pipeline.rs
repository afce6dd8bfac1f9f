//! Lane line detection pipeline
//!
//! Finds the two straight lane boundaries in a road image with a classical
//! pipeline (grayscale, blur, Canny, region mask, probabilistic Hough,
//! slope bucketing, least-squares fit) and overlays them on the frame.

pub mod batch;
pub mod common;
pub mod config;
pub mod edges;
pub mod fitting;
pub mod hough;
pub mod io;
pub mod pipeline;
pub mod render;
pub mod roi;
pub mod timing;


pub use common::{LaneError, LineSegment, Result};

pub use config::{LaneConfig, LaneConfigBuilder};

pub use fitting::{DegenerateFit, FittedLine, LaneLines, LaneSide};

pub use hough::HoughParams;

pub use io::{ImageCrateReader, ImageCrateWriter, ImageReader, ImageWriter};

pub use pipeline::{LaneDetection, LaneLinePipeline, StageOutputs};

pub use render::BlendWeights;

pub use roi::RoiPolygon;

pub use batch::{BatchFailure, BatchOptions, BatchReport, ProcessedImage, run_batch};

pub use timing::{PipelineTimings, StepTiming, Timer};
