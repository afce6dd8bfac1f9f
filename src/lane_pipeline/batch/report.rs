//! Batch outcome types

use std::path::PathBuf;
use std::time::Duration;

use image::RgbImage;
use tracing::{info, warn};

use crate::lane_pipeline::common::error::LaneError;
use crate::lane_pipeline::fitting::types::LaneLines;

/// One successfully processed input
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub input: PathBuf,
    pub primary_output: PathBuf,
    pub results_output: PathBuf,
    pub lanes: LaneLines,
    pub segment_count: usize,
    pub elapsed: Duration,
}

/// One input that could not be processed
#[derive(Debug)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: LaneError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<ProcessedImage>,
    pub failures: Vec<BatchFailure>,
    /// Annotated frame of the last successfully processed input
    pub last_annotated: Option<RgbImage>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.processed.len() + self.failures.len()
    }

    pub fn log_summary(&self) {
        info!(
            processed = self.processed.len(),
            failed = self.failures.len(),
            "Batch complete"
        );
        for failure in &self.failures {
            warn!(input = %failure.input.display(), error = %failure.error, "Batch item failed");
        }
    }
}
