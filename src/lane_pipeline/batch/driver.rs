use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{error, info, instrument};

use crate::lane_pipeline::{
    batch::report::{BatchFailure, BatchReport, ProcessedImage},
    common::error::{LaneError, Result},
    io::{ImageReader, ImageWriter},
    pipeline::LaneLinePipeline,
};

/// Where a batch reads from and writes to
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    /// Receives `<file name>`
    pub primary_dir: PathBuf,
    /// Receives `<results_prefix><file name>`
    pub results_dir: PathBuf,
    pub results_prefix: String,
}

impl BatchOptions {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        primary_dir: impl Into<PathBuf>,
        results_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            primary_dir: primary_dir.into(),
            results_dir: results_dir.into(),
            results_prefix: "processed_".to_string(),
        }
    }

    pub fn results_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.results_prefix = prefix.into();
        self
    }
}

/// Regular files directly inside `dir`, sorted by name.
fn list_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| LaneError::InputReadError(format!("{}: {}", dir.display(), e)))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            inputs.push(entry.path());
        }
    }
    inputs.sort();
    Ok(inputs)
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| LaneError::OutputWriteError(format!("{}: {}", dir.display(), e)))
}

/// Processes every file in `options.input_dir`.
///
/// Only an unreadable input directory or an output directory that cannot be
/// created aborts the run; per-file errors are collected in the report.
#[instrument(skip_all, fields(input_dir = %options.input_dir.display()))]
pub fn run_batch<R: ImageReader, W: ImageWriter>(
    pipeline: &LaneLinePipeline<R, W>,
    options: &BatchOptions,
) -> Result<BatchReport> {
    create_dir(&options.primary_dir)?;
    create_dir(&options.results_dir)?;

    let inputs = list_inputs(&options.input_dir)?;
    info!(files = inputs.len(), "Starting batch");

    let mut report = BatchReport::default();
    for input in inputs {
        let Some(file_name) = input.file_name() else {
            continue;
        };
        let primary_output = options.primary_dir.join(file_name);
        let results_output = options.results_dir.join(format!(
            "{}{}",
            options.results_prefix,
            file_name.to_string_lossy()
        ));

        let started = Instant::now();
        match pipeline.process_file(&input, &[&primary_output, &results_output]) {
            Ok(detection) => {
                info!(output = %results_output.display(), "Wrote annotated image");
                report.processed.push(ProcessedImage {
                    input,
                    primary_output,
                    results_output,
                    lanes: detection.lanes,
                    segment_count: detection.segments.len(),
                    elapsed: started.elapsed(),
                });
                report.last_annotated = Some(detection.annotated);
            }
            Err(error) => {
                error!(input = %input.display(), %error, "Failed to process image");
                report.failures.push(BatchFailure { input, error });
            }
        }
    }

    report.log_summary();
    Ok(report)
}
