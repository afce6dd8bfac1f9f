use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use lane_lines_rs::lane_pipeline::{BatchOptions, LaneConfig, LaneLinePipeline, run_batch};
use lane_lines_rs::logger;

use tracing::{info, warn};

const DEFAULT_INPUT_DIR: &str = "sample-images/";
const DEFAULT_PRIMARY_DIR: &str = "output-images/";
const DEFAULT_RESULTS_DIR: &str = "test_images_results/";

/// `lane_lines_rs [input_dir] [primary_dir] [results_dir]`
fn main() -> anyhow::Result<ExitCode> {
    logger::init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let input_dir = args.next().unwrap_or_else(|| DEFAULT_INPUT_DIR.into());
    let primary_dir = args.next().unwrap_or_else(|| DEFAULT_PRIMARY_DIR.into());
    let results_dir = args.next().unwrap_or_else(|| DEFAULT_RESULTS_DIR.into());

    info!("Starting lane line detection...");

    let config = LaneConfig::default();
    let pipeline = LaneLinePipeline::new(config).context("invalid pipeline configuration")?;

    info!(
        kernel_size = pipeline.config().kernel_size,
        canny_low = pipeline.config().canny_low,
        canny_high = pipeline.config().canny_high,
        "Lane pipeline initialized"
    );

    let options = BatchOptions::new(&input_dir, &primary_dir, &results_dir);
    let report = run_batch(&pipeline, &options)
        .with_context(|| format!("batch over {} failed", input_dir.display()))?;

    for item in &report.processed {
        info!(
            output = %item.results_output.display(),
            lanes = item.lanes.count(),
            ms = item.elapsed.as_secs_f64() * 1000.0,
            "Processed"
        );
    }

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!(failed = report.failures.len(), total = report.total(), "Some images failed");
        Ok(ExitCode::FAILURE)
    }
}
