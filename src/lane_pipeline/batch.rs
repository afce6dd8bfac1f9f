//! Directory batch processing
//!
//! Runs the pipeline over every file in a directory, writing each annotated
//! frame to a primary output directory and a results directory. A failing
//! file is recorded and the run moves on to the next one.

mod driver;
pub mod report;

pub use driver::{BatchOptions, run_batch};
pub use report::{BatchFailure, BatchReport, ProcessedImage};
