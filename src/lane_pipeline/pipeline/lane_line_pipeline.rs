use std::io::Write;
use std::path::Path;

use image::{ImageFormat, RgbImage};
use tracing::{debug, info, instrument, warn};

use crate::lane_pipeline::{
    common::error::{LaneError, Result},
    config::LaneConfig,
    edges::{detect_edges, gaussian_blur, to_grayscale},
    fitting::fit_lanes,
    hough::detect_segments,
    io::{ImageCrateReader, ImageCrateWriter, ImageReader, ImageWriter},
    pipeline::types::{LaneDetection, StageOutputs},
    render::{blend, draw_lane_lines},
    roi::apply_region_mask,
    timing::PipelineTimings,
};

/// Lane line detector for single still frames.
///
/// Holds only configuration and a stateless reader/writer pair, so one value
/// can be reused for any number of frames.
pub struct LaneLinePipeline<R: ImageReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: LaneConfig,
}

impl LaneLinePipeline<ImageCrateReader, ImageCrateWriter> {
    pub fn new(config: LaneConfig) -> Result<Self> {
        Self::with_custom(ImageCrateReader, ImageCrateWriter, config)
    }
}

impl<R: ImageReader, W: ImageWriter> LaneLinePipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: LaneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            writer,
            config,
        })
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(LaneError::InvalidDimensions(width as usize, height as usize));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(width, height, max, "Image dimensions exceed maximum");
                return Err(LaneError::InvalidDimensions(width as usize, height as usize));
            }
        }

        Ok(())
    }

    fn run_timed(&self, image: &RgbImage, timings: &mut PipelineTimings) -> Result<StageOutputs> {
        let (width, height) = image.dimensions();
        {
            let _span = tracing::info_span!("validate_dimensions", width, height).entered();
            self.validate_dimensions(width, height)?;
        }
        let config = &self.config;

        let gray = {
            let _span = tracing::info_span!("grayscale").entered();
            timings.time("grayscale", || to_grayscale(image))
        };

        let blurred = {
            let _span = tracing::info_span!("gaussian_blur", kernel_size = config.kernel_size).entered();
            timings.time("gaussian_blur", || gaussian_blur(&gray, config.kernel_size))
        };

        let edges = {
            let _span = tracing::info_span!("canny").entered();
            timings.time("canny", || {
                detect_edges(&blurred, config.canny_low, config.canny_high)
            })
        };

        let masked = {
            let _span = tracing::info_span!("region_mask").entered();
            timings.time("region_mask", || apply_region_mask(&edges, &config.roi))
        };

        let segments = {
            let _span = tracing::info_span!("hough").entered();
            timings.time("hough", || detect_segments(&masked, &config.hough))
        };
        debug!(segments = segments.len(), "Line segments detected");

        let lanes = {
            let _span = tracing::info_span!("fit_lanes").entered();
            timings.time("fit_lanes", || {
                fit_lanes(&segments, config.slope_threshold, config.y_top, config.y_bottom)
            })
        };

        let canvas = {
            let _span = tracing::info_span!("draw_lines").entered();
            timings.time("draw_lines", || {
                draw_lane_lines(width, height, &lanes, config.line_thickness, config.line_color)
            })
        };

        let annotated = {
            let _span = tracing::info_span!("blend").entered();
            timings.time("blend", || blend(image, &canvas, config.blend))?
        };

        Ok(StageOutputs {
            gray,
            blurred,
            edges,
            masked,
            segments,
            lanes,
            canvas,
            annotated,
        })
    }

    /// Runs every stage and keeps all intermediate images.
    pub fn run_stages(&self, image: &RgbImage) -> Result<StageOutputs> {
        self.run_timed(image, &mut PipelineTimings::new())
    }

    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn process(&self, image: &RgbImage) -> Result<LaneDetection> {
        let detection = self.run_stages(image)?.into_detection();
        info!(
            segments = detection.segments.len(),
            lanes = detection.lanes.count(),
            "Lane detection complete"
        );
        Ok(detection)
    }

    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn process_with_timings(&self, image: &RgbImage) -> Result<(LaneDetection, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let detection = self.run_timed(image, &mut timings)?.into_detection();
        info!(
            segments = detection.segments.len(),
            lanes = detection.lanes.count(),
            total_ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Lane detection complete"
        );
        Ok((detection, timings))
    }

    /// Decodes `input_data`, runs the pipeline and encodes the annotated
    /// frame to `output` as `format`.
    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn process_bytes(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
        format: ImageFormat,
    ) -> Result<LaneDetection> {
        let image = {
            let _span = tracing::info_span!("decode").entered();
            self.reader.read_image(input_data)?
        };

        let detection = self.process(&image)?;

        {
            let _span = tracing::info_span!("encode").entered();
            self.writer.write_image(&detection.annotated, output, format)?;
        }

        Ok(detection)
    }

    /// Processes `input_path` and writes the annotated frame to every path in
    /// `output_paths`, each encoded according to its extension.
    #[instrument(skip(self, input_path, output_paths))]
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_paths: &[Q],
    ) -> Result<LaneDetection> {
        let input_path = input_path.as_ref();
        info!(input = %input_path.display(), outputs = output_paths.len(), "Processing file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                LaneError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let image = {
            let _span = tracing::info_span!("decode").entered();
            self.reader.read_image(&input_data)?
        };

        let (detection, timings) = self.process_with_timings(&image)?;
        timings.log_summary();

        for output_path in output_paths {
            let output_path = output_path.as_ref();
            let _span = tracing::info_span!("write_output_file", output = %output_path.display()).entered();

            let format = ImageFormat::from_path(output_path).map_err(|e| {
                LaneError::UnsupportedFormat(format!("{}: {}", output_path.display(), e))
            })?;
            let mut output_file = std::fs::File::create(output_path).map_err(|e| {
                LaneError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
            self.writer.write_image(&detection.annotated, &mut output_file, format)?;
        }

        Ok(detection)
    }

    pub fn config(&self) -> &LaneConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LaneConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}
