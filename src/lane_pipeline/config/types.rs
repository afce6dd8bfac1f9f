//! Lane pipeline configuration types

use image::Rgb;

use crate::lane_pipeline::common::error::{LaneError, Result};
use crate::lane_pipeline::hough::types::HoughParams;
use crate::lane_pipeline::render::BlendWeights;
use crate::lane_pipeline::roi::polygon::RoiPolygon;

/// Configuration for lane line detection
#[derive(Debug, Clone)]
pub struct LaneConfig {
    /// Gaussian kernel size, must be odd
    pub kernel_size: u32,
    /// Canny hysteresis low threshold
    pub canny_low: f32,
    /// Canny hysteresis high threshold
    pub canny_high: f32,
    /// Region kept before line detection
    pub roi: RoiPolygon,
    /// Probabilistic Hough parameters
    pub hough: HoughParams,
    /// Segments with `|slope|` at or below this are ignored
    pub slope_threshold: f64,
    /// Row where drawn lane lines start
    pub y_top: i32,
    /// Row where drawn lane lines end
    pub y_bottom: i32,
    /// Lane line color
    pub line_color: Rgb<u8>,
    /// Lane line thickness in pixels
    pub line_thickness: u32,
    /// Compositing weights for original and overlay
    pub blend: BlendWeights,
    /// Whether to reject empty or oversized input before processing
    pub validate_dimensions: bool,
    /// Largest accepted width or height when validating
    pub max_dimension: Option<u32>,
}

const DEFAULT_CANNY_LOW: f32 = 45.0;

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            kernel_size: 7,
            canny_low: DEFAULT_CANNY_LOW,
            canny_high: DEFAULT_CANNY_LOW * 3.0,
            roi: RoiPolygon::default(),
            hough: HoughParams::default(),
            slope_threshold: 0.2,
            y_top: 350,
            y_bottom: 540,
            line_color: Rgb([255, 0, 0]),
            line_thickness: 10,
            blend: BlendWeights::default(),
            validate_dimensions: true,
            max_dimension: Some(16384),
        }
    }
}

impl LaneConfig {
    pub fn builder() -> LaneConfigBuilder {
        LaneConfigBuilder::default()
    }

    /// Rejects settings the stages cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(LaneError::InvalidConfig(format!(
                "kernel size must be odd, got {}",
                self.kernel_size
            )));
        }
        if !(self.canny_low >= 0.0 && self.canny_low <= self.canny_high) {
            return Err(LaneError::InvalidConfig(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {} / {}",
                self.canny_low, self.canny_high
            )));
        }
        if !(self.hough.rho > 0.0 && self.hough.theta > 0.0) {
            return Err(LaneError::InvalidConfig(
                "hough rho and theta must be positive".to_string(),
            ));
        }
        if !(self.slope_threshold >= 0.0) {
            return Err(LaneError::InvalidConfig(format!(
                "slope threshold must be non-negative, got {}",
                self.slope_threshold
            )));
        }
        if self.y_top == self.y_bottom {
            return Err(LaneError::InvalidConfig(
                "lane line rows must differ".to_string(),
            ));
        }
        if self.line_thickness == 0 {
            return Err(LaneError::InvalidConfig(
                "line thickness must be at least 1".to_string(),
            ));
        }
        let BlendWeights { alpha, beta, gamma } = self.blend;
        if ![alpha, beta, gamma].iter().all(|w| w.is_finite()) {
            return Err(LaneError::InvalidConfig(
                "blend weights must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for LaneConfig
#[derive(Default)]
pub struct LaneConfigBuilder {
    kernel_size: Option<u32>,
    canny_thresholds: Option<(f32, f32)>,
    roi: Option<RoiPolygon>,
    hough: Option<HoughParams>,
    slope_threshold: Option<f64>,
    y_range: Option<(i32, i32)>,
    line_color: Option<Rgb<u8>>,
    line_thickness: Option<u32>,
    blend: Option<BlendWeights>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
}

impl LaneConfigBuilder {
    pub fn kernel_size(mut self, size: u32) -> Self {
        self.kernel_size = Some(size);
        self
    }

    pub fn canny_thresholds(mut self, low: f32, high: f32) -> Self {
        self.canny_thresholds = Some((low, high));
        self
    }

    pub fn roi(mut self, roi: RoiPolygon) -> Self {
        self.roi = Some(roi);
        self
    }

    pub fn hough(mut self, params: HoughParams) -> Self {
        self.hough = Some(params);
        self
    }

    pub fn slope_threshold(mut self, threshold: f64) -> Self {
        self.slope_threshold = Some(threshold);
        self
    }

    pub fn y_range(mut self, top: i32, bottom: i32) -> Self {
        self.y_range = Some((top, bottom));
        self
    }

    pub fn line_color(mut self, color: Rgb<u8>) -> Self {
        self.line_color = Some(color);
        self
    }

    pub fn line_thickness(mut self, thickness: u32) -> Self {
        self.line_thickness = Some(thickness);
        self
    }

    pub fn blend(mut self, weights: BlendWeights) -> Self {
        self.blend = Some(weights);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> LaneConfig {
        let default = LaneConfig::default();
        let (canny_low, canny_high) = self
            .canny_thresholds
            .unwrap_or((default.canny_low, default.canny_high));
        let (y_top, y_bottom) = self.y_range.unwrap_or((default.y_top, default.y_bottom));
        LaneConfig {
            kernel_size: self.kernel_size.unwrap_or(default.kernel_size),
            canny_low,
            canny_high,
            roi: self.roi.unwrap_or(default.roi),
            hough: self.hough.unwrap_or(default.hough),
            slope_threshold: self.slope_threshold.unwrap_or(default.slope_threshold),
            y_top,
            y_bottom,
            line_color: self.line_color.unwrap_or(default.line_color),
            line_thickness: self.line_thickness.unwrap_or(default.line_thickness),
            blend: self.blend.unwrap_or(default.blend),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_constants() {
        let config = LaneConfig::default();
        assert_eq!(config.kernel_size, 7);
        assert_eq!(config.canny_low, 45.0);
        assert_eq!(config.canny_high, 135.0);
        assert_eq!(config.hough.threshold, 20);
        assert_eq!(config.hough.min_line_length, 30);
        assert_eq!(config.hough.max_line_gap, 60);
        assert_eq!((config.y_top, config.y_bottom), (350, 540));
        assert_eq!(config.line_thickness, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides_selected_fields() {
        let config = LaneConfig::builder()
            .kernel_size(5)
            .canny_thresholds(50.0, 150.0)
            .y_range(300, 480)
            .validate_dimensions(false)
            .max_dimension(None)
            .build();

        assert_eq!(config.kernel_size, 5);
        assert_eq!((config.canny_low, config.canny_high), (50.0, 150.0));
        assert_eq!((config.y_top, config.y_bottom), (300, 480));
        assert!(!config.validate_dimensions);
        assert_eq!(config.max_dimension, None);
        assert_eq!(config.slope_threshold, 0.2);
    }

    #[test]
    fn even_kernel_is_rejected() {
        let config = LaneConfig::builder().kernel_size(6).build();
        assert!(matches!(config.validate(), Err(LaneError::InvalidConfig(_))));
    }

    #[test]
    fn inverted_canny_thresholds_are_rejected() {
        let config = LaneConfig::builder().canny_thresholds(100.0, 20.0).build();
        assert!(matches!(config.validate(), Err(LaneError::InvalidConfig(_))));
    }

    #[test]
    fn equal_rows_are_rejected() {
        let config = LaneConfig::builder().y_range(400, 400).build();
        assert!(config.validate().is_err());
    }
}
