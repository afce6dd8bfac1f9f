use image::RgbImage;

use crate::lane_pipeline::common::error::{LaneError, Result};

/// Weights for `original * alpha + overlay * beta + gamma`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            alpha: 0.8,
            beta: 1.0,
            gamma: 0.0,
        }
    }
}

/// Per-channel weighted sum of `original` and `overlay`, rounded and
/// saturated to `0..=255`. Both images must have the same dimensions.
pub fn blend(original: &RgbImage, overlay: &RgbImage, weights: BlendWeights) -> Result<RgbImage> {
    if original.dimensions() != overlay.dimensions() {
        let (expected_width, expected_height) = original.dimensions();
        let (actual_width, actual_height) = overlay.dimensions();
        return Err(LaneError::DimensionMismatch {
            expected_width,
            expected_height,
            actual_width,
            actual_height,
        });
    }

    let (width, height) = original.dimensions();
    let data = original
        .as_raw()
        .iter()
        .zip(overlay.as_raw())
        .map(|(&o, &l)| {
            let v = f32::from(o) * weights.alpha + f32::from(l) * weights.beta + weights.gamma;
            v.round().clamp(0.0, 255.0) as u8
        })
        .collect();

    RgbImage::from_raw(width, height, data).ok_or(LaneError::InvalidDimensions(
        width as usize,
        height as usize,
    ))
}
