//! Color image reader backed by the `image` crate.

use tracing::debug;

use image::RgbImage;

use crate::lane_pipeline::common::error::{LaneError, Result};
use crate::lane_pipeline::io::reader::ImageReader;

/// Decodes any format the `image` crate recognises (PNG, JPEG, BMP, TIFF, ...).
///
/// Images with fewer than three channels are refused: the pipeline overlays
/// colored lines on the original frame, so a grayscale source is treated as
/// malformed input. An alpha channel, if present, is dropped.
pub struct ImageCrateReader;

const COLOR_CHANNELS: u8 = 3;

impl ImageReader for ImageCrateReader {
    fn read_image(&self, data: &[u8]) -> Result<RgbImage> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded =
            image::load_from_memory(data).map_err(|e| LaneError::DecodeError(e.to_string()))?;

        let color = decoded.color();
        if color.channel_count() < COLOR_CHANNELS {
            return Err(LaneError::UnsupportedFormat(format!(
                "expected a color image, got {:?}",
                color
            )));
        }

        debug!(
            "Decoded image: {}x{} ({:?})",
            decoded.width(),
            decoded.height(),
            color
        );
        Ok(decoded.into_rgb8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageFormat, Rgb, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(image: impl Into<DynamicImage>) -> Vec<u8> {
        let image: DynamicImage = image.into();
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn decodes_rgb_png() {
        let src = RgbImage::from_pixel(6, 4, Rgb([1, 2, 3]));
        let img = ImageCrateReader.read_image(&encode_png(src.clone())).unwrap();
        assert_eq!(img, src);
    }

    #[test]
    fn drops_alpha_channel() {
        let src = RgbaImage::from_pixel(3, 3, Rgba([9, 8, 7, 128]));
        let img = ImageCrateReader.read_image(&encode_png(src)).unwrap();
        assert_eq!(img.get_pixel(1, 1).0, [9, 8, 7]);
    }

    #[test]
    fn rejects_grayscale() {
        let src = GrayImage::new(4, 4);
        let err = ImageCrateReader.read_image(&encode_png(src)).unwrap_err();
        assert!(matches!(err, LaneError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_garbage() {
        let err = ImageCrateReader.read_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, LaneError::DecodeError(_)));
    }
}
