use image::RgbImage;

use crate::lane_pipeline::common::error::Result;

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<RgbImage>;
}
