use std::io::Write;

use image::{ImageFormat, RgbImage};

use crate::lane_pipeline::common::error::Result;

pub trait ImageWriter {
    fn write_image(&self, image: &RgbImage, output: &mut dyn Write, format: ImageFormat) -> Result<()>;
}
