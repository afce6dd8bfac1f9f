use std::io::{Cursor, Write};

use image::{ImageFormat, RgbImage};
use tracing::debug;

use crate::lane_pipeline::common::error::{LaneError, Result};
use crate::lane_pipeline::io::writer::ImageWriter;

pub struct ImageCrateWriter;

impl ImageWriter for ImageCrateWriter {
    fn write_image(&self, image: &RgbImage, output: &mut dyn Write, format: ImageFormat) -> Result<()> {
        debug!("Encoding {:?} image: {}x{}", format, image.width(), image.height());

        // encoders need Seek, so go through a buffer
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, format)
            .map_err(|e| LaneError::EncodeError(e.to_string()))?;

        output.write_all(buffer.get_ref())?;

        debug!("Encoding complete, {} bytes", buffer.get_ref().len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn png_output_decodes_back() {
        let src = RgbImage::from_pixel(5, 7, Rgb([200, 10, 10]));
        let mut out = Vec::new();
        ImageCrateWriter
            .write_image(&src, &mut out, ImageFormat::Png)
            .unwrap();

        let decoded = image::load_from_memory(&out).unwrap().into_rgb8();
        assert_eq!(decoded, src);
    }
}
