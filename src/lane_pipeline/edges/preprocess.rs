use image::{GrayImage, ImageBuffer, Luma, RgbImage};
use imageproc::filter::separable_filter_equal;
use tracing::debug;

/// Luminance conversion from 3-channel color to a single intensity channel.
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}

/// Normalised 1-D Gaussian taps for an odd `kernel_size`.
///
/// Sigma is derived from the size: `0.3 * ((k - 1) / 2 - 1) + 0.8`, which
/// gives 1.4 for the default 7-tap kernel.
pub fn gaussian_kernel(kernel_size: u32) -> Vec<f32> {
    let radius = (kernel_size / 2) as i32;
    let sigma = 0.3 * ((kernel_size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let denom = 2.0 * sigma * sigma;

    let mut taps: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Gaussian smoothing with an exact `kernel_size` x `kernel_size` support.
///
/// Borders are handled by clamping to the nearest edge pixel. Both passes run
/// in `f32` and the result is rounded to `u8` once.
pub fn gaussian_blur(image: &GrayImage, kernel_size: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    if kernel_size <= 1 || width == 0 || height == 0 {
        return image.clone();
    }
    let kernel = gaussian_kernel(kernel_size);
    debug!(kernel_size, ?kernel, "Applying Gaussian blur");

    let samples: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_fn(width, height, |x, y| Luma([f32::from(image.get_pixel(x, y).0[0])]));
    let smoothed = separable_filter_equal(&samples, &kernel);

    GrayImage::from_fn(width, height, |x, y| {
        Luma([smoothed.get_pixel(x, y).0[0].round().clamp(0.0, 255.0) as u8])
    })
}
