//! Edge extraction stages
//!
//! Grayscale conversion, fixed-size Gaussian smoothing and Canny edge
//! detection. Each stage returns a freshly allocated image.

mod canny;
mod preprocess;

pub use canny::detect_edges;
pub use preprocess::{gaussian_blur, gaussian_kernel, to_grayscale};
