//! Canny edge detection on an image that is already smoothed
//!
//! Gradient strength is `|gx| + |gy|` of the 3x3 Sobel responses. Non-maximum
//! suppression keeps a pixel only if it peaks along its quantised gradient
//! direction, and hysteresis grows edges from pixels above the high threshold
//! into 8-connected pixels above the low one. No extra blur is applied.

use image::{GrayImage, Luma};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use tracing::debug;

const TAN_22_5_DEG: f32 = 0.414_213_56;

const NOT_EDGE: u8 = 0;
const CANDIDATE: u8 = 1;
const EDGE: u8 = 2;

/// Sobel responses and L1 magnitude, row-major.
struct Gradients {
    width: usize,
    height: usize,
    gx: Vec<i32>,
    gy: Vec<i32>,
    mag: Vec<i32>,
}

impl Gradients {
    fn sobel(image: &GrayImage) -> Self {
        let gx: Vec<i32> = horizontal_sobel(image)
            .pixels()
            .map(|p| i32::from(p.0[0]))
            .collect();
        let gy: Vec<i32> = vertical_sobel(image)
            .pixels()
            .map(|p| i32::from(p.0[0]))
            .collect();
        let mag = gx.iter().zip(&gy).map(|(x, y)| x.abs() + y.abs()).collect();

        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            gx,
            gy,
            mag,
        }
    }

    /// Magnitude at `(x, y)`, zero outside the image.
    #[inline]
    fn mag_at(&self, x: isize, y: isize) -> i32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.mag[y as usize * self.width + x as usize]
    }

    /// Whether `(x, y)` peaks across the edge.
    ///
    /// Ties along the horizontal and vertical directions keep the first pixel
    /// of a plateau, so a step between two columns yields a one-pixel line.
    fn is_local_max(&self, x: usize, y: usize) -> bool {
        let i = y * self.width + x;
        let m = self.mag[i];
        let (gx, gy) = (self.gx[i], self.gy[i]);
        let (ax, ay) = (gx.abs() as f32, gy.abs() as f32);
        let (x, y) = (x as isize, y as isize);

        if ay <= ax * TAN_22_5_DEG {
            m > self.mag_at(x - 1, y) && m >= self.mag_at(x + 1, y)
        } else if ax <= ay * TAN_22_5_DEG {
            m > self.mag_at(x, y - 1) && m >= self.mag_at(x, y + 1)
        } else {
            // the gradient points down-right or up-left when both signs agree
            let s = if (gx < 0) == (gy < 0) { 1 } else { -1 };
            m > self.mag_at(x - s, y - 1) && m > self.mag_at(x + s, y + 1)
        }
    }
}

/// Canny edge map: 255 on edges, 0 elsewhere.
///
/// Pixels whose magnitude exceeds `high_threshold` seed edges; pixels above
/// `low_threshold` are kept only when connected to a seed.
pub fn detect_edges(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return GrayImage::new(width, height);
    }

    let grad = Gradients::sobel(image);
    let (w, h) = (grad.width, grad.height);
    let mut state = vec![NOT_EDGE; w * h];
    let mut stack = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            let m = grad.mag[i] as f32;
            if m <= low_threshold || !grad.is_local_max(x, y) {
                continue;
            }
            if m > high_threshold {
                state[i] = EDGE;
                stack.push((x, y));
            } else {
                state[i] = CANDIDATE;
            }
        }
    }
    let seeds = stack.len();

    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let j = ny * w + nx;
                if state[j] == CANDIDATE {
                    state[j] = EDGE;
                    stack.push((nx, ny));
                }
            }
        }
    }

    let edges = GrayImage::from_fn(width, height, |x, y| {
        if state[y as usize * w + x as usize] == EDGE {
            Luma([u8::MAX])
        } else {
            Luma([0])
        }
    });
    debug!(
        seeds,
        edge_pixels = state.iter().filter(|&&s| s == EDGE).count(),
        "Canny complete"
    );
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane_pipeline::edges::gaussian_blur;

    #[test]
    fn blank_image_has_no_edges() {
        let edges = detect_edges(&GrayImage::from_pixel(64, 48, Luma([90])), 45.0, 135.0);
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn vertical_step_gives_one_column_without_extra_smoothing() {
        // Sobel |gx| is 4 * 60 = 240 on columns 31 and 32
        let gray = GrayImage::from_fn(64, 40, |x, _| if x >= 32 { Luma([160]) } else { Luma([100]) });
        let edges = detect_edges(&gray, 45.0, 135.0);

        for (x, y, p) in edges.enumerate_pixels() {
            let expected = if x == 31 { 255 } else { 0 };
            assert_eq!(p.0[0], expected, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn faint_diagonal_border_is_found_after_blur() {
        // contrast 70 along y = 0.5 x + 40; the L1 gradient peaks near 200
        let gray = GrayImage::from_fn(200, 200, |x, y| {
            if y as f32 > 0.5 * x as f32 + 40.0 {
                Luma([170])
            } else {
                Luma([100])
            }
        });
        let edges = detect_edges(&gaussian_blur(&gray, 7), 45.0, 135.0);

        let found: Vec<(u32, u32)> = edges
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] == 255)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(found.len() >= 100, "only {} edge pixels", found.len());
        for (x, y) in found {
            let on_line = 0.5 * x as f32 + 40.0;
            assert!((y as f32 - on_line).abs() <= 3.0, "stray edge at ({x}, {y})");
        }
    }

    #[test]
    fn weak_edges_survive_only_when_linked_to_strong_ones() {
        // contrast fades from 40 (|gx| 160) at the top to 20 (|gx| 80) at the bottom
        let fading = GrayImage::from_fn(64, 64, |x, y| {
            if x >= 32 {
                Luma([100 + (40 - 20 * y / 63) as u8])
            } else {
                Luma([100])
            }
        });
        let edges = detect_edges(&fading, 45.0, 135.0);
        for y in 0..64 {
            assert!(
                (31..=32).any(|x| edges.get_pixel(x, y).0[0] == 255),
                "row {y} lost its edge"
            );
        }

        let weak = GrayImage::from_fn(64, 64, |x, _| if x >= 32 { Luma([120]) } else { Luma([100]) });
        let edges = detect_edges(&weak, 45.0, 135.0);
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }
}
