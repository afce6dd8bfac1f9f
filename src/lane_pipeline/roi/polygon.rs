//! Trapezoid definition for the region of interest

use imageproc::point::Point;

/// Masking trapezoid.
///
/// The bottom corners follow the frame: `(0, H)` and `(W, H)`. The two top
/// corners are absolute pixel positions and are not scaled with the frame
/// width, so the defaults only line up with 960x540 footage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoiPolygon {
    /// Upper-left vertex `(x, y)`
    pub top_left: (i32, i32),
    /// Upper-right vertex `(x, y)`
    pub top_right: (i32, i32),
}

impl Default for RoiPolygon {
    fn default() -> Self {
        Self {
            top_left: (400, 350),
            top_right: (550, 350),
        }
    }
}

impl RoiPolygon {
    pub fn new(top_left: (i32, i32), top_right: (i32, i32)) -> Self {
        Self { top_left, top_right }
    }

    /// Vertices in drawing order for a `width` x `height` frame:
    /// bottom-left, top-left, top-right, bottom-right.
    pub fn vertices(&self, width: u32, height: u32) -> [(i32, i32); 4] {
        let w = width as i32;
        let h = height as i32;
        [(0, h), self.top_left, self.top_right, (w, h)]
    }

    pub(crate) fn points(&self, width: u32, height: u32) -> Vec<Point<i32>> {
        self.vertices(width, height)
            .iter()
            .map(|&(x, y)| Point::new(x, y))
            .collect()
    }
}
