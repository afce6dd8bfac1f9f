use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use tracing::debug;

use crate::lane_pipeline::roi::polygon::RoiPolygon;

/// Zero every pixel of `image` that falls outside `roi`.
///
/// The polygon is rasterised into a fresh mask and ANDed with the input, so
/// the input itself is left untouched.
pub fn apply_region_mask(image: &GrayImage, roi: &RoiPolygon) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut mask = GrayImage::new(width, height);

    let points = roi.points(width, height);
    // draw_polygon_mut refuses a closed polygon (first == last)
    if points.first() != points.last() {
        draw_polygon_mut(&mut mask, &points, Luma([u8::MAX]));
    }
    debug!(?points, "Region mask rasterised");

    let mut masked = GrayImage::new(width, height);
    for ((out, src), keep) in masked
        .pixels_mut()
        .zip(image.pixels())
        .zip(mask.pixels())
    {
        out.0[0] = src.0[0] & keep.0[0];
    }
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Signed area test of `p` against the directed edge `a -> b`.
    fn cross(a: (i32, i32), b: (i32, i32), p: (f64, f64)) -> f64 {
        let (ax, ay) = (f64::from(a.0), f64::from(a.1));
        let (bx, by) = (f64::from(b.0), f64::from(b.1));
        (bx - ax) * (p.1 - ay) - (by - ay) * (p.0 - ax)
    }

    /// Distance-signed check that `p` is more than `margin` pixels outside
    /// the convex polygon.
    fn clearly_outside(vertices: &[(i32, i32); 4], p: (f64, f64), margin: f64) -> bool {
        (0..4).any(|i| {
            let a = vertices[i];
            let b = vertices[(i + 1) % 4];
            let len = f64::from(b.0 - a.0).hypot(f64::from(b.1 - a.1));
            // vertices run clockwise on screen, so outside is negative
            cross(a, b, p) / len < -margin
        })
    }

    #[test]
    fn pixels_outside_trapezoid_are_zeroed() {
        let (w, h) = (960, 540);
        let edges = GrayImage::from_pixel(w, h, Luma([255]));
        let roi = RoiPolygon::default();
        let masked = apply_region_mask(&edges, &roi);
        let vertices = roi.vertices(w, h);

        // scanline ends and outline pixels are rounded to the nearest pixel,
        // so the painted boundary reaches at most half a pixel past an edge
        for (x, y, px) in masked.enumerate_pixels() {
            if clearly_outside(&vertices, (f64::from(x), f64::from(y)), 0.5) {
                assert_eq!(px.0[0], 0, "pixel ({x}, {y}) should be masked");
            }
        }
    }

    #[test]
    fn everything_above_top_edge_is_zero() {
        let edges = GrayImage::from_pixel(960, 540, Luma([255]));
        let masked = apply_region_mask(&edges, &RoiPolygon::default());
        for y in 0..349 {
            for x in 0..960 {
                assert_eq!(masked.get_pixel(x, y).0[0], 0);
            }
        }
    }

    #[test]
    fn pixels_inside_trapezoid_survive() {
        let mut edges = GrayImage::new(960, 540);
        edges.put_pixel(475, 400, Luma([255]));
        edges.put_pixel(480, 530, Luma([255]));
        edges.put_pixel(10, 100, Luma([255]));

        let masked = apply_region_mask(&edges, &RoiPolygon::default());
        assert_eq!(masked.get_pixel(475, 400).0[0], 255);
        assert_eq!(masked.get_pixel(480, 530).0[0], 255);
        assert_eq!(masked.get_pixel(10, 100).0[0], 0);
    }

    #[test]
    fn input_is_not_modified() {
        let edges = GrayImage::from_pixel(100, 100, Luma([255]));
        let before = edges.clone();
        let _ = apply_region_mask(&edges, &RoiPolygon::default());
        assert_eq!(edges, before);
    }
}
