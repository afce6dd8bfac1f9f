use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

use crate::lane_pipeline::common::types::LineSegment;
use crate::lane_pipeline::fitting::types::LaneLines;

/// Draws `segment` `thickness` pixels wide with round caps.
///
/// Coordinates outside the canvas are clipped.
pub fn draw_thick_line_mut(canvas: &mut RgbImage, segment: LineSegment, thickness: u32, color: Rgb<u8>) {
    let (x1, y1) = (segment.x1 as f32, segment.y1 as f32);
    let (x2, y2) = (segment.x2 as f32, segment.y2 as f32);

    if thickness <= 1 {
        draw_line_segment_mut(canvas, (x1, y1), (x2, y2), color);
        return;
    }

    let half = thickness as f32 / 2.0;
    let length = segment.length() as f32;
    if length >= 1.0 {
        let nx = -(y2 - y1) / length * half;
        let ny = (x2 - x1) / length * half;
        let corners = [
            (x1 + nx, y1 + ny),
            (x2 + nx, y2 + ny),
            (x2 - nx, y2 - ny),
            (x1 - nx, y1 - ny),
        ];
        let poly: Vec<Point<i32>> = corners
            .iter()
            .map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32))
            .collect();
        if poly.first() != poly.last() {
            draw_polygon_mut(canvas, &poly, color);
        }
    }

    let radius = (thickness / 2) as i32;
    draw_filled_circle_mut(canvas, (segment.x1, segment.y1), radius, color);
    draw_filled_circle_mut(canvas, (segment.x2, segment.y2), radius, color);
}

/// Fresh all-black canvas of `width` x `height` with the present lane lines
/// drawn on it.
pub fn draw_lane_lines(width: u32, height: u32, lanes: &LaneLines, thickness: u32, color: Rgb<u8>) -> RgbImage {
    let mut canvas = RgbImage::new(width, height);
    for segment in lanes.iter() {
        draw_thick_line_mut(&mut canvas, segment, thickness, color);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn absent_lines_leave_canvas_black() {
        let canvas = draw_lane_lines(64, 64, &LaneLines::default(), 10, RED);
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn thick_line_covers_its_width() {
        let lanes = LaneLines {
            positive: Some(LineSegment::new(10, 50, 90, 50)),
            negative: None,
        };
        let canvas = draw_lane_lines(100, 100, &lanes, 10, RED);

        for dy in -4..=4 {
            assert_eq!(*canvas.get_pixel(50, (50 + dy) as u32), RED, "row offset {dy}");
        }
        assert_eq!(canvas.get_pixel(50, 60).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(50, 40).0, [0, 0, 0]);
        // round cap
        assert_eq!(*canvas.get_pixel(7, 50), RED);
    }

    #[test]
    fn offscreen_endpoints_are_clipped() {
        let lanes = LaneLines {
            positive: Some(LineSegment::new(-200, 350, 1400, 540)),
            negative: Some(LineSegment::new(900, 350, -300, 540)),
        };
        let canvas = draw_lane_lines(960, 540, &lanes, 10, RED);
        assert!(canvas.pixels().any(|p| *p == RED));
    }
}
