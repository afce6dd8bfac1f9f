use tracing::debug;

use crate::lane_pipeline::common::types::LineSegment;
use crate::lane_pipeline::fitting::classify::SlopeBuckets;
use crate::lane_pipeline::fitting::types::{DegenerateFit, FittedLine, LaneLines, LaneSide};

/// Ordinary least-squares fit of `y = m * x + c`, minimising vertical
/// residuals.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Result<FittedLine, DegenerateFit> {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return Err(DegenerateFit::EmptyBucket);
    }

    // centre on the mean to keep the normal equations well conditioned
    let count = n as f64;
    let mean_x = xs[..n].iter().sum::<f64>() / count;
    let mean_y = ys[..n].iter().sum::<f64>() / count;

    let (sxx, sxy) = xs[..n]
        .iter()
        .zip(&ys[..n])
        .fold((0.0, 0.0), |(sxx, sxy), (&x, &y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });

    if sxx == 0.0 {
        return Err(DegenerateFit::VerticalFit);
    }

    let slope = sxy / sxx;
    Ok(FittedLine {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Buckets `segments` by slope and fits one boundary per bucket, each
/// spanning rows `y_top..=y_bottom`. A side with no usable fit is `None`.
pub fn fit_lanes(segments: &[LineSegment], slope_threshold: f64, y_top: i32, y_bottom: i32) -> LaneLines {
    let buckets = SlopeBuckets::classify(segments, slope_threshold);

    let fit_side = |side: LaneSide| {
        let (xs, ys) = buckets.points(side);
        match fit_line(xs, ys).and_then(|line| line.span(y_top, y_bottom)) {
            Ok(segment) => {
                debug!(?side, points = xs.len(), ?segment, "Lane line fitted");
                Some(segment)
            }
            Err(reason) => {
                debug!(?side, points = xs.len(), %reason, "No lane line for this side");
                None
            }
        }
    };

    LaneLines {
        positive: fit_side(LaneSide::Positive),
        negative: fit_side(LaneSide::Negative),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_line(x1: i32, x2: i32, slope: f64, intercept: f64) -> LineSegment {
        let y = |x: i32| (slope * f64::from(x) + intercept).round() as i32;
        LineSegment::new(x1, y(x1), x2, y(x2))
    }

    #[test]
    fn exact_points_recover_the_line() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 5.0, 7.0];
        let line = fit_line(&xs, &ys).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-12);
        assert!((line.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_bucket_is_degenerate() {
        assert_eq!(fit_line(&[], &[]), Err(DegenerateFit::EmptyBucket));
    }

    #[test]
    fn single_column_is_degenerate() {
        assert_eq!(
            fit_line(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]),
            Err(DegenerateFit::VerticalFit)
        );
    }

    #[test]
    fn zero_slope_has_no_endpoints() {
        let line = FittedLine { slope: 0.0, intercept: 10.0 };
        assert_eq!(line.span(350, 540), Err(DegenerateFit::ZeroSlope));
    }

    #[test]
    fn half_slope_segment_extrapolates_within_a_pixel() {
        // y = 0.5 x + 100, so x = 2 (y - 100)
        let segments = [
            on_line(500, 640, 0.5, 100.0),
            on_line(660, 880, 0.5, 100.0),
        ];
        let lanes = fit_lanes(&segments, 0.2, 350, 540);

        let right = lanes.positive.expect("positive side fitted");
        assert_eq!((right.y1, right.y2), (350, 540));
        assert!((right.x1 - 500).abs() <= 1, "x at 350 was {}", right.x1);
        assert!((right.x2 - 880).abs() <= 1, "x at 540 was {}", right.x2);
        assert_eq!(lanes.negative, None);
    }

    #[test]
    fn both_sides_are_fitted() {
        let segments = [
            on_line(520, 700, 0.6, 40.0),
            on_line(720, 860, 0.6, 40.0),
            on_line(200, 420, -0.7, 650.0),
            on_line(100, 180, -0.7, 650.0),
            LineSegment::new(300, 300, 400, 305),
        ];
        let lanes = fit_lanes(&segments, 0.2, 350, 540);
        assert_eq!(lanes.count(), 2);

        let left = lanes.negative.unwrap();
        // x = (y - 650) / -0.7
        assert!((left.x1 - 428).abs() <= 1);
        assert!((left.x2 - 157).abs() <= 1);
    }

    #[test]
    fn no_segments_means_no_lines() {
        let lanes = fit_lanes(&[], 0.2, 350, 540);
        assert_eq!(lanes, LaneLines::default());
        assert_eq!(lanes.count(), 0);
    }
}
