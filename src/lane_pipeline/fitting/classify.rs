use tracing::trace;

use crate::lane_pipeline::common::types::LineSegment;
use crate::lane_pipeline::fitting::types::LaneSide;

/// Endpoint coordinates accumulated per slope sign.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlopeBuckets {
    pub positive_xs: Vec<f64>,
    pub positive_ys: Vec<f64>,
    pub negative_xs: Vec<f64>,
    pub negative_ys: Vec<f64>,
}

impl SlopeBuckets {
    /// Sorts segments by slope. Only `slope > threshold` or
    /// `slope < -threshold` count; both endpoints of a kept segment go into
    /// its bucket. Vertical segments are skipped.
    pub fn classify(segments: &[LineSegment], threshold: f64) -> Self {
        let mut buckets = Self::default();
        for seg in segments {
            let Some(slope) = seg.slope() else {
                trace!(?seg, "Skipping vertical segment");
                continue;
            };
            let side = if slope > threshold {
                LaneSide::Positive
            } else if slope < -threshold {
                LaneSide::Negative
            } else {
                continue;
            };
            buckets.push(side, seg);
        }
        buckets
    }

    fn push(&mut self, side: LaneSide, seg: &LineSegment) {
        let (xs, ys) = match side {
            LaneSide::Positive => (&mut self.positive_xs, &mut self.positive_ys),
            LaneSide::Negative => (&mut self.negative_xs, &mut self.negative_ys),
        };
        xs.extend([f64::from(seg.x1), f64::from(seg.x2)]);
        ys.extend([f64::from(seg.y1), f64::from(seg.y2)]);
    }

    pub fn points(&self, side: LaneSide) -> (&[f64], &[f64]) {
        match side {
            LaneSide::Positive => (&self.positive_xs, &self.positive_ys),
            LaneSide::Negative => (&self.negative_xs, &self.negative_ys),
        }
    }
}
