//! Fitting results and the reasons a side can come back empty

use thiserror::Error;

use crate::lane_pipeline::common::types::LineSegment;

/// Why a bucket produced no lane line. These are expected outcomes, not
/// pipeline failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateFit {
    #[error("no segments in bucket")]
    EmptyBucket,

    #[error("all points share one x coordinate")]
    VerticalFit,

    #[error("fitted slope is zero")]
    ZeroSlope,

    #[error("extrapolated endpoint is not representable")]
    NonFiniteEndpoint,
}

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedLine {
    pub slope: f64,
    pub intercept: f64,
}

impl FittedLine {
    /// x on this line at row `y`, truncated toward zero.
    pub fn x_at(&self, y: i32) -> Result<i32, DegenerateFit> {
        if self.slope == 0.0 {
            return Err(DegenerateFit::ZeroSlope);
        }
        let x = (f64::from(y) - self.intercept) / self.slope;
        if !x.is_finite() || x.abs() > f64::from(i32::MAX / 2) {
            return Err(DegenerateFit::NonFiniteEndpoint);
        }
        Ok(x as i32)
    }

    /// Segment between rows `y_top` and `y_bottom`.
    pub fn span(&self, y_top: i32, y_bottom: i32) -> Result<LineSegment, DegenerateFit> {
        Ok(LineSegment::new(
            self.x_at(y_top)?,
            y_top,
            self.x_at(y_bottom)?,
            y_bottom,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneSide {
    /// Positive image slope, usually the right boundary
    Positive,
    /// Negative image slope, usually the left boundary
    Negative,
}

/// The two extrapolated lane boundaries of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LaneLines {
    pub positive: Option<LineSegment>,
    pub negative: Option<LineSegment>,
}

impl LaneLines {
    pub fn iter(&self) -> impl Iterator<Item = LineSegment> + '_ {
        self.positive.iter().chain(self.negative.iter()).copied()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }
}
