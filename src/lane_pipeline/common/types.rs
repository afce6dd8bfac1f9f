//! Geometric primitives passed between stages

/// A detected line segment, endpoints in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Slope `dy / dx`, or `None` for a vertical segment.
    pub fn slope(&self) -> Option<f64> {
        let dx = self.x2 - self.x1;
        if dx == 0 {
            return None;
        }
        Some(f64::from(self.y2 - self.y1) / f64::from(dx))
    }

    pub fn length(&self) -> f64 {
        f64::from(self.x2 - self.x1).hypot(f64::from(self.y2 - self.y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_segment_has_no_slope() {
        assert_eq!(LineSegment::new(5, 0, 5, 40).slope(), None);
    }

    #[test]
    fn slope_is_dy_over_dx() {
        let seg = LineSegment::new(0, 0, 10, 5);
        assert_eq!(seg.slope(), Some(0.5));
        assert!((seg.length() - 125f64.sqrt()).abs() < 1e-12);
    }
}
