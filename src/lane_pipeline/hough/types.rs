//! Hough transform parameters

/// Parameters for the probabilistic Hough segment detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoughParams {
    /// Distance resolution of the accumulator, in pixels
    pub rho: f64,
    /// Angle resolution of the accumulator, in radians
    pub theta: f64,
    /// Minimum number of votes before a line is traced
    pub threshold: u32,
    /// Segments shorter than this (in x or y extent) are dropped
    pub min_line_length: u32,
    /// Largest run of empty pixels bridged while tracing a segment
    pub max_line_gap: u32,
    /// Seed for the point visiting order
    pub seed: u64,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho: 1.0,
            theta: std::f64::consts::PI / 180.0,
            threshold: 20,
            min_line_length: 30,
            max_line_gap: 60,
            seed: 0xFFFF_FFFF_FFFF_FFFF,
        }
    }
}
