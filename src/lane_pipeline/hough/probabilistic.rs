use image::GrayImage;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::lane_pipeline::common::types::LineSegment;
use crate::lane_pipeline::hough::types::HoughParams;

/// Fixed-point fraction bits used while walking along a candidate line.
const SHIFT: i32 = 16;

/// (angle, distance) vote table with precomputed `cos/rho`, `sin/rho`.
struct Accumulator {
    trig: Vec<(f32, f32)>,
    num_rho: usize,
    offset: i32,
    votes: Vec<i32>,
}

impl Accumulator {
    fn new(width: u32, height: u32, params: &HoughParams) -> Self {
        let num_angle = ((std::f64::consts::PI / params.theta).round() as usize).max(1);
        let num_rho = ((f64::from((width + height) * 2 + 1) / params.rho).round() as usize).max(1);
        let irho = 1.0 / params.rho;
        let trig = (0..num_angle)
            .map(|n| {
                let angle = n as f64 * params.theta;
                ((angle.cos() * irho) as f32, (angle.sin() * irho) as f32)
            })
            .collect();

        Self {
            trig,
            num_rho,
            offset: (num_rho as i32 - 1) / 2,
            votes: vec![0; num_angle * num_rho],
        }
    }

    #[inline]
    fn bin(&self, n: usize, x: i32, y: i32) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as i32 + self.offset;
        n * self.num_rho + r.clamp(0, self.num_rho as i32 - 1) as usize
    }

    /// Adds the votes of `(x, y)` and returns the strongest angle with its count.
    fn vote(&mut self, x: i32, y: i32) -> (usize, i32) {
        let mut best = (0, 0);
        for n in 0..self.trig.len() {
            let bin = self.bin(n, x, y);
            self.votes[bin] += 1;
            if self.votes[bin] > best.1 {
                best = (n, self.votes[bin]);
            }
        }
        best
    }

    fn unvote(&mut self, x: i32, y: i32) {
        for n in 0..self.trig.len() {
            let bin = self.bin(n, x, y);
            self.votes[bin] -= 1;
        }
    }
}

/// Fixed-point walk along a line through a seed pixel.
///
/// The major axis advances one pixel per step; the minor axis carries
/// `SHIFT` fractional bits.
struct Walk {
    x0: i32,
    y0: i32,
    dx: i32,
    dy: i32,
    x_major: bool,
}

impl Walk {
    fn new(x: i32, y: i32, (cos, sin): (f32, f32)) -> Self {
        let scale = (1 << SHIFT) as f32;
        let half = 1 << (SHIFT - 1);
        // direction vector of the line whose normal is (cos, sin)
        let a = -sin;
        let b = cos;

        if a.abs() > b.abs() {
            Self {
                x0: x,
                y0: (y << SHIFT) + half,
                dx: if a > 0.0 { 1 } else { -1 },
                dy: (b * scale / a.abs()).round() as i32,
                x_major: true,
            }
        } else {
            Self {
                x0: (x << SHIFT) + half,
                y0: y,
                dx: (a * scale / b.abs()).round() as i32,
                dy: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    #[inline]
    fn pixel(&self, x: i32, y: i32) -> (i32, i32) {
        if self.x_major {
            (x, y >> SHIFT)
        } else {
            (x >> SHIFT, y)
        }
    }

    /// Pixels visited from the seed, `direction` is `1` or `-1`.
    fn steps(&self, direction: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        let dx = self.dx * direction;
        let dy = self.dy * direction;
        (0..).map(move |k: i32| self.pixel(self.x0 + k * dx, self.y0 + k * dy))
    }
}

/// Binary edge pixels still available for voting.
struct EdgeMask {
    width: i32,
    height: i32,
    set: Vec<bool>,
}

impl EdgeMask {
    fn from_image(edges: &GrayImage) -> Self {
        let (w, h) = edges.dimensions();
        Self {
            width: w as i32,
            height: h as i32,
            set: edges.pixels().map(|p| p.0[0] != 0).collect(),
        }
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    fn is_set(&self, x: i32, y: i32) -> bool {
        self.set[self.index(x, y)]
    }

    /// Clears `(x, y)`, returning whether it was set.
    #[inline]
    fn take(&mut self, x: i32, y: i32) -> bool {
        let i = self.index(x, y);
        std::mem::replace(&mut self.set[i], false)
    }
}

/// Detects line segments in a binary edge map.
///
/// Edge pixels are visited in a shuffled order (seeded from `params.seed`, so
/// results are reproducible). Each pixel votes into the accumulator; once a
/// bin reaches `threshold` the line through the pixel is traced in both
/// directions, bridging gaps up to `max_line_gap`. Every pixel on the traced
/// run is consumed, and the run is emitted if its x or y extent reaches
/// `min_line_length`.
pub fn detect_segments(edges: &GrayImage, params: &HoughParams) -> Vec<LineSegment> {
    let (width, height) = edges.dimensions();
    let mut mask = EdgeMask::from_image(edges);

    let mut points: Vec<(i32, i32)> = edges
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] != 0)
        .map(|(x, y, _)| (x as i32, y as i32))
        .collect();
    if points.is_empty() {
        debug!("No edge pixels, skipping Hough transform");
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    points.shuffle(&mut rng);

    let mut acc = Accumulator::new(width, height, params);
    let threshold = params.threshold as i32;
    let min_length = params.min_line_length as i32;
    let max_gap = params.max_line_gap as i32;
    let mut segments = Vec::new();

    for &(x, y) in &points {
        if !mask.is_set(x, y) {
            continue;
        }

        let (angle, votes) = acc.vote(x, y);
        if votes < threshold {
            continue;
        }

        let walk = Walk::new(x, y, acc.trig[angle]);
        let mut ends = [(x, y); 2];
        for (end, direction) in ends.iter_mut().zip([1, -1]) {
            let mut gap = 0;
            for (px, py) in walk.steps(direction) {
                if !mask.contains(px, py) {
                    break;
                }
                if mask.is_set(px, py) {
                    gap = 0;
                    *end = (px, py);
                } else {
                    gap += 1;
                    if gap > max_gap {
                        break;
                    }
                }
            }
        }

        let good_line = (ends[1].0 - ends[0].0).abs() >= min_length
            || (ends[1].1 - ends[0].1).abs() >= min_length;

        for (end, direction) in ends.iter().zip([1, -1]) {
            for (px, py) in walk.steps(direction) {
                if !mask.contains(px, py) {
                    break;
                }
                if mask.take(px, py) && good_line {
                    acc.unvote(px, py);
                }
                if (px, py) == *end {
                    break;
                }
            }
        }

        if good_line {
            segments.push(LineSegment::new(ends[0].0, ends[0].1, ends[1].0, ends[1].1));
        }
    }

    debug!(
        edge_pixels = points.len(),
        segments = segments.len(),
        "Hough transform complete"
    );
    segments
}
