//! Rendering of fitted lane lines and compositing over the source frame

mod composite;
mod draw;

pub use composite::{BlendWeights, blend};
pub use draw::{draw_lane_lines, draw_thick_line_mut};
