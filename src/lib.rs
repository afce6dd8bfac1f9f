pub mod lane_pipeline;
pub mod logger;
