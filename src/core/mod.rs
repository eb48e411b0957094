pub mod config;
pub mod geometry;
pub mod keypoint_gate;

// Rep detection
pub mod rep_detector;
pub mod jumping_jack;
pub mod session;

// Frame scheduling
pub mod frame_pipeline;

#[cfg(test)]
pub(crate) mod test_support;
