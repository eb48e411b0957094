//! Real-time exercise repetition counting from 2-D pose estimates.
//!
//! Poses arrive from an external model through a [`PoseSource`]; every frame
//! runs the squat, curl, arm-raise and leg-spread detectors plus the
//! jumping-jack check, and the resulting counts are broadcast as
//! [`FrameReport`]s.

pub mod core;
pub mod models;
pub mod platform;

pub use crate::core::config::{Config, ConfigError};
pub use crate::core::frame_pipeline::{
    FramePipeline, FrameReport, PipelineError, PipelineHandle, PipelineResult, SessionSummary,
};
pub use crate::core::session::SessionState;
pub use crate::models::exercise::{Exercise, RepCounts};
pub use crate::models::pose::{BodyPart, Keypoint, Pose, PoseBuilder};
pub use crate::platform::capture::{CaptureSource, HostCapture};
pub use crate::platform::pose::{pose_channel, PoseReadiness, PoseSource};
