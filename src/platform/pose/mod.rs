// Pose estimation integration
// The pose model is external; the counter only consumes its per-frame output

pub mod channel_source;
pub mod posenet_json;

pub use channel_source::{pose_channel, ChannelPoseSource, PoseFeeder};
pub use posenet_json::parse_posenet_pose;

use crate::models::pose::Pose;
use async_trait::async_trait;

/// What the pose source produced for the latest video frame
#[derive(Debug, Clone, PartialEq)]
pub enum PoseReadiness {
    Ready(Pose),
    /// Video or model not ready for this frame; wait for the next signal
    NotReady,
}

/// Supplier of per-frame poses
/// Implement this over whatever inference backend the host runs
#[async_trait]
pub trait PoseSource: Send {
    /// Wait for the next frame's result; `None` once the source has shut down
    async fn next_pose(&mut self) -> Option<PoseReadiness>;
}
