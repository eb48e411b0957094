// Channel-backed pose source: an external inference loop pushes, the pipeline pulls

use super::{PoseReadiness, PoseSource};
use crate::models::pose::Pose;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Create a bounded feeder/source pair
pub fn pose_channel(capacity: usize) -> (PoseFeeder, ChannelPoseSource) {
    let (tx, rx) = mpsc::channel(capacity);
    (PoseFeeder { tx }, ChannelPoseSource { rx })
}

/// Producer half, held by whatever runs the pose model
#[derive(Debug, Clone)]
pub struct PoseFeeder {
    tx: mpsc::Sender<PoseReadiness>,
}

impl PoseFeeder {
    /// Push a pose; returns false once the pipeline side is gone
    pub async fn submit(&self, pose: Pose) -> bool {
        self.tx.send(PoseReadiness::Ready(pose)).await.is_ok()
    }

    /// Signal a frame with no usable pose
    pub async fn not_ready(&self) -> bool {
        self.tx.send(PoseReadiness::NotReady).await.is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half, handed to the frame pipeline
#[derive(Debug)]
pub struct ChannelPoseSource {
    rx: mpsc::Receiver<PoseReadiness>,
}

#[async_trait]
impl PoseSource for ChannelPoseSource {
    async fn next_pose(&mut self) -> Option<PoseReadiness> {
        self.rx.recv().await
    }
}
