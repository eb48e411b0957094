// Keypoint gate - confidence check before any geometry is trusted

use crate::models::pose::{BodyPart, Keypoint, Pose};

/// True only if every keypoint meets the threshold
pub fn is_reliable(keypoints: &[&Keypoint], threshold: f32) -> bool {
    keypoints.iter().all(|k| k.is_visible(threshold))
}

/// Confidence gate shared by every detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeypointGate {
    threshold: f32,
}

impl KeypointGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Return the requested joints, or `None` if any is below threshold
    pub fn admit<const N: usize>(&self, pose: &Pose, parts: [BodyPart; N]) -> Option<[Keypoint; N]> {
        let keypoints = parts.map(|part| *pose.keypoint(part));
        let refs: Vec<&Keypoint> = keypoints.iter().collect();
        if is_reliable(&refs, self.threshold) {
            Some(keypoints)
        } else {
            None
        }
    }
}

impl Default for KeypointGate {
    fn default() -> Self {
        Self::new(0.5)
    }
}
