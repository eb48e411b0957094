// Data models for 2-D body pose estimates consumed by the rep counter

use serde::{Deserialize, Serialize};

/// Number of joints in the PoseNet body schema
pub const KEYPOINT_COUNT: usize = 17;

// ==============================================================================
// Body Schema (17 keypoints)
// ==============================================================================

/// PoseNet / COCO body keypoint indices (17 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum BodyPart {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl BodyPart {
    /// All parts in model output order
    pub const ALL: [BodyPart; KEYPOINT_COUNT] = [
        BodyPart::Nose,
        BodyPart::LeftEye,
        BodyPart::RightEye,
        BodyPart::LeftEar,
        BodyPart::RightEar,
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::LeftElbow,
        BodyPart::RightElbow,
        BodyPart::LeftWrist,
        BodyPart::RightWrist,
        BodyPart::LeftHip,
        BodyPart::RightHip,
        BodyPart::LeftKnee,
        BodyPart::RightKnee,
        BodyPart::LeftAnkle,
        BodyPart::RightAnkle,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a part by its PoseNet name, e.g. "leftShoulder"
    pub fn from_name(name: &str) -> Option<BodyPart> {
        BodyPart::ALL.iter().copied().find(|part| part.to_string() == name)
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            BodyPart::Nose => "nose",
            BodyPart::LeftEye => "leftEye",
            BodyPart::RightEye => "rightEye",
            BodyPart::LeftEar => "leftEar",
            BodyPart::RightEar => "rightEar",
            BodyPart::LeftShoulder => "leftShoulder",
            BodyPart::RightShoulder => "rightShoulder",
            BodyPart::LeftElbow => "leftElbow",
            BodyPart::RightElbow => "rightElbow",
            BodyPart::LeftWrist => "leftWrist",
            BodyPart::RightWrist => "rightWrist",
            BodyPart::LeftHip => "leftHip",
            BodyPart::RightHip => "rightHip",
            BodyPart::LeftKnee => "leftKnee",
            BodyPart::RightKnee => "rightKnee",
            BodyPart::LeftAnkle => "leftAnkle",
            BodyPart::RightAnkle => "rightAnkle",
        }
    }
}

/// Connected joint pairs drawn as the skeleton, in PoseNet adjacency order
pub const SKELETON_EDGES: [(BodyPart, BodyPart); 12] = [
    (BodyPart::LeftHip, BodyPart::LeftShoulder),
    (BodyPart::LeftElbow, BodyPart::LeftShoulder),
    (BodyPart::LeftElbow, BodyPart::LeftWrist),
    (BodyPart::LeftHip, BodyPart::LeftKnee),
    (BodyPart::LeftKnee, BodyPart::LeftAnkle),
    (BodyPart::RightHip, BodyPart::RightShoulder),
    (BodyPart::RightElbow, BodyPart::RightShoulder),
    (BodyPart::RightElbow, BodyPart::RightWrist),
    (BodyPart::RightHip, BodyPart::RightKnee),
    (BodyPart::RightKnee, BodyPart::RightAnkle),
    (BodyPart::LeftShoulder, BodyPart::RightShoulder),
    (BodyPart::LeftHip, BodyPart::RightHip),
];

// ==============================================================================
// Keypoint
// ==============================================================================

/// A point in frame pixel space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 2-D keypoint with confidence score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub part: BodyPart,
    pub position: Point2,
    pub score: f32, // Detection confidence [0, 1]
}

impl Keypoint {
    pub fn new(part: BodyPart, x: f32, y: f32, score: f32) -> Self {
        Self {
            part,
            position: Point2::new(x, y),
            score,
        }
    }

    /// A score equal to the threshold is accepted
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.score >= threshold
    }
}

// ==============================================================================
// Pose
// ==============================================================================

/// Every keypoint the pose model produced for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPose")]
pub struct Pose {
    keypoints: [Keypoint; KEYPOINT_COUNT],
    pub score: f32,
}

impl Pose {
    /// Build a pose from the model's ordered keypoint list
    pub fn from_keypoints(keypoints: Vec<Keypoint>, score: f32) -> PoseResult<Self> {
        let keypoints: [Keypoint; KEYPOINT_COUNT] = keypoints
            .try_into()
            .map_err(|rejected: Vec<Keypoint>| PoseError::KeypointCount(rejected.len()))?;

        for (expected, keypoint) in BodyPart::ALL.iter().zip(keypoints.iter()) {
            if keypoint.part != *expected {
                return Err(PoseError::OutOfOrder {
                    index: expected.index(),
                    found: keypoint.part.to_string(),
                });
            }
        }

        Ok(Self { keypoints, score })
    }

    /// A pose with every joint at the origin and zero confidence
    pub fn empty() -> Self {
        Self {
            keypoints: BodyPart::ALL.map(|part| Keypoint::new(part, 0.0, 0.0, 0.0)),
            score: 0.0,
        }
    }

    pub fn keypoint(&self, part: BodyPart) -> &Keypoint {
        &self.keypoints[part.index()]
    }

    pub fn keypoint_mut(&mut self, part: BodyPart) -> &mut Keypoint {
        &mut self.keypoints[part.index()]
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }
}

/// Wire form of a pose, checked by `Pose::from_keypoints` on the way in
#[derive(Deserialize)]
struct RawPose {
    keypoints: Vec<Keypoint>,
    score: f32,
}

impl TryFrom<RawPose> for Pose {
    type Error = PoseError;

    fn try_from(raw: RawPose) -> PoseResult<Self> {
        Pose::from_keypoints(raw.keypoints, raw.score)
    }
}

/// Assembles a pose joint by joint; unset joints stay at zero confidence
#[derive(Debug, Clone)]
pub struct PoseBuilder {
    pose: Pose,
}

impl PoseBuilder {
    pub fn new() -> Self {
        Self { pose: Pose::empty() }
    }

    pub fn joint(mut self, part: BodyPart, x: f32, y: f32, score: f32) -> Self {
        *self.pose.keypoint_mut(part) = Keypoint::new(part, x, y, score);
        self
    }

    pub fn score(mut self, score: f32) -> Self {
        self.pose.score = score;
        self
    }

    pub fn build(self) -> Pose {
        self.pose
    }
}

impl Default for PoseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Bones whose two endpoints both meet the threshold, in `SKELETON_EDGES` order
pub fn derive_skeleton(pose: &Pose, threshold: f32) -> Vec<(Keypoint, Keypoint)> {
    SKELETON_EDGES
        .iter()
        .map(|(a, b)| (*pose.keypoint(*a), *pose.keypoint(*b)))
        .filter(|(a, b)| a.is_visible(threshold) && b.is_visible(threshold))
        .collect()
}

/// Joints confident enough to be drawn as dots
pub fn visible_keypoints(pose: &Pose, threshold: f32) -> Vec<Keypoint> {
    pose.keypoints()
        .iter()
        .filter(|k| k.score > threshold)
        .copied()
        .collect()
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Expected 17 keypoints, got {0}")]
    KeypointCount(usize),

    #[error("Keypoint {index} out of schema order: found {found}")]
    OutOfOrder { index: usize, found: &'static str },

    #[error("Malformed pose data: {0}")]
    Malformed(String),
}

pub type PoseResult<T> = Result<T, PoseError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn confident_pose() -> Pose {
        let keypoints = BodyPart::ALL
            .iter()
            .map(|&part| Keypoint::new(part, part.index() as f32 * 10.0, 5.0, 0.9))
            .collect();
        Pose::from_keypoints(keypoints, 0.9).unwrap()
    }

    #[test]
    fn test_keypoint_visibility() {
        let keypoint = Keypoint::new(BodyPart::Nose, 10.0, 10.0, 0.5);
        assert!(keypoint.is_visible(0.5));
        assert!(keypoint.is_visible(0.4));
        assert!(!keypoint.is_visible(0.6));
    }

    #[test]
    fn test_pose_rejects_wrong_length() {
        let keypoints = vec![Keypoint::new(BodyPart::Nose, 0.0, 0.0, 1.0)];
        let err = Pose::from_keypoints(keypoints, 1.0).unwrap_err();
        assert!(matches!(err, PoseError::KeypointCount(1)));
    }

    #[test]
    fn test_pose_rejects_out_of_order() {
        let mut keypoints: Vec<Keypoint> = BodyPart::ALL
            .iter()
            .map(|&part| Keypoint::new(part, 0.0, 0.0, 1.0))
            .collect();
        keypoints.swap(5, 6);
        let err = Pose::from_keypoints(keypoints, 1.0).unwrap_err();
        assert!(matches!(err, PoseError::OutOfOrder { index: 5, .. }));
    }

    #[test]
    fn test_part_names_round_trip() {
        for part in BodyPart::ALL {
            assert_eq!(BodyPart::from_name(part.to_string()), Some(part));
        }
        assert_eq!(BodyPart::from_name("leftToe"), None);
    }

    #[test]
    fn test_keypoint_lookup_by_part() {
        let pose = confident_pose();
        assert_eq!(pose.keypoint(BodyPart::LeftKnee).part, BodyPart::LeftKnee);
        assert_eq!(pose.keypoint(BodyPart::LeftKnee).position.x, 130.0);
    }

    #[test]
    fn test_skeleton_all_confident() {
        let pose = confident_pose();
        let skeleton = derive_skeleton(&pose, 0.5);
        assert_eq!(skeleton.len(), SKELETON_EDGES.len());
        assert_eq!(skeleton[0].0.part, BodyPart::LeftHip);
        assert_eq!(skeleton[0].1.part, BodyPart::LeftShoulder);
    }

    #[test]
    fn test_skeleton_drops_low_confidence_bones() {
        let mut pose = confident_pose();
        pose.keypoint_mut(BodyPart::LeftElbow).score = 0.2;

        let skeleton = derive_skeleton(&pose, 0.5);
        // Both bones touching the left elbow disappear
        assert_eq!(skeleton.len(), SKELETON_EDGES.len() - 2);
        assert!(skeleton
            .iter()
            .all(|(a, b)| a.part != BodyPart::LeftElbow && b.part != BodyPart::LeftElbow));
    }

    #[test]
    fn test_skeleton_is_idempotent() {
        let mut pose = confident_pose();
        pose.keypoint_mut(BodyPart::RightKnee).score = 0.1;

        let first = derive_skeleton(&pose, 0.5);
        let second = derive_skeleton(&pose, 0.5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_visible_keypoints() {
        let mut pose = Pose::empty();
        pose.keypoint_mut(BodyPart::Nose).score = 0.8;
        pose.keypoint_mut(BodyPart::LeftWrist).score = 0.5;

        let visible = visible_keypoints(&pose, 0.5);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].part, BodyPart::Nose);
    }

    #[test]
    fn test_builder_sets_joints() {
        let pose = PoseBuilder::new()
            .joint(BodyPart::LeftAnkle, 120.0, 400.0, 0.7)
            .score(0.6)
            .build();
        assert_eq!(pose.keypoint(BodyPart::LeftAnkle).position, Point2::new(120.0, 400.0));
        assert_eq!(pose.keypoint(BodyPart::RightAnkle).score, 0.0);
        assert_eq!(pose.score, 0.6);
    }

    #[test]
    fn test_pose_json_shape() {
        let pose = confident_pose();
        let json = serde_json::to_value(&pose).unwrap();
        assert_eq!(json["keypoints"][5]["part"], "leftShoulder");
    }

    #[test]
    fn test_pose_json_round_trip_keeps_lookup() {
        let pose = confident_pose();
        let json = serde_json::to_string(&pose).unwrap();
        let parsed: Pose = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pose);
    }

    #[test]
    fn test_pose_json_rejects_out_of_order_keypoints() {
        let mut json = serde_json::to_value(confident_pose()).unwrap();
        let keypoints = json["keypoints"].as_array_mut().unwrap();
        // leftKnee and leftAnkle trade places
        keypoints.swap(BodyPart::LeftKnee.index(), BodyPart::LeftAnkle.index());

        let err = serde_json::from_value::<Pose>(json).unwrap_err();
        assert!(err.to_string().contains("out of schema order"));
    }

    #[test]
    fn test_pose_json_rejects_missing_keypoints() {
        let mut json = serde_json::to_value(confident_pose()).unwrap();
        json["keypoints"].as_array_mut().unwrap().pop();

        let err = serde_json::from_value::<Pose>(json).unwrap_err();
        assert!(err.to_string().contains("Expected 17 keypoints, got 16"));
    }
}
