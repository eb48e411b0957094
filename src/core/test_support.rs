// Pose fixtures shared by the detector and session tests

use crate::models::pose::{BodyPart, Pose, PoseBuilder};

pub const CONFIDENT: f32 = 0.9;

/// Place a three-joint limb so the angle at `joints[1]` is `angle_deg`
pub fn limb(
    builder: PoseBuilder,
    joints: [BodyPart; 3],
    vertex: (f32, f32),
    angle_deg: f32,
    score: f32,
) -> PoseBuilder {
    let (vx, vy) = vertex;
    let theta = angle_deg.to_radians();
    builder
        .joint(joints[0], vx, vy - 100.0, score)
        .joint(joints[1], vx, vy, score)
        .joint(joints[2], vx + 100.0 * theta.sin(), vy - 100.0 * theta.cos(), score)
}

const LEFT_LEG: [BodyPart; 3] = [BodyPart::LeftHip, BodyPart::LeftKnee, BodyPart::LeftAnkle];
const RIGHT_LEG: [BodyPart; 3] = [BodyPart::RightHip, BodyPart::RightKnee, BodyPart::RightAnkle];
const LEFT_ARM: [BodyPart; 3] = [BodyPart::LeftShoulder, BodyPart::LeftElbow, BodyPart::LeftWrist];
const RIGHT_ARM: [BodyPart; 3] = [
    BodyPart::RightShoulder,
    BodyPart::RightElbow,
    BodyPart::RightWrist,
];

pub fn knees(left_deg: f32, right_deg: f32) -> Pose {
    let builder = limb(PoseBuilder::new(), LEFT_LEG, (200.0, 350.0), left_deg, CONFIDENT);
    limb(builder, RIGHT_LEG, (400.0, 350.0), right_deg, CONFIDENT).build()
}

/// Side view facing left, both legs overlapping. The bent knee sits at a true
/// 40 degrees while the raw ray difference crosses the atan2 branch cut (320).
pub fn left_facing_squat(bent: bool) -> Pose {
    let (hip, ankle) = if bent {
        ((206.0, 266.0), (206.0, 334.0))
    } else {
        ((300.0, 200.0), (300.0, 400.0))
    };
    let mut builder = PoseBuilder::new();
    for [hip_part, knee_part, ankle_part] in [LEFT_LEG, RIGHT_LEG] {
        builder = builder
            .joint(hip_part, hip.0, hip.1, CONFIDENT)
            .joint(knee_part, 300.0, 300.0, CONFIDENT)
            .joint(ankle_part, ankle.0, ankle.1, CONFIDENT);
    }
    builder.build()
}

pub fn elbows(left_deg: f32, right_deg: f32) -> Pose {
    let builder = limb(PoseBuilder::new(), LEFT_ARM, (200.0, 200.0), left_deg, CONFIDENT);
    limb(builder, RIGHT_ARM, (400.0, 200.0), right_deg, CONFIDENT).build()
}

/// Shoulders at y=150; wrists above them when `raised`
pub fn arms(raised: bool) -> Pose {
    let wrist_y = if raised { 50.0 } else { 300.0 };
    PoseBuilder::new()
        .joint(BodyPart::LeftShoulder, 250.0, 150.0, CONFIDENT)
        .joint(BodyPart::RightShoulder, 350.0, 150.0, CONFIDENT)
        .joint(BodyPart::LeftWrist, 200.0, wrist_y, CONFIDENT)
        .joint(BodyPart::RightWrist, 400.0, wrist_y, CONFIDENT)
        .build()
}

pub fn ankles(distance_px: f32) -> Pose {
    PoseBuilder::new()
        .joint(BodyPart::LeftAnkle, 300.0, 450.0, CONFIDENT)
        .joint(BodyPart::RightAnkle, 300.0 + distance_px, 450.0, CONFIDENT)
        .build()
}

/// Arms and ankles together, as seen during a jumping jack
pub fn jumping_jack(raised: bool, ankle_distance_px: f32) -> Pose {
    let mut pose = arms(raised);
    let feet = ankles(ankle_distance_px);
    for part in [BodyPart::LeftAnkle, BodyPart::RightAnkle] {
        *pose.keypoint_mut(part) = *feet.keypoint(part);
    }
    pose
}

pub fn occlude(mut pose: Pose, part: BodyPart) -> Pose {
    pose.keypoint_mut(part).score = 0.2;
    pose
}
