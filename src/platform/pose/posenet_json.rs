// Parsing of PoseNet single-pose JSON output
//
// {"score": 0.8, "keypoints": [{"part": "nose", "score": 0.9, "position": {"x": 1.0, "y": 2.0}}, ...]}

use crate::models::pose::{BodyPart, Pose, PoseBuilder, PoseError, PoseResult, KEYPOINT_COUNT};
use serde_json::Value;

/// Parse one PoseNet pose; keypoints are placed by part name, and all 17 must be present
pub fn parse_posenet_pose(json: &str) -> PoseResult<Pose> {
    let data: Value =
        serde_json::from_str(json).map_err(|e| PoseError::Malformed(e.to_string()))?;

    let keypoints = data
        .get("keypoints")
        .and_then(|k| k.as_array())
        .ok_or_else(|| PoseError::Malformed("Missing keypoints".to_string()))?;

    let mut builder = PoseBuilder::new()
        .score(data.get("score").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32);
    let mut seen = [false; KEYPOINT_COUNT];

    for kp in keypoints {
        let name = kp
            .get("part")
            .and_then(|v| v.as_str())
            .ok_or_else(|| PoseError::Malformed("Keypoint without part name".to_string()))?;
        let part = BodyPart::from_name(name)
            .ok_or_else(|| PoseError::Malformed(format!("Unknown body part: {}", name)))?;
        if seen[part.index()] {
            return Err(PoseError::Malformed(format!("Duplicate body part: {}", name)));
        }

        let position = kp.get("position");
        let coord = |axis: &str| {
            position
                .and_then(|p| p.get(axis))
                .and_then(|v| v.as_f64())
                .ok_or_else(|| PoseError::Malformed(format!("{} missing {}", name, axis)))
        };
        let x = coord("x")? as f32;
        let y = coord("y")? as f32;
        let score = kp.get("score").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;

        builder = builder.joint(part, x, y, score);
        seen[part.index()] = true;
    }

    let present = seen.iter().filter(|s| **s).count();
    if present != KEYPOINT_COUNT {
        return Err(PoseError::KeypointCount(present));
    }

    Ok(builder.build())
}
