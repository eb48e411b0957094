// Hysteresis rep detectors, one per tracked motion
//
// Each detector gates its joints, derives one signal from the current frame,
// and feeds enter/exit conditions into its own ExerciseState. A gated frame
// leaves the state untouched.

use crate::core::config::{Config, CurlThresholds, LegSpreadThresholds, SquatThresholds};
use crate::core::geometry::{horizontal_distance, joint_angle};
use crate::core::keypoint_gate::KeypointGate;
use crate::models::exercise::{Exercise, ExerciseState, RepEvent};
use crate::models::pose::{BodyPart, Pose};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Shoulder, elbow, wrist
    pub fn arm(self) -> [BodyPart; 3] {
        match self {
            Side::Left => [BodyPart::LeftShoulder, BodyPart::LeftElbow, BodyPart::LeftWrist],
            Side::Right => [
                BodyPart::RightShoulder,
                BodyPart::RightElbow,
                BodyPart::RightWrist,
            ],
        }
    }

    /// Hip, knee, ankle
    pub fn leg(self) -> [BodyPart; 3] {
        match self {
            Side::Left => [BodyPart::LeftHip, BodyPart::LeftKnee, BodyPart::LeftAnkle],
            Side::Right => [BodyPart::RightHip, BodyPart::RightKnee, BodyPart::RightAnkle],
        }
    }
}

// ==============================================================================
// Squat
// ==============================================================================

/// Squat counter: either bent knee enters, both straight knees complete
pub struct SquatDetector {
    state: ExerciseState,
    gate: KeypointGate,
    thresholds: SquatThresholds,
    fold_reflex: bool,
}

impl SquatDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            state: ExerciseState::new(),
            gate: KeypointGate::new(config.confidence_threshold),
            thresholds: config.squat,
            fold_reflex: config.fold_reflex_angles,
        }
    }

    pub fn exercise(&self) -> Exercise {
        Exercise::Squat
    }

    pub fn state(&self) -> ExerciseState {
        self.state
    }

    /// Knee angle for one leg, `None` when that leg is not reliable
    fn knee_angle(&self, pose: &Pose, side: Side) -> Option<f32> {
        let [hip, knee, ankle] = self.gate.admit(pose, side.leg())?;
        Some(joint_angle(
            hip.position,
            knee.position,
            ankle.position,
            self.fold_reflex,
        ))
    }

    pub fn observe(&mut self, pose: &Pose) -> RepEvent {
        let left = self.knee_angle(pose, Side::Left);
        let right = self.knee_angle(pose, Side::Right);
        if left.is_none() && right.is_none() {
            return RepEvent::Gated;
        }

        let enter_below = self.thresholds.enter_below_deg;
        let exit_above = self.thresholds.exit_above_deg;

        let bent = |angle: Option<f32>| angle.is_some_and(|deg| deg < enter_below);
        let enter = bent(left) || bent(right);
        let exit = matches!(
            (left, right),
            (Some(l), Some(r)) if l > exit_above && r > exit_above
        );

        self.state.advance(enter, exit)
    }

    pub fn settle(&mut self) {
        self.state.settle();
    }
}

// ==============================================================================
// Bicep Curl
// ==============================================================================

/// Curl counter for a single arm
pub struct CurlDetector {
    side: Side,
    state: ExerciseState,
    gate: KeypointGate,
    thresholds: CurlThresholds,
    fold_reflex: bool,
}

impl CurlDetector {
    pub fn new(side: Side, config: &Config) -> Self {
        Self {
            side,
            state: ExerciseState::new(),
            gate: KeypointGate::new(config.confidence_threshold),
            thresholds: config.curl,
            fold_reflex: config.fold_reflex_angles,
        }
    }

    pub fn exercise(&self) -> Exercise {
        match self.side {
            Side::Left => Exercise::LeftCurl,
            Side::Right => Exercise::RightCurl,
        }
    }

    pub fn state(&self) -> ExerciseState {
        self.state
    }

    pub fn observe(&mut self, pose: &Pose) -> RepEvent {
        let Some([shoulder, elbow, wrist]) = self.gate.admit(pose, self.side.arm()) else {
            return RepEvent::Gated;
        };

        let angle = joint_angle(
            shoulder.position,
            elbow.position,
            wrist.position,
            self.fold_reflex,
        );
        self.state.advance(
            angle < self.thresholds.enter_below_deg,
            angle > self.thresholds.exit_above_deg,
        )
    }

    pub fn settle(&mut self) {
        self.state.settle();
    }
}

// ==============================================================================
// Arm Raise
// ==============================================================================

/// Both wrists above their shoulders
pub struct ArmRaiseDetector {
    state: ExerciseState,
    gate: KeypointGate,
}

impl ArmRaiseDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            state: ExerciseState::new(),
            gate: KeypointGate::new(config.confidence_threshold),
        }
    }

    pub fn exercise(&self) -> Exercise {
        Exercise::ArmRaise
    }

    pub fn state(&self) -> ExerciseState {
        self.state
    }

    pub fn observe(&mut self, pose: &Pose) -> RepEvent {
        let parts = [
            BodyPart::LeftWrist,
            BodyPart::RightWrist,
            BodyPart::LeftShoulder,
            BodyPart::RightShoulder,
        ];
        let Some([left_wrist, right_wrist, left_shoulder, right_shoulder]) =
            self.gate.admit(pose, parts)
        else {
            return RepEvent::Gated;
        };

        // Image y grows downward
        let raised = left_wrist.position.y < left_shoulder.position.y
            && right_wrist.position.y < right_shoulder.position.y;

        self.state.advance(raised, !raised)
    }

    pub fn settle(&mut self) {
        self.state.settle();
    }
}

// ==============================================================================
// Leg Spread
// ==============================================================================

/// Horizontal ankle separation opening past one threshold and closing under another
pub struct LegSpreadDetector {
    state: ExerciseState,
    gate: KeypointGate,
    thresholds: LegSpreadThresholds,
}

impl LegSpreadDetector {
    pub fn new(config: &Config) -> Self {
        Self {
            state: ExerciseState::new(),
            gate: KeypointGate::new(config.confidence_threshold),
            thresholds: config.leg_spread,
        }
    }

    pub fn exercise(&self) -> Exercise {
        Exercise::LegSpread
    }

    pub fn state(&self) -> ExerciseState {
        self.state
    }

    pub fn observe(&mut self, pose: &Pose) -> RepEvent {
        let Some([left_ankle, right_ankle]) = self
            .gate
            .admit(pose, [BodyPart::LeftAnkle, BodyPart::RightAnkle])
        else {
            return RepEvent::Gated;
        };

        let distance = horizontal_distance(left_ankle.position, right_ankle.position);
        self.state.advance(
            distance > self.thresholds.open_above_px,
            distance < self.thresholds.close_below_px,
        )
    }

    pub fn settle(&mut self) {
        self.state.settle();
    }
}
