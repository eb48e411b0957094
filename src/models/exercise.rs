// Data models for per-exercise rep state and count snapshots

use serde::{Deserialize, Serialize};

/// Motions tracked off the pose stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    Squat,
    LeftCurl,
    RightCurl,
    ArmRaise,
    LegSpread,
    JumpingJack,
}

impl Exercise {
    pub fn to_string(&self) -> &'static str {
        match self {
            Exercise::Squat => "squat",
            Exercise::LeftCurl => "left_curl",
            Exercise::RightCurl => "right_curl",
            Exercise::ArmRaise => "arm_raise",
            Exercise::LegSpread => "leg_spread",
            Exercise::JumpingJack => "jumping_jack",
        }
    }
}

/// What a detector did with one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepEvent {
    /// Required joints were not confident enough; state untouched
    Gated,
    /// Signal evaluated, no transition
    Steady,
    /// Rest -> Active
    Entered,
    /// Active -> Rest, count incremented
    Completed,
}

impl RepEvent {
    pub fn is_completed(self) -> bool {
        self == RepEvent::Completed
    }
}

// ==============================================================================
// Exercise State
// ==============================================================================

/// Two-state Rest/Active machine plus its rep count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseState {
    active: bool,
    count: u32,
}

impl ExerciseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Evaluate one frame: Rest->Active on `enter`, otherwise Active->Rest on `exit`
    pub fn advance(&mut self, enter: bool, exit: bool) -> RepEvent {
        if !self.active {
            if enter {
                self.active = true;
                return RepEvent::Entered;
            }
            RepEvent::Steady
        } else if exit {
            self.active = false;
            self.count = self.count.saturating_add(1);
            RepEvent::Completed
        } else {
            RepEvent::Steady
        }
    }

    /// Drop back to Rest without counting
    pub fn settle(&mut self) {
        self.active = false;
    }
}

/// Pending completion flags feeding the jumping-jack detector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundState {
    pub arm_rep_done: bool,
    pub leg_rep_done: bool,
    pub count: u32,
}

// ==============================================================================
// Snapshots
// ==============================================================================

/// Counts published to the presentation layer after every frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepCounts {
    pub squat: u32,
    pub left_curl: u32,
    pub right_curl: u32,
    pub arm_raise: u32,
    pub leg_spread: u32,
    pub jumping_jack: u32,
}

impl RepCounts {
    pub fn get(&self, exercise: Exercise) -> u32 {
        match exercise {
            Exercise::Squat => self.squat,
            Exercise::LeftCurl => self.left_curl,
            Exercise::RightCurl => self.right_curl,
            Exercise::ArmRaise => self.arm_raise,
            Exercise::LegSpread => self.leg_spread,
            Exercise::JumpingJack => self.jumping_jack,
        }
    }

    /// Reps of the five single-motion exercises.
    ///
    /// Jumping jacks are left out: each one is built from an arm raise and a
    /// leg spread that are already counted here.
    pub fn base_reps(&self) -> u32 {
        self.squat + self.left_curl + self.right_curl + self.arm_raise + self.leg_spread
    }
}
