// Session state - owns every detector and runs one pose through them

use crate::core::config::Config;
use crate::core::jumping_jack::JumpingJackDetector;
use crate::core::rep_detector::{
    ArmRaiseDetector, CurlDetector, LegSpreadDetector, Side, SquatDetector,
};
use crate::models::exercise::{CompoundState, Exercise, RepCounts, RepEvent};
use crate::models::pose::Pose;
use uuid::Uuid;

/// All rep state for one workout session
pub struct SessionState {
    id: String,
    frames_processed: u64,
    log_first_poses: u32,
    squat: SquatDetector,
    left_curl: CurlDetector,
    right_curl: CurlDetector,
    arm_raise: ArmRaiseDetector,
    leg_spread: LegSpreadDetector,
    jumping_jack: JumpingJackDetector,
}

impl SessionState {
    pub fn new(config: &Config) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            frames_processed: 0,
            log_first_poses: config.log_first_poses,
            squat: SquatDetector::new(config),
            left_curl: CurlDetector::new(Side::Left, config),
            right_curl: CurlDetector::new(Side::Right, config),
            arm_raise: ArmRaiseDetector::new(config),
            leg_spread: LegSpreadDetector::new(config),
            jumping_jack: JumpingJackDetector::new(config.jumping_jack_window_frames),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Run every detector on one frame, then the jumping-jack check
    pub fn process_pose(&mut self, pose: &Pose) -> RepCounts {
        let frame_index = self.frames_processed;
        self.frames_processed += 1;

        if frame_index < u64::from(self.log_first_poses) {
            tracing::debug!(frame = frame_index + 1, score = pose.score, pose = ?pose, "Pose received");
        }

        let events = [
            (Exercise::Squat, self.squat.observe(pose)),
            (Exercise::LeftCurl, self.left_curl.observe(pose)),
            (Exercise::RightCurl, self.right_curl.observe(pose)),
            (Exercise::ArmRaise, self.arm_raise.observe(pose)),
            (Exercise::LegSpread, self.leg_spread.observe(pose)),
        ];

        let arm = events[3].1;
        let leg = events[4].1;
        let jumping_jack = self.jumping_jack.observe(frame_index, arm, leg);

        let counts = self.counts();
        for (exercise, event) in events
            .into_iter()
            .chain(std::iter::once((Exercise::JumpingJack, jumping_jack)))
        {
            log_event(exercise, event, frame_index, counts.get(exercise));
        }

        counts
    }

    pub fn counts(&self) -> RepCounts {
        RepCounts {
            squat: self.squat.state().count(),
            left_curl: self.left_curl.state().count(),
            right_curl: self.right_curl.state().count(),
            arm_raise: self.arm_raise.state().count(),
            leg_spread: self.leg_spread.state().count(),
            jumping_jack: self.jumping_jack.count(),
        }
    }

    pub fn compound_state(&self) -> CompoundState {
        self.jumping_jack.state()
    }

    /// Whether any exercise is mid-rep
    pub fn any_active(&self) -> bool {
        self.squat.state().is_active()
            || self.left_curl.state().is_active()
            || self.right_curl.state().is_active()
            || self.arm_raise.state().is_active()
            || self.leg_spread.state().is_active()
    }

    /// Return every machine to Rest and drop pending compound flags; counts are kept
    pub fn settle(&mut self) {
        self.squat.settle();
        self.left_curl.settle();
        self.right_curl.settle();
        self.arm_raise.settle();
        self.leg_spread.settle();
        self.jumping_jack.settle();
    }
}

fn log_event(exercise: Exercise, event: RepEvent, frame: u64, count: u32) {
    match event {
        RepEvent::Completed => {
            tracing::info!(exercise = exercise.to_string(), count, frame, "Rep counted")
        }
        RepEvent::Entered => {
            tracing::debug!(exercise = exercise.to_string(), frame, "Entered active phase")
        }
        RepEvent::Gated => {
            tracing::trace!(exercise = exercise.to_string(), frame, "Low-confidence joints, frame skipped")
        }
        RepEvent::Steady => {}
    }
}
