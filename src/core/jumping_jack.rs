// Jumping jack - compound event from arm-raise and leg-spread completions

use crate::models::exercise::{CompoundState, RepEvent};

/// Pairs arm and leg completion edges into jumping jacks.
///
/// A completion stays pending until its counterpart arrives. Without a window
/// it waits forever; with `window_frames` it is dropped once it is older than
/// that many frames.
#[derive(Debug, Clone, Default)]
pub struct JumpingJackDetector {
    /// Frame index at which each side last completed, while unconsumed
    arm_pending: Option<u64>,
    leg_pending: Option<u64>,
    count: u32,
    window_frames: Option<u32>,
}

impl JumpingJackDetector {
    pub fn new(window_frames: Option<u32>) -> Self {
        Self {
            window_frames,
            ..Default::default()
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn state(&self) -> CompoundState {
        CompoundState {
            arm_rep_done: self.arm_pending.is_some(),
            leg_rep_done: self.leg_pending.is_some(),
            count: self.count,
        }
    }

    /// Consume this frame's completion edges; returns `Completed` when a jumping jack counts
    pub fn observe(&mut self, frame_index: u64, arm: RepEvent, leg: RepEvent) -> RepEvent {
        if arm.is_completed() {
            self.arm_pending = Some(frame_index);
        }
        if leg.is_completed() {
            self.leg_pending = Some(frame_index);
        }

        if let Some(window) = self.window_frames {
            let expired =
                |raised: u64| frame_index.saturating_sub(raised) > u64::from(window);
            if self.arm_pending.is_some_and(expired) {
                self.arm_pending = None;
            }
            if self.leg_pending.is_some_and(expired) {
                self.leg_pending = None;
            }
        }

        if self.arm_pending.is_some() && self.leg_pending.is_some() {
            self.arm_pending = None;
            self.leg_pending = None;
            self.count = self.count.saturating_add(1);
            return RepEvent::Completed;
        }

        RepEvent::Steady
    }

    /// Drop pending completions without counting
    pub fn settle(&mut self) {
        self.arm_pending = None;
        self.leg_pending = None;
    }
}
