//! Per-frame entry point: landmarks in, render parameters out.

use log::debug;

use crate::gestures::{self, GestureLabel};
use crate::landmarks::HandLandmarks;
use crate::params::{RenderParams, map_to_params};
use crate::stabilizer::{Millis, StabilizationState, StepReport};

#[derive(Debug, Default)]
pub struct GestureEngine {
    state: StabilizationState,
    params: RenderParams,
    last: StepReport,
    transitions: u64,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per rendered frame. `None` means no hand was detected.
    pub fn update(&mut self, hand: Option<&HandLandmarks>, now: Millis) -> RenderParams {
        self.update_label(gestures::classify(hand), now)
    }

    /// Same as [`update`](Self::update) for callers that classify elsewhere.
    pub fn update_label(&mut self, raw: GestureLabel, now: Millis) -> RenderParams {
        let before = self.state.effective_gesture();
        let report = self.state.step(raw, now);

        if report.effective != before {
            self.transitions += 1;
            debug!(
                "gesture {} -> {} at {now}ms (raw {}, debounced {})",
                before, report.effective, report.raw, report.debounced
            );
        }

        self.last = report;
        self.params = map_to_params(report.effective);
        self.params
    }

    pub fn effective_gesture(&self) -> GestureLabel {
        self.state.effective_gesture()
    }

    pub fn params(&self) -> RenderParams {
        self.params
    }

    pub fn last_frame(&self) -> StepReport {
        self.last
    }

    /// Number of effective-gesture changes since construction.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn state(&self) -> &StabilizationState {
        &self.state
    }
}
