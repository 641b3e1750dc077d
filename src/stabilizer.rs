//! Debounce and hysteresis over the raw per-frame gesture label.
//!
//! Every window is measured in caller-supplied wall-clock milliseconds, never in
//! frames, so the filter behaves the same whether it is driven at 30 or 144 Hz
//! or with gaps. Feed one `(label, now)` pair per frame through [`StabilizationState::step`],
//! or call [`StabilizationState::debounce`] and [`StabilizationState::advance`]
//! separately.

use log::trace;
use serde::Serialize;

use crate::gestures::GestureLabel;

/// Caller clock in milliseconds. Must be non-decreasing across calls.
pub type Millis = u64;

/// A raw label must persist longer than this before it reaches the state machine.
pub const DEBOUNCE_HOLD_MS: Millis = 150;
/// A sphere session survives this long without a debounced palm.
pub const SPHERE_MEMORY_MS: Millis = 2000;
/// Session age required before a point is accepted (filters palm->point flicks).
pub const POINT_ARMING_MS: Millis = 400;
/// After a committed point, pointing is re-accepted without a sphere session.
pub const POINT_STICKY_MS: Millis = 500;
/// Committed point survives this long through idle frames. Wins over palm grace.
pub const POINT_GRACE_MS: Millis = 800;
/// Debounced palm survives this long through idle frames.
pub const PALM_GRACE_MS: Millis = 500;

/// Labels seen at each stage for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub raw: GestureLabel,
    pub debounced: GestureLabel,
    pub effective: GestureLabel,
}

/// All mutable state of the stabilizer, owned by the frame loop.
///
/// The "last seen" timestamps are `None` until the event first happens, which
/// keeps the grace windows closed at session start even when the caller's clock
/// starts near zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StabilizationState {
    effective_gesture: GestureLabel,
    pending_label: GestureLabel,
    pending_since: Millis,
    sphere_started_at: Option<Millis>,
    last_sphere_at: Option<Millis>,
    last_index_commit_at: Option<Millis>,
}

// true when `at` happened strictly less than `window` ms before `now`
fn within(now: Millis, at: Option<Millis>, window: Millis) -> bool {
    at.is_some_and(|t| now.saturating_sub(t) < window)
}

impl StabilizationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effective_gesture(&self) -> GestureLabel {
        self.effective_gesture
    }

    pub fn pending_label(&self) -> GestureLabel {
        self.pending_label
    }

    pub fn pending_since(&self) -> Millis {
        self.pending_since
    }

    pub fn sphere_started_at(&self) -> Option<Millis> {
        self.sphere_started_at
    }

    pub fn last_sphere_at(&self) -> Option<Millis> {
        self.last_sphere_at
    }

    pub fn last_index_commit_at(&self) -> Option<Millis> {
        self.last_index_commit_at
    }

    /// Debounce then advance. Returns every stage for diagnostics.
    pub fn step(&mut self, raw: GestureLabel, now: Millis) -> StepReport {
        let debounced = self.debounce(raw, now);
        let effective = self.advance(debounced, now);
        StepReport {
            raw,
            debounced,
            effective,
        }
    }

    /// Holds the previous effective gesture until `raw` has been stable for
    /// more than [`DEBOUNCE_HOLD_MS`]. Any change restarts the hold.
    pub fn debounce(&mut self, raw: GestureLabel, now: Millis) -> GestureLabel {
        if raw != self.pending_label {
            trace!("pending {} -> {} at {now}ms", self.pending_label, raw);
            self.pending_label = raw;
            self.pending_since = now;
        }

        if now.saturating_sub(self.pending_since) > DEBOUNCE_HOLD_MS {
            self.pending_label
        } else {
            self.effective_gesture
        }
    }

    /// Derives and commits the effective gesture from a debounced label.
    pub fn advance(&mut self, debounced: GestureLabel, now: Millis) -> GestureLabel {
        self.track_sphere_session(debounced, now);

        let effective = match debounced {
            GestureLabel::IndexPoint => self.resolve_point(now),
            GestureLabel::Idle => self.resolve_idle(now),
            GestureLabel::OpenPalm => GestureLabel::OpenPalm,
        };

        self.effective_gesture = effective;
        // grace-period echoes must not extend stickiness
        if effective == GestureLabel::IndexPoint && debounced == GestureLabel::IndexPoint {
            self.last_index_commit_at = Some(now);
        }
        effective
    }

    fn track_sphere_session(&mut self, debounced: GestureLabel, now: Millis) {
        if debounced == GestureLabel::OpenPalm {
            self.last_sphere_at = Some(now);
            if self.sphere_started_at.is_none() {
                trace!("sphere session started at {now}ms");
                self.sphere_started_at = Some(now);
            }
        } else if self.sphere_started_at.is_some()
            && self
                .last_sphere_at
                .is_none_or(|t| now.saturating_sub(t) > SPHERE_MEMORY_MS)
        {
            trace!("sphere session expired at {now}ms");
            self.sphere_started_at = None;
        }
    }

    // Pointing only counts shortly after a sphere session, or while sticky.
    fn resolve_point(&self, now: Millis) -> GestureLabel {
        let sphere_recent = self.sphere_started_at.is_some()
            && within(now, self.last_sphere_at, SPHERE_MEMORY_MS);
        let sticky = within(now, self.last_index_commit_at, POINT_STICKY_MS);

        if !(sphere_recent || sticky) {
            return GestureLabel::Idle;
        }

        // Stickiness passes through unconditionally, so a missing session start
        // never has to be measured.
        let armed = sticky
            || self
                .sphere_started_at
                .is_some_and(|s| now.saturating_sub(s) > POINT_ARMING_MS);

        if armed {
            GestureLabel::IndexPoint
        } else {
            GestureLabel::OpenPalm
        }
    }

    fn resolve_idle(&self, now: Millis) -> GestureLabel {
        if within(now, self.last_index_commit_at, POINT_GRACE_MS) {
            GestureLabel::IndexPoint
        } else if within(now, self.last_sphere_at, PALM_GRACE_MS) {
            GestureLabel::OpenPalm
        } else {
            GestureLabel::Idle
        }
    }
}
