use std::fmt;

use serde::{Deserialize, Serialize};

use crate::landmarks::{
    HandLandmarks, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP,
};

/// Tip must sit this much further from the wrist than the PIP joint to count as extended.
pub const EXTENSION_MARGIN: f32 = 1.1;

/// Extended fingers (out of index/middle/ring/pinky) needed for an open palm.
pub const OPEN_PALM_MIN_FINGERS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestureLabel {
    #[default]
    Idle,
    OpenPalm,
    IndexPoint,
}

impl GestureLabel {
    pub const ALL: [GestureLabel; 3] = [
        GestureLabel::Idle,
        GestureLabel::OpenPalm,
        GestureLabel::IndexPoint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::Idle => "IDLE",
            GestureLabel::OpenPalm => "OPEN_PALM",
            GestureLabel::IndexPoint => "INDEX_POINT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerStates {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    pub fn of(hand: &HandLandmarks) -> Self {
        Self {
            index: is_extended(hand, INDEX_TIP, INDEX_PIP),
            middle: is_extended(hand, MIDDLE_TIP, MIDDLE_PIP),
            ring: is_extended(hand, RING_TIP, RING_PIP),
            pinky: is_extended(hand, PINKY_TIP, PINKY_PIP),
        }
    }

    pub fn extended_count(&self) -> usize {
        [self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|e| **e)
            .count()
    }
}

// distance-based, so it holds up under hand rotation
fn is_extended(hand: &HandLandmarks, tip: usize, pip: usize) -> bool {
    hand.reach(tip) > hand.reach(pip) * EXTENSION_MARGIN
}

/// Raw per-frame label. No hand means `Idle`.
pub fn classify(hand: Option<&HandLandmarks>) -> GestureLabel {
    let Some(hand) = hand else {
        return GestureLabel::Idle;
    };
    let f = FingerStates::of(hand);

    // lenient: one noisy finger shouldn't drop the palm
    if f.extended_count() >= OPEN_PALM_MIN_FINGERS {
        return GestureLabel::OpenPalm;
    }
    if f.index && !f.middle && !f.ring && !f.pinky {
        return GestureLabel::IndexPoint;
    }
    GestureLabel::Idle
}

/// Keeps the classifier to one call per camera frame when the capture loop
/// runs faster than the camera.
#[derive(Debug, Default)]
pub struct FrameGate {
    last_source_frame: Option<u64>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `false` when `source_frame` repeats the previously admitted frame.
    pub fn admit(&mut self, source_frame: Option<u64>) -> bool {
        let Some(id) = source_frame else {
            return true;
        };
        if self.last_source_frame == Some(id) {
            return false;
        }
        self.last_source_frame = Some(id);
        true
    }

    pub fn classify_frame(
        &mut self,
        source_frame: Option<u64>,
        hand: Option<&HandLandmarks>,
    ) -> Option<GestureLabel> {
        self.admit(source_frame).then(|| classify(hand))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::landmarks::{HandLandmarks, LANDMARK_COUNT, Landmark};

    const TIPS: [usize; 4] = [8, 12, 16, 20];
    const PIPS: [usize; 4] = [6, 10, 14, 18];

    /// Hand with the wrist at the origin. Extended fingers put the tip well past
    /// the PIP joint; curled ones fold the tip back toward the wrist.
    pub fn hand(extended: [bool; 4]) -> HandLandmarks {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        for (i, ext) in extended.iter().enumerate() {
            let x = i as f32 * 0.02;
            pts[PIPS[i]] = Landmark::new(x, -0.30, 0.0);
            pts[TIPS[i]] = if *ext {
                Landmark::new(x, -0.50, 0.0)
            } else {
                Landmark::new(x, -0.20, 0.0)
            };
        }
        HandLandmarks::new(pts)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::hand;
    use super::*;

    #[test]
    fn no_hand_is_idle() {
        assert_eq!(classify(None), GestureLabel::Idle);
    }

    #[test]
    fn three_of_four_fingers_is_open_palm() {
        assert_eq!(
            classify(Some(&hand([true, true, true, true]))),
            GestureLabel::OpenPalm
        );
        assert_eq!(
            classify(Some(&hand([false, true, true, true]))),
            GestureLabel::OpenPalm
        );
    }

    #[test]
    fn lone_index_is_point() {
        assert_eq!(
            classify(Some(&hand([true, false, false, false]))),
            GestureLabel::IndexPoint
        );
    }

    #[test]
    fn two_fingers_is_idle() {
        assert_eq!(
            classify(Some(&hand([true, true, false, false]))),
            GestureLabel::Idle
        );
        assert_eq!(
            classify(Some(&hand([false, false, false, false]))),
            GestureLabel::Idle
        );
    }

    #[test]
    fn borderline_extension_is_rejected() {
        // tip only 5% further out than the PIP joint
        let mut pts = *hand([false; 4]).points();
        pts[INDEX_PIP] = crate::landmarks::Landmark::new(0.0, -0.40, 0.0);
        pts[INDEX_TIP] = crate::landmarks::Landmark::new(0.0, -0.42, 0.0);
        let h = HandLandmarks::new(pts);
        assert!(!FingerStates::of(&h).index);
    }

    #[test]
    fn gate_skips_repeated_source_frame() {
        let mut gate = FrameGate::new();
        let h = hand([true, true, true, true]);
        assert_eq!(
            gate.classify_frame(Some(7), Some(&h)),
            Some(GestureLabel::OpenPalm)
        );
        assert_eq!(gate.classify_frame(Some(7), Some(&h)), None);
        assert_eq!(gate.classify_frame(Some(8), None), Some(GestureLabel::Idle));
        assert!(gate.admit(None));
        assert!(gate.admit(None));
    }

    #[test]
    fn labels_parse_and_serialize() {
        assert_eq!(GestureLabel::parse("open_palm"), Some(GestureLabel::OpenPalm));
        assert_eq!(GestureLabel::parse("wave"), None);
        assert_eq!(
            serde_json::to_string(&GestureLabel::IndexPoint).unwrap(),
            "\"INDEX_POINT\""
        );
    }
}
