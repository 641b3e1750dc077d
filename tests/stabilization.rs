//! Frame-by-frame scenarios at a 10ms frame interval.

use gesturectl::GestureLabel::{self, Idle, IndexPoint, OpenPalm};
use gesturectl::stabilizer::{DEBOUNCE_HOLD_MS, POINT_ARMING_MS};
use gesturectl::{GestureEngine, Millis, map_to_params};

const FRAME: Millis = 10;

/// Feeds `raw` for every frame in `[from, to)` and returns `(t, effective)` per frame.
fn hold(
    e: &mut GestureEngine,
    raw: GestureLabel,
    from: Millis,
    to: Millis,
) -> Vec<(Millis, GestureLabel)> {
    (from..to)
        .step_by(FRAME as usize)
        .map(|t| {
            e.update_label(raw, t);
            (t, e.effective_gesture())
        })
        .collect()
}

fn assert_all(frames: &[(Millis, GestureLabel)], want: GestureLabel) {
    for (t, g) in frames {
        assert_eq!(*g, want, "t={t}ms");
    }
}

fn split_at(
    frames: &[(Millis, GestureLabel)],
    t: Millis,
) -> (Vec<(Millis, GestureLabel)>, Vec<(Millis, GestureLabel)>) {
    frames.iter().copied().partition(|(ft, _)| *ft < t)
}

#[test]
fn sustained_raw_change_lands_after_hold() {
    let mut e = GestureEngine::new();
    let frames = hold(&mut e, OpenPalm, 0, 300);
    let (before, after) = split_at(&frames, DEBOUNCE_HOLD_MS + FRAME);
    assert_all(&before, Idle);
    assert_all(&after, OpenPalm);
}

#[test]
fn single_frame_blip_never_changes_output() {
    let mut e = GestureEngine::new();
    hold(&mut e, OpenPalm, 0, 300);
    assert_eq!(e.effective_gesture(), OpenPalm);
    let transitions = e.transitions();

    let mut frames = hold(&mut e, Idle, 300, 310);
    frames.extend(hold(&mut e, OpenPalm, 310, 400));
    frames.extend(hold(&mut e, IndexPoint, 400, 410));
    frames.extend(hold(&mut e, OpenPalm, 410, 800));
    assert_all(&frames, OpenPalm);
    assert_eq!(e.transitions(), transitions);
}

#[test]
fn continuous_flicker_is_held() {
    let mut e = GestureEngine::new();
    hold(&mut e, OpenPalm, 0, 300);
    for t in (300..2000).step_by(FRAME as usize) {
        let raw = if (t / FRAME) % 2 == 0 { IndexPoint } else { Idle };
        e.update_label(raw, t);
        assert_eq!(e.effective_gesture(), OpenPalm, "t={t}ms");
    }
}

#[test]
fn point_after_sphere_waits_for_arming() {
    let mut e = GestureEngine::new();
    hold(&mut e, OpenPalm, 0, 200);
    let session = e.state().sphere_started_at().unwrap();
    assert_eq!(session, 160);

    let frames = hold(&mut e, IndexPoint, 200, 1200);
    // the point is held back until the sphere session is older than the arming delay
    let (early, late) = split_at(&frames, session + POINT_ARMING_MS + 1);
    assert_all(&early, OpenPalm);
    assert_all(&late, IndexPoint);
    assert_eq!(late[0].0, 570);
    assert_eq!(e.params(), map_to_params(IndexPoint));
}

#[test]
fn point_without_sphere_is_ignored() {
    let mut e = GestureEngine::new();
    assert_all(&hold(&mut e, IndexPoint, 0, 3000), Idle);
    assert_eq!(e.transitions(), 0);
}

#[test]
fn point_after_stale_sphere_is_ignored() {
    let mut e = GestureEngine::new();
    hold(&mut e, OpenPalm, 0, 200);
    let idle = hold(&mut e, Idle, 200, 3000);
    assert_eq!(idle.last().unwrap().1, Idle);
    assert_eq!(e.state().sphere_started_at(), None);
    assert_all(&hold(&mut e, IndexPoint, 3000, 5000), Idle);
}

#[test]
fn brief_dropout_keeps_point_then_reverts() {
    let mut e = GestureEngine::new();
    hold(&mut e, OpenPalm, 0, 200);
    hold(&mut e, IndexPoint, 200, 1000);
    assert_eq!(e.effective_gesture(), IndexPoint);

    let mut frames = hold(&mut e, Idle, 1000, 1300);
    frames.extend(hold(&mut e, IndexPoint, 1300, 2000));
    assert_all(&frames, IndexPoint);

    // true idleness: debounce hold, then the point grace window
    let frames = hold(&mut e, Idle, 2000, 3500);
    let (kept, gone) = split_at(&frames, 2950);
    assert_all(&kept, IndexPoint);
    assert_all(&gone, Idle);
    assert_eq!(e.params(), map_to_params(Idle));
}

#[test]
fn brief_palm_dropout_keeps_palm_then_reverts() {
    let mut e = GestureEngine::new();
    hold(&mut e, OpenPalm, 0, 1000);

    let mut frames = hold(&mut e, Idle, 1000, 1300);
    frames.extend(hold(&mut e, OpenPalm, 1300, 2000));
    assert_all(&frames, OpenPalm);

    let frames = hold(&mut e, Idle, 2000, 3000);
    let (kept, gone) = split_at(&frames, 2650);
    assert_all(&kept, OpenPalm);
    assert_all(&gone, Idle);
}

#[test]
fn irregular_frame_gaps_use_wall_clock() {
    let mut e = GestureEngine::new();
    // two calls 151ms apart debounce just like sixteen calls 10ms apart
    e.update_label(OpenPalm, 1000);
    assert_eq!(e.effective_gesture(), Idle);
    e.update_label(OpenPalm, 1151);
    assert_eq!(e.effective_gesture(), OpenPalm);
    // repeated calls at the same instant are harmless
    e.update_label(OpenPalm, 1151);
    e.update_label(OpenPalm, 1151);
    assert_eq!(e.transitions(), 1);
}
