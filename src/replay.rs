//! Drives a [`GestureEngine`] over a recorded trace, one JSON line per frame.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::engine::GestureEngine;
use crate::gestures::{FrameGate, GestureLabel};
use crate::stabilizer::Millis;
use crate::trace::TraceReader;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReplayOptions {
    pub dedup_source_frames: bool,
    pub changes_only: bool,
    pub pretty: bool,
}

impl From<&Config> for ReplayOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            dedup_source_frames: cfg.replay.dedup_source_frames,
            changes_only: cfg.replay.changes_only,
            pretty: cfg.output.pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub frames: u64,
    pub skipped: u64,
    pub transitions: u64,
    pub final_gesture: GestureLabel,
}

#[derive(Debug, Serialize)]
struct FrameLine {
    t: Millis,
    raw: GestureLabel,
    debounced: GestureLabel,
    effective: GestureLabel,
    scale: f32,
    rotation_speed: f32,
    show_secondary_display: bool,
}

fn write_line<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn replay<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    opts: ReplayOptions,
) -> Result<ReplaySummary> {
    let mut engine = GestureEngine::new();
    let mut gate = FrameGate::new();
    let mut frames = 0u64;
    let mut skipped = 0u64;
    let mut prev_effective: Option<GestureLabel> = None;

    for rec in TraceReader::new(input) {
        let rec = rec.context("trace replay aborted")?;

        if opts.dedup_source_frames && !gate.admit(rec.frame) {
            skipped += 1;
            continue;
        }

        let params = engine.update_label(rec.raw_label(), rec.t);
        let step = engine.last_frame();
        frames += 1;

        let changed = prev_effective != Some(step.effective);
        prev_effective = Some(step.effective);
        if opts.changes_only && !changed {
            continue;
        }

        let line = FrameLine {
            t: rec.t,
            raw: step.raw,
            debounced: step.debounced,
            effective: step.effective,
            scale: params.scale,
            rotation_speed: params.rotation_speed,
            show_secondary_display: params.show_secondary_display,
        };
        write_line(out, &line, opts.pretty)?;
    }

    if frames == 0 {
        warn!("trace contained no frames");
    }

    let summary = ReplaySummary {
        frames,
        skipped,
        transitions: engine.transitions(),
        final_gesture: engine.effective_gesture(),
    };
    info!(
        "replayed {} frames ({} repeated skipped), {} transitions, final {}",
        summary.frames, summary.skipped, summary.transitions, summary.final_gesture
    );
    Ok(summary)
}

/// Raw classifier output per admitted frame, no stabilization.
pub fn classify_trace<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    opts: ReplayOptions,
) -> Result<u64> {
    #[derive(Serialize)]
    struct RawLine {
        t: Millis,
        raw: GestureLabel,
    }

    let mut gate = FrameGate::new();
    let mut frames = 0u64;
    for rec in TraceReader::new(input) {
        let rec = rec.context("trace classification aborted")?;
        if opts.dedup_source_frames && !gate.admit(rec.frame) {
            continue;
        }
        write_line(
            out,
            &RawLine {
                t: rec.t,
                raw: rec.raw_label(),
            },
            opts.pretty,
        )?;
        frames += 1;
    }
    Ok(frames)
}
