//! Recorded frame traces (JSON Lines).
//!
//! ```text
//! # t is the host clock in ms; frame is the camera frame id
//! {"t": 0, "frame": 1, "hand": [{"x":0.51,"y":0.80,"z":0.0}, ...21 points]}
//! {"t": 16, "frame": 1}
//! {"t": 33, "label": "OPEN_PALM"}
//! ```

use std::io::{self, BufRead};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gestures::{self, GestureLabel};
use crate::landmarks::HandLandmarks;
use crate::stabilizer::Millis;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub t: Millis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand: Option<HandLandmarks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<GestureLabel>,
}

impl TraceRecord {
    /// A pre-classified label wins over landmarks.
    pub fn raw_label(&self) -> GestureLabel {
        self.label
            .unwrap_or_else(|| gestures::classify(self.hand.as_ref()))
    }
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: timestamp {t}ms is earlier than previous {prev}ms")]
    NonMonotonic { line: usize, prev: Millis, t: Millis },
}

/// Streams records, enforcing non-decreasing timestamps.
pub struct TraceReader<R> {
    inner: R,
    line_no: usize,
    prev_t: Option<Millis>,
    buf: String,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_no: 0,
            prev_t: None,
            buf: String::new(),
        }
    }

    fn next_record(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let rec: TraceRecord =
                serde_json::from_str(line).map_err(|source| TraceError::Parse {
                    line: self.line_no,
                    source,
                })?;

            if let Some(prev) = self.prev_t {
                if rec.t < prev {
                    return Err(TraceError::NonMonotonic {
                        line: self.line_no,
                        prev,
                        t: rec.t,
                    });
                }
            }
            self.prev_t = Some(rec.t);
            return Ok(Some(rec));
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
