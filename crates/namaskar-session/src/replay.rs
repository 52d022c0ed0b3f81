//! Recorded landmark frames in JSON-lines form.
//!
//! One record per line:
//!
//! ```json
//! {"timestamp_ms": 1033, "width": 640, "height": 480, "landmarks": [{"x": 0.5, "y": 0.2}]}
//! ```
//!
//! `timestamp_ms` may be omitted, in which case the reader synthesizes one
//! from the record index at roughly 30 fps.

use serde::{Deserialize, Serialize};
use std::io::BufRead;

use namaskar_classifier::synthetic::canonical_frame;
use namaskar_core::{
    Error, FrameDimensions, Landmark, LandmarkFrame, Result, SequenceDefinition, Timestamp,
};

/// Spacing of synthesized timestamps
pub const DEFAULT_FRAME_INTERVAL_MS: i64 = 33;

/// One recorded frame as it appears on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<i64>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    pub landmarks: Vec<Landmark>,
}

impl FrameRecord {
    pub fn from_frame(frame: &LandmarkFrame, timestamp: Option<Timestamp>) -> Self {
        Self {
            timestamp_ms: timestamp.map(|t| t.as_millis()),
            width: frame.dimensions.width,
            height: frame.dimensions.height,
            landmarks: frame.landmarks.clone(),
        }
    }

    pub fn into_frame(self) -> LandmarkFrame {
        LandmarkFrame::new(self.landmarks, FrameDimensions::new(self.width, self.height))
    }
}

/// A decoded record together with its resolved timestamp and source line
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayFrame {
    pub line: usize,
    pub timestamp: Timestamp,
    pub frame: LandmarkFrame,
}

/// Parse one line. Blank lines yield `Ok(None)`.
pub fn parse_line(line_number: usize, line: &str) -> Result<Option<FrameRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some).map_err(|e| Error::MalformedFrame {
        line: line_number,
        reason: e.to_string(),
    })
}

/// Iterator over the frames of a JSON-lines stream.
///
/// A malformed line is reported as an error item and the iterator carries on
/// with the next line, so the caller decides whether to skip or stop.
pub struct FrameReader<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
    records_read: i64,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            records_read: 0,
        }
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<ReplayFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            match parse_line(self.line_number, &line) {
                Ok(None) => continue,
                Ok(Some(record)) => {
                    let millis = record
                        .timestamp_ms
                        .unwrap_or(self.records_read * DEFAULT_FRAME_INTERVAL_MS);
                    let timestamp = Timestamp::from_millis(millis);
                    self.records_read += 1;
                    return Some(Ok(ReplayFrame {
                        line: self.line_number,
                        timestamp,
                        frame: record.into_frame(),
                    }));
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// A stream that walks `sequence` `cycles` times, holding each posture for
/// `frames_per_step` frames
pub fn synthetic_stream(
    sequence: &SequenceDefinition,
    cycles: usize,
    frames_per_step: usize,
) -> Result<Vec<ReplayFrame>> {
    let mut frames = Vec::with_capacity(cycles * sequence.len() * frames_per_step);
    for _ in 0..cycles {
        for &posture in sequence.steps() {
            let frame = canonical_frame(posture).ok_or_else(|| {
                Error::InvalidInput(format!("no synthetic frame for {}", posture))
            })?;
            for _ in 0..frames_per_step {
                let index = frames.len();
                frames.push(ReplayFrame {
                    line: index + 1,
                    timestamp: Timestamp::from_millis(index as i64 * DEFAULT_FRAME_INTERVAL_MS),
                    frame: frame.clone(),
                });
            }
        }
    }
    Ok(frames)
}
