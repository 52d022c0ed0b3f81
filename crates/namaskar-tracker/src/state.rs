//! Per-session tracker state.

use serde::{Deserialize, Serialize};

use namaskar_core::Posture;

use crate::history::PoseHistory;

/// Mutable progress of one session through the sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerState {
    /// Index of the expected posture, always `< sequence.len()`
    pub(crate) cursor: usize,
    pub(crate) repetitions: u32,
    /// Last classified posture; `None` before the first frame
    pub(crate) current_label: Option<Posture>,
    /// Consecutive frames matching the expected posture
    pub(crate) confirmation_progress: u32,
    pub(crate) history: PoseHistory,
}

impl TrackerState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            cursor: 0,
            repetitions: 0,
            current_label: None,
            confirmation_progress: 0,
            history: PoseHistory::with_capacity(history_capacity),
        }
    }

    /// Back to a fresh session; history capacity is kept
    pub fn reset(&mut self) {
        *self = Self::new(self.history.capacity());
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    pub fn current_label(&self) -> Option<Posture> {
        self.current_label
    }

    pub fn confirmation_progress(&self) -> u32 {
        self.confirmation_progress
    }

    pub fn history(&self) -> &PoseHistory {
        &self.history
    }

    /// Share of the cycle already confirmed, in `[0, 1)`
    pub fn progress_fraction(&self, sequence_len: usize) -> f64 {
        if sequence_len == 0 {
            return 0.0;
        }
        self.cursor as f64 / sequence_len as f64
    }
}
