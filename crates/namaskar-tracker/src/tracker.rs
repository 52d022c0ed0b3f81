//! Debounced sequence state machine.

use serde::{Deserialize, Serialize};

use namaskar_core::{Posture, Result, SequenceDefinition, Timestamp};

use crate::config::{HistoryPolicy, TrackerConfig};
use crate::history::HistoryEntry;
use crate::state::TrackerState;

/// Something worth surfacing to the practitioner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerEvent {
    /// `posture` was confirmed and the cursor moved on to `cursor`
    StepConfirmed { posture: Posture, cursor: usize },
    /// The last posture of the cycle was confirmed; the cursor is back at 0
    CycleCompleted { repetitions: u32 },
}

/// What a single observation did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub label: Posture,
    /// Posture the cursor pointed at when the frame arrived
    pub expected: Posture,
    pub matched: bool,
    /// Streak length after this frame
    pub confirmation_progress: u32,
    pub event: Option<TrackerEvent>,
}

/// Advances a [`TrackerState`] through a [`SequenceDefinition`]
#[derive(Debug, Clone)]
pub struct SequenceTracker {
    sequence: SequenceDefinition,
    config: TrackerConfig,
}

impl SequenceTracker {
    pub fn new(sequence: SequenceDefinition, config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { sequence, config })
    }

    pub fn surya_namaskar_a(config: TrackerConfig) -> Result<Self> {
        Self::new(SequenceDefinition::surya_namaskar_a(), config)
    }

    pub fn sequence(&self) -> &SequenceDefinition {
        &self.sequence
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Fresh state sized for this tracker's history
    pub fn new_state(&self) -> TrackerState {
        TrackerState::new(self.config.history_capacity)
    }

    /// Feed one classified frame.
    ///
    /// A frame equal to the expected posture extends the confirmation streak;
    /// when the streak reaches the threshold the cursor advances by exactly one
    /// step (wrapping to 0 and counting a repetition after the last step) and
    /// the streak restarts. Any other frame, Unknown included, resets the streak.
    pub fn observe(&self, state: &mut TrackerState, label: Posture, now: Timestamp) -> Observation {
        state.cursor %= self.sequence.len();
        state.current_label = Some(label);

        let expected = self.sequence.expected(state.cursor);
        let matched = label == expected;

        let record = !label.is_unknown() || self.config.history_policy == HistoryPolicy::EveryFrame;
        if record {
            state.history.push(HistoryEntry {
                posture: label,
                timestamp: now,
                matched_expected: matched,
            });
        }

        if !matched {
            state.confirmation_progress = 0;
            return Observation {
                label,
                expected,
                matched,
                confirmation_progress: 0,
                event: None,
            };
        }

        state.confirmation_progress += 1;
        let event = if state.confirmation_progress >= self.config.confirmation_threshold {
            state.confirmation_progress = 0;
            Some(self.advance(state, expected))
        } else {
            None
        };

        Observation {
            label,
            expected,
            matched,
            confirmation_progress: state.confirmation_progress,
            event,
        }
    }

    fn advance(&self, state: &mut TrackerState, confirmed: Posture) -> TrackerEvent {
        if state.cursor == self.sequence.last_index() {
            state.cursor = 0;
            state.repetitions += 1;
            tracing::debug!(repetitions = state.repetitions, "sequence cycle completed");
            TrackerEvent::CycleCompleted {
                repetitions: state.repetitions,
            }
        } else {
            state.cursor += 1;
            tracing::debug!(
                posture = %confirmed,
                cursor = state.cursor,
                next = %self.sequence.expected(state.cursor),
                "posture confirmed"
            );
            TrackerEvent::StepConfirmed {
                posture: confirmed,
                cursor: state.cursor,
            }
        }
    }
}
