//! A single practice session: classify each frame, then advance the tracker.

use serde::Serialize;

use namaskar_classifier::{AngleClassifier, Classification};
use namaskar_core::{LandmarkFrame, Posture, Result, SessionId, Timestamp, Translation};
use namaskar_tracker::{HistoryEntry, Observation, SequenceTracker, TrackerEvent, TrackerState};

use crate::config::AppConfig;

/// Per-frame result handed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameReport {
    pub session_id: SessionId,
    pub timestamp: Timestamp,
    pub classification: Classification,
    pub observation: Observation,
}

impl FrameReport {
    pub fn event(&self) -> Option<TrackerEvent> {
        self.observation.event
    }
}

/// Display-ready view of a session, the contract with the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub started_at: Timestamp,
    pub frames_processed: u64,
    /// `None` until the first frame arrives
    pub current_label: Option<Posture>,
    pub cursor: usize,
    pub sequence_len: usize,
    pub expected: Posture,
    pub expected_names: Translation<'static>,
    pub upcoming: Posture,
    pub repetitions: u32,
    pub confirmation_progress: u32,
    pub confirmation_threshold: u32,
    pub progress_fraction: f64,
    /// Oldest first
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    classifier: AngleClassifier,
    tracker: SequenceTracker,
    state: TrackerState,
    started_at: Timestamp,
    frames_processed: u64,
}

impl Session {
    pub fn new(
        id: SessionId,
        classifier: AngleClassifier,
        tracker: SequenceTracker,
        started_at: Timestamp,
    ) -> Self {
        let state = tracker.new_state();
        Self {
            id,
            classifier,
            tracker,
            state,
            started_at,
            frames_processed: 0,
        }
    }

    /// Surya Namaskar A session built from application config
    pub fn from_config(config: &AppConfig, started_at: Timestamp) -> Result<Self> {
        config.validate()?;
        let classifier = AngleClassifier::new(config.classifier.clone());
        let tracker = SequenceTracker::surya_namaskar_a(config.tracker.clone())?;
        Ok(Self::new(SessionId::new(), classifier, tracker, started_at))
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn tracker(&self) -> &SequenceTracker {
        &self.tracker
    }

    /// Classify `frame` and feed the label to the tracker
    pub fn process_frame(&mut self, frame: &LandmarkFrame, now: Timestamp) -> FrameReport {
        let classification = self.classifier.classify(frame);
        let observation = self.tracker.observe(&mut self.state, classification.posture, now);
        self.frames_processed += 1;

        if let Some(TrackerEvent::CycleCompleted { repetitions }) = observation.event {
            tracing::info!(session = %self.id, repetitions, "repetition completed");
        }

        FrameReport {
            session_id: self.id,
            timestamp: now,
            classification,
            observation,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let sequence = self.tracker.sequence();
        let cursor = self.state.cursor();
        let expected = sequence.expected(cursor);

        SessionSnapshot {
            session_id: self.id,
            started_at: self.started_at,
            frames_processed: self.frames_processed,
            current_label: self.state.current_label(),
            cursor,
            sequence_len: sequence.len(),
            expected,
            expected_names: expected.translation(),
            upcoming: sequence.upcoming(cursor),
            repetitions: self.state.repetitions(),
            confirmation_progress: self.state.confirmation_progress(),
            confirmation_threshold: self.tracker.config().confirmation_threshold,
            progress_fraction: self.state.progress_fraction(sequence.len()),
            history: self.state.history().to_vec(),
        }
    }

    /// Start over from the first posture with zero repetitions
    pub fn restart(&mut self, now: Timestamp) {
        self.state.reset();
        self.started_at = now;
        self.frames_processed = 0;
        tracing::info!(session = %self.id, "session restarted");
    }
}
