//! Tracker configuration.

use serde::{Deserialize, Serialize};

use namaskar_core::{Error, Result};

/// Which observations are written to the history log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPolicy {
    /// Skip frames classified as Unknown
    #[default]
    RecognizedOnly,
    /// Record every frame, Unknown included
    EveryFrame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Consecutive matching frames needed to confirm a posture
    pub confirmation_threshold: u32,
    /// Maximum number of history entries kept
    pub history_capacity: usize,
    pub history_policy: HistoryPolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            confirmation_threshold: 10,
            history_capacity: 10,
            history_policy: HistoryPolicy::RecognizedOnly,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.confirmation_threshold == 0 {
            return Err(Error::Config(
                "confirmation_threshold must be at least 1".to_string(),
            ));
        }
        if self.history_capacity == 0 {
            return Err(Error::Config(
                "history_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
