//! Classifier configuration.

use serde::{Deserialize, Serialize};

use namaskar_core::{Error, Result};

/// Geometric thresholds shared by the posture rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Horizontal shoulder separation below which the subject is in profile
    pub profile_max_shoulder_separation: f64,
    /// Maximum vertical shoulder/hip gap for a level torso (plank)
    pub torso_level_tolerance: f64,
    /// Landmarks with a visibility score below this are treated as missing
    pub min_visibility: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            profile_max_shoulder_separation: 0.2,
            torso_level_tolerance: 0.15,
            min_visibility: 0.0,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.profile_max_shoulder_separation > 0.0) {
            return Err(Error::Config(
                "profile_max_shoulder_separation must be positive".to_string(),
            ));
        }
        if !(self.torso_level_tolerance > 0.0) {
            return Err(Error::Config(
                "torso_level_tolerance must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(Error::Config(format!(
                "min_visibility must be within [0, 1], got {}",
                self.min_visibility
            )));
        }
        Ok(())
    }
}
