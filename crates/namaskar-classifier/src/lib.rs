//! # Namaskar-Classifier
//!
//! Rule-based posture classification from a single frame of body landmarks.
//!
//! ## Pipeline
//!
//! 1. **Features**: resolve the named landmarks, compute the eight joint
//!    angles (elbows, shoulders, hips, knees) and the profile-view flag
//! 2. **Rules**: walk an ordered decision list of postures, each a
//!    conjunction of angle windows and vertical-ordering predicates
//! 3. **Result**: the first rule that matches names the posture; if none
//!    does, the frame is `Unknown`
//!
//! Classification never fails. Missing landmarks produce zero angles and
//! false predicates, which steer the frame toward `Unknown`.

pub mod classifier;
pub mod config;
pub mod features;
pub mod rules;
pub mod synthetic;

pub use classifier::*;
pub use config::*;
pub use features::*;
pub use rules::*;
