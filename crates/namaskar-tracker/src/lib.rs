//! # Namaskar-Tracker
//!
//! Sequence progression for Surya Namaskar A.
//!
//! Every classified frame is fed to [`SequenceTracker::observe`], which
//! compares it with the posture the cursor currently expects. A match only
//! counts once it has been seen on `confirmation_threshold` consecutive
//! frames; any other frame breaks the streak. Confirming the final posture
//! of the cycle wraps the cursor to the start and counts a repetition.
//!
//! All mutable progress lives in [`TrackerState`], a plain value owned by
//! the session. The tracker itself holds only configuration.

pub mod config;
pub mod history;
pub mod state;
pub mod tracker;

pub use config::*;
pub use history::*;
pub use state::*;
pub use tracker::*;
