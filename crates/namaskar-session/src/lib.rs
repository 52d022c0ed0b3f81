//! # Namaskar-Session
//!
//! The boundary around the classifier and tracker: a [`Session`] classifies
//! each delivered frame and advances its own tracker state, a
//! [`SessionRegistry`] keeps any number of sessions apart, and the replay
//! module turns recorded JSON-lines landmark streams into frames.
//!
//! Frames are processed synchronously and in delivery order. The registry
//! lock only serializes access to the session map.

pub mod config;
pub mod registry;
pub mod replay;
pub mod session;

pub use config::*;
pub use registry::*;
pub use replay::*;
pub use session::*;
