//! # Namaskar-Core
//!
//! Core types and utilities for tracking a practitioner through the
//! Surya Namaskar A sequence from 2D body landmarks.

pub mod error;
pub mod geometry;
pub mod posture;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use posture::*;
pub use types::*;
