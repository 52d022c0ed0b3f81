//! Error types for the Namaskar tracking system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid posture sequence: {0}")]
    InvalidSequence(String),

    #[error("Unknown posture identifier: {0}")]
    UnknownPosture(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Malformed frame at line {line}: {reason}")]
    MalformedFrame { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
