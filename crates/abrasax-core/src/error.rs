//! Error types for Abrasax

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The anchor axiom no longer hashes to the value captured at startup.
    /// Terminal: callers must stop, never retry.
    #[error("alignment corruption detected: expected {expected}, got {actual}")]
    IntegrityViolation { expected: String, actual: String },

    #[error("backend error: {collaborator} - {message}")]
    Backend {
        collaborator: String,
        message: String,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn integrity_violation(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::IntegrityViolation {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn backend(collaborator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            collaborator: collaborator.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Only an integrity violation ends the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::IntegrityViolation { .. })
    }
}
