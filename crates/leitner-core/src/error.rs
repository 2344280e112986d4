//! Scheduler and storage error types.
//!
//! Configuration and persistence failures are raised out of the scheduler to
//! its caller. Reviewer cancellation is not an error; it is a
//! [`Judgment`](crate::traits::Judgment) variant.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the scheduler and its boxes.
#[derive(Debug, Error)]
pub enum LeitnerError {
    /// The box configuration is empty or contains an invalid interval.
    #[error("invalid box configuration: {0}")]
    Configuration(String),

    /// The session store could not be read or written.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A persisted card references a level outside the configured boxes.
    #[error("card '{front}' references level {level}, but only {box_count} boxes are configured")]
    IndexBounds {
        front: String,
        level: usize,
        box_count: usize,
    },

    /// `next_card` was called on an empty box.
    #[error("box {level} is empty")]
    EmptyBox { level: usize },
}

impl LeitnerError {
    /// Returns `true` if the error means the store is unavailable or corrupt.
    pub fn is_persistence(&self) -> bool {
        matches!(self, LeitnerError::Persistence(_))
    }

    /// Returns `true` if the error was detected before any session could run.
    pub fn is_configuration(&self) -> bool {
        matches!(self, LeitnerError::Configuration(_))
    }
}

/// Errors from a [`SessionStore`](crate::traits::SessionStore).
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The store exists but could not be read.
    #[error("storage unavailable: failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store could not be written; previous contents are untouched.
    #[error("storage unavailable: failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document is not a valid session state.
    #[error("corrupt session state in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory state could not be serialized.
    #[error("failed to serialize session state: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A store without a backing file refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
