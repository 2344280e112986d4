//! leitner-core — Leitner-box scheduling, session lifecycle and persistence.
//!
//! This crate defines the card and box model, the session state machine that
//! selects due cards and routes graded cards between boxes, and the storage
//! contract used to persist progress between sessions.

pub mod boxes;
pub mod config;
pub mod error;
pub mod importer;
pub mod mock;
pub mod model;
pub mod scheduler;
pub mod store;
pub mod traits;

pub use error::{LeitnerError, PersistenceError};
pub use model::{BoxConfig, Card, SessionState};
pub use scheduler::{Scheduler, SessionReport, SessionStatus};
pub use traits::{Judgment, Reviewer, SessionStore};
