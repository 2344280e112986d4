//! Collaborator traits for the reviewer and the session store.
//!
//! The scheduler never depends on how a card is rendered or how input is
//! collected, only on the three-valued [`Judgment`]. Storage is likewise
//! reduced to load/save of a [`SessionState`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::model::{Card, SessionState};

// ---------------------------------------------------------------------------
// Reviewer
// ---------------------------------------------------------------------------

/// Outcome of presenting a card to the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Judgment {
    Correct,
    Incorrect,
    /// The reviewer aborted; the session stops and finalizes.
    Cancelled,
}

/// Presents cards and collects a binary judgment.
#[async_trait]
pub trait Reviewer: Send {
    /// Show the card and wait for the reviewer's verdict.
    ///
    /// Any error is treated by the scheduler as [`Judgment::Cancelled`].
    async fn present_and_judge(&mut self, card: &Card) -> anyhow::Result<Judgment>;
}

// ---------------------------------------------------------------------------
// Session store
// ---------------------------------------------------------------------------

/// Durable storage for session state.
pub trait SessionStore: Send + Sync {
    /// Load the persisted state. `Ok(None)` means no prior state exists.
    fn load(&self) -> Result<Option<SessionState>, PersistenceError>;

    /// Persist the state, replacing whatever was stored before.
    fn save(&self, state: &SessionState) -> Result<(), PersistenceError>;

    /// Human-readable location, used in log and user messages.
    fn location(&self) -> String;
}
