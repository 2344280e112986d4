//! Core data model types for leitner.
//!
//! Cards are plain values whose `level` field is the single source of truth
//! for box membership. The persisted session state is a flat list of cards
//! tagged with their level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The atomic reviewable unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Prompt side.
    pub front: String,
    /// Answer side.
    pub back: String,
    /// Index of the box that owns this card.
    pub level: usize,
}

impl Card {
    /// Create a new card at level 0.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            level: 0,
        }
    }

    /// Create a card at an explicit level.
    pub fn at_level(front: impl Into<String>, back: impl Into<String>, level: usize) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            level,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card: {}, {}, lvl {}", self.front, self.back, self.level)
    }
}

/// Static configuration for one box. Position in the list is the box level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxConfig {
    /// Human-readable name.
    pub name: String,
    /// Review periodicity in sessions. Must be at least 1.
    #[serde(alias = "level")]
    pub interval: u64,
}

impl BoxConfig {
    pub fn new(name: impl Into<String>, interval: u64) -> Self {
        Self {
            name: name.into(),
            interval,
        }
    }
}

/// The default three-box layout: daily, every third session, weekly.
pub fn default_boxes() -> Vec<BoxConfig> {
    vec![
        BoxConfig::new("daily", 1),
        BoxConfig::new("every-third", 3),
        BoxConfig::new("weekly", 7),
    ]
}

/// A card as written to the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedCard {
    pub front: String,
    pub back: String,
    pub level: usize,
}

impl From<&Card> for PersistedCard {
    fn from(card: &Card) -> Self {
        Self {
            front: card.front.clone(),
            back: card.back.clone(),
            level: card.level,
        }
    }
}

impl From<PersistedCard> for Card {
    fn from(card: PersistedCard) -> Self {
        Card::at_level(card.front, card.back, card.level)
    }
}

/// Everything needed to resume scheduling: the global session counter and
/// every card across all boxes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Number of sessions run so far.
    #[serde(default)]
    pub current_session: u64,
    /// Flat card list; order is insignificant.
    #[serde(default)]
    pub cards: Vec<PersistedCard>,
}

/// An entry from a vocabulary seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub front: String,
    pub back: String,
}

impl From<VocabEntry> for Card {
    fn from(entry: VocabEntry) -> Self {
        Card::new(entry.front, entry.back)
    }
}
