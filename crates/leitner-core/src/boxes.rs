//! Card containers and the global session counter.
//!
//! A [`CardBox`] owns the cards at one level and knows when it is due. The
//! [`SessionBox`] holds cards in play for the current session and is never
//! checked for due-ness. The [`SessionCounter`] is the only thing that
//! advances box session counts.

use std::collections::VecDeque;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::LeitnerError;
use crate::model::{BoxConfig, Card};

/// An ordered (FIFO) holding area for the cards at one level.
#[derive(Debug, Clone)]
pub struct CardBox {
    level_index: usize,
    name: String,
    interval: u64,
    session_count: u64,
    cards: VecDeque<Card>,
}

impl CardBox {
    /// Create an empty box. Rejects a zero interval.
    pub fn new(level_index: usize, config: &BoxConfig) -> Result<Self, LeitnerError> {
        if config.interval == 0 {
            return Err(LeitnerError::Configuration(format!(
                "box '{}' (level {level_index}) has interval 0; intervals must be at least 1",
                config.name
            )));
        }
        Ok(Self {
            level_index,
            name: config.name.clone(),
            interval: config.interval,
            session_count: 0,
            cards: VecDeque::new(),
        })
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn session_count(&self) -> u64 {
        self.session_count
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in review order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Append a card to the tail.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove and return the head card.
    pub fn next_card(&mut self) -> Result<Card, LeitnerError> {
        self.cards.pop_front().ok_or(LeitnerError::EmptyBox {
            level: self.level_index,
        })
    }

    /// Whether this box contributes its cards to the current session.
    pub fn is_due(&self) -> bool {
        self.session_count % self.interval == 0
    }

    /// Whether this box will be due once the counter advances once more.
    pub fn is_due_next(&self) -> bool {
        (self.session_count + 1) % self.interval == 0
    }

    /// Advance by one session. Only [`SessionCounter::increment`] calls this.
    pub(crate) fn increment_session_count(&mut self) {
        self.session_count += 1;
    }

    /// Align with a restored global counter.
    pub(crate) fn sync_session_count(&mut self, count: u64) {
        self.session_count = count;
    }

    /// Remove every card, preserving order.
    pub fn drain(&mut self) -> impl Iterator<Item = Card> + '_ {
        self.cards.drain(..)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl fmt::Display for CardBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Box {}: cards_count: {}",
            self.level_index,
            self.cards.len()
        )?;
        for card in &self.cards {
            write!(f, "\n  {card}")?;
        }
        Ok(())
    }
}

/// Cards in play for the active session.
#[derive(Debug, Clone, Default)]
pub struct SessionBox {
    cards: VecDeque<Card>,
}

impl SessionBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Put an ungraded card back at the head.
    pub fn push_front(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    pub fn next_card(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Uniformly permute the cards in play.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Card> + '_ {
        self.cards.drain(..)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl Extend<Card> for SessionBox {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        self.cards.extend(iter);
    }
}

/// Monotonic global session tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounter {
    count: u64,
}

impl SessionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Restore a persisted count.
    pub(crate) fn set(&mut self, count: u64) {
        self.count = count;
    }

    /// Advance the counter, then every box in level order.
    pub fn increment(&mut self, boxes: &mut [CardBox]) {
        self.count += 1;
        for card_box in boxes.iter_mut() {
            card_box.increment_session_count();
        }
    }
}
