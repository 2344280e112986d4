//! The Leitner session state machine.
//!
//! A session moves through `Loading → SelectingDue → Reviewing → Saving`.
//! Cards are owned by exactly one container at a time: a level box, the
//! session box, or (while the reviewer is judging it) the review loop itself.
//! Finalization runs on every exit from the review loop, so cards pulled into
//! a session always make it back into a box before state is saved.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::boxes::{CardBox, SessionBox, SessionCounter};
use crate::error::LeitnerError;
use crate::model::{BoxConfig, Card, PersistedCard, SessionState};
use crate::traits::{Judgment, Reviewer, SessionStore};

/// Where the scheduler is in the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    SelectingDue,
    Reviewing,
    Saving,
}

/// Destination of a graded card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The card now lives in the box at this level.
    Moved(usize),
    /// The card was answered correctly at the top level and left rotation.
    Graduated(Card),
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No due box had any cards. Not an error.
    NothingDue,
    /// Every card in play was graded.
    Completed,
    /// The reviewer stopped early; ungraded cards went back to their boxes.
    Cancelled,
}

/// Summary of one session, returned after state has been saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub id: Uuid,
    /// Counter value for this session.
    pub session: u64,
    pub status: SessionStatus,
    /// Cards pulled into the session box.
    pub in_play: usize,
    /// Cards graded correct or incorrect.
    pub reviewed: usize,
    /// Cards moved up one level (graduations are counted separately).
    pub promoted: usize,
    pub demoted: usize,
    /// Ungraded cards returned to their boxes at finalization.
    pub returned: usize,
    /// Cards that left rotation this session.
    pub graduated: Vec<Card>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SessionReport {
    fn begin() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            session: 0,
            status: SessionStatus::NothingDue,
            in_play: 0,
            reviewed: 0,
            promoted: 0,
            demoted: 0,
            returned: 0,
            graduated: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    /// One-line, user-facing description of the outcome.
    pub fn summary(&self) -> String {
        match self.status {
            SessionStatus::NothingDue => {
                format!("Session {}: no cards due. Nothing to review.", self.session)
            }
            SessionStatus::Completed => format!(
                "Session {} complete: {} reviewed ({} promoted, {} demoted, {} graduated).",
                self.session,
                self.reviewed,
                self.promoted,
                self.demoted,
                self.graduated.len()
            ),
            SessionStatus::Cancelled => format!(
                "Session {} interrupted after {} of {} cards. Progress saved on exit; {} card(s) returned to their boxes.",
                self.session, self.reviewed, self.in_play, self.returned
            ),
        }
    }
}

/// Orchestrates boxes, due selection, grading and persistence.
pub struct Scheduler {
    boxes: Vec<CardBox>,
    session_box: SessionBox,
    counter: SessionCounter,
    phase: SessionPhase,
    rng: StdRng,
}

impl Scheduler {
    /// Build one box per configuration entry; the index is the level.
    pub fn new(configs: &[BoxConfig]) -> Result<Self, LeitnerError> {
        if configs.is_empty() {
            return Err(LeitnerError::Configuration(
                "at least one box must be configured".into(),
            ));
        }

        let boxes = configs
            .iter()
            .enumerate()
            .map(|(level, config)| CardBox::new(level, config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            boxes,
            session_box: SessionBox::new(),
            counter: SessionCounter::new(),
            phase: SessionPhase::Idle,
            rng: StdRng::from_entropy(),
        })
    }

    /// Use a fixed seed for the session shuffle.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn boxes(&self) -> &[CardBox] {
        &self.boxes
    }

    pub fn session_box(&self) -> &SessionBox {
        &self.session_box
    }

    pub fn session_count(&self) -> u64 {
        self.counter.count()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Cards across every box and the session box.
    pub fn total_cards(&self) -> usize {
        self.boxes.iter().map(CardBox::len).sum::<usize>() + self.session_box.len()
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "session phase");
        self.phase = phase;
    }

    // -----------------------------------------------------------------------
    // Loading and saving
    // -----------------------------------------------------------------------

    /// Restore persisted state from the store. A missing store is an empty
    /// first-run state; read failures propagate.
    pub fn load(&mut self, store: &dyn SessionStore) -> Result<(), LeitnerError> {
        self.set_phase(SessionPhase::Loading);
        let result = match store.load() {
            Ok(Some(state)) => self.restore(state),
            Ok(None) => {
                tracing::info!("no session state at {}, starting fresh", store.location());
                self.restore(SessionState::default())
            }
            Err(e) => Err(e.into()),
        };
        self.set_phase(SessionPhase::Idle);
        result
    }

    /// Replace all box contents with `state`. Levels are validated before
    /// anything is mutated.
    pub fn restore(&mut self, state: SessionState) -> Result<(), LeitnerError> {
        let box_count = self.boxes.len();
        if let Some(card) = state.cards.iter().find(|c| c.level >= box_count) {
            return Err(LeitnerError::IndexBounds {
                front: card.front.clone(),
                level: card.level,
                box_count,
            });
        }

        self.counter.set(state.current_session);
        self.session_box.clear();
        for card_box in &mut self.boxes {
            card_box.clear();
            card_box.sync_session_count(state.current_session);
        }

        let restored = state.cards.len();
        for card in state.cards {
            let card = Card::from(card);
            self.boxes[card.level].add_card(card);
        }

        tracing::debug!(
            session = state.current_session,
            cards = restored,
            "restored session state"
        );
        Ok(())
    }

    /// Flatten every box into a persistable state, in level then queue order.
    pub fn snapshot(&self) -> SessionState {
        SessionState {
            current_session: self.counter.count(),
            cards: self
                .boxes
                .iter()
                .flat_map(CardBox::cards)
                .map(PersistedCard::from)
                .collect(),
        }
    }

    /// Write the current in-memory state. Safe to call again after a failure.
    pub fn save(&self, store: &dyn SessionStore) -> Result<(), LeitnerError> {
        let state = self.snapshot();
        store.save(&state)?;
        tracing::debug!(
            session = state.current_session,
            cards = state.cards.len(),
            location = %store.location(),
            "saved session state"
        );
        Ok(())
    }

    /// Add new cards to box 0.
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) -> usize {
        let mut added = 0;
        for mut card in cards {
            card.level = 0;
            self.boxes[0].add_card(card);
            added += 1;
        }
        added
    }

    // -----------------------------------------------------------------------
    // Due selection and grading
    // -----------------------------------------------------------------------

    /// Advance the session counter, pull every card from each due box into
    /// the session box and shuffle. Returns the number of cards in play.
    pub fn select_due(&mut self) -> usize {
        self.set_phase(SessionPhase::SelectingDue);
        self.counter.increment(&mut self.boxes);

        for card_box in self.boxes.iter_mut().filter(|b| b.is_due()) {
            let moved = card_box.len();
            self.session_box.extend(card_box.drain());
            tracing::debug!(
                level = card_box.level_index(),
                session = card_box.session_count(),
                moved,
                "box due"
            );
        }

        self.session_box.shuffle(&mut self.rng);
        self.session_box.len()
    }

    /// Move a correctly answered card up one level, or graduate it off the top.
    pub fn promote(&mut self, mut card: Card) -> Placement {
        let next = card.level + 1;
        if next >= self.boxes.len() {
            tracing::debug!(front = %card.front, "card graduated");
            return Placement::Graduated(card);
        }
        card.level = next;
        self.boxes[next].add_card(card);
        Placement::Moved(next)
    }

    /// Send an incorrectly answered card back to box 0.
    pub fn demote(&mut self, mut card: Card) -> Placement {
        card.level = 0;
        self.boxes[0].add_card(card);
        Placement::Moved(0)
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    /// Run one full session: select due cards, grade each with `reviewer`,
    /// and save. State is saved on completion, cancellation and reviewer
    /// failure alike.
    pub async fn run_session(
        &mut self,
        reviewer: &mut dyn Reviewer,
        store: &dyn SessionStore,
    ) -> Result<SessionReport, LeitnerError> {
        let mut report = SessionReport::begin();

        report.in_play = self.select_due();
        report.session = self.counter.count();

        let status = if report.in_play == 0 {
            SessionStatus::NothingDue
        } else {
            self.review(reviewer, &mut report).await
        };
        report.status = status;

        self.finalize(store, &mut report)?;

        tracing::info!(
            id = %report.id,
            session = report.session,
            status = ?report.status,
            reviewed = report.reviewed,
            graduated = report.graduated.len(),
            "session finished"
        );
        Ok(report)
    }

    /// Grade cards until the session box is empty or the reviewer stops.
    /// Never returns early with an error; finalization must always follow.
    async fn review(
        &mut self,
        reviewer: &mut dyn Reviewer,
        report: &mut SessionReport,
    ) -> SessionStatus {
        self.set_phase(SessionPhase::Reviewing);

        while let Some(card) = self.session_box.next_card() {
            let judgment = match reviewer.present_and_judge(&card).await {
                Ok(judgment) => judgment,
                Err(e) => {
                    tracing::warn!("reviewer failed, ending session: {e:#}");
                    Judgment::Cancelled
                }
            };

            match judgment {
                Judgment::Correct => {
                    report.reviewed += 1;
                    match self.promote(card) {
                        Placement::Moved(_) => report.promoted += 1,
                        Placement::Graduated(card) => report.graduated.push(card),
                    }
                }
                Judgment::Incorrect => {
                    report.reviewed += 1;
                    report.demoted += 1;
                    self.demote(card);
                }
                Judgment::Cancelled => {
                    self.session_box.push_front(card);
                    return SessionStatus::Cancelled;
                }
            }
        }

        SessionStatus::Completed
    }

    /// Return ungraded cards to their boxes, empty the session box and save.
    fn finalize(
        &mut self,
        store: &dyn SessionStore,
        report: &mut SessionReport,
    ) -> Result<(), LeitnerError> {
        self.set_phase(SessionPhase::Saving);

        let mut returned = 0;
        for card in self.session_box.drain() {
            self.boxes[card.level].add_card(card);
            returned += 1;
        }
        report.returned = returned;

        let result = self.save(store);
        report.finished_at = Utc::now();
        self.set_phase(SessionPhase::Idle);

        if let Err(e) = &result {
            tracing::error!("session {} progress was not saved: {e}", report.session);
        }
        result
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "System: boxes_count:{}", self.boxes.len())?;
        for card_box in &self.boxes {
            write!(f, "\n{card_box}")?;
        }
        Ok(())
    }
}
