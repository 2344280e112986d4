//! Scripted reviewer for testing sessions without a terminal.

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::model::Card;
use crate::traits::{Judgment, Reviewer};

/// What the reviewer does once its script runs out.
#[derive(Debug, Clone, Copy)]
enum Exhausted {
    Repeat(Judgment),
    Fail,
}

/// A reviewer that answers from a fixed script.
///
/// Records every card it was shown.
#[derive(Debug, Clone)]
pub struct ScriptedReviewer {
    script: VecDeque<Judgment>,
    exhausted: Exhausted,
    presented: Vec<Card>,
}

impl ScriptedReviewer {
    /// Answer with `script` in order, then cancel.
    pub fn new(script: Vec<Judgment>) -> Self {
        Self {
            script: script.into(),
            exhausted: Exhausted::Repeat(Judgment::Cancelled),
            presented: Vec::new(),
        }
    }

    /// Answer every card the same way.
    pub fn always(judgment: Judgment) -> Self {
        Self {
            script: VecDeque::new(),
            exhausted: Exhausted::Repeat(judgment),
            presented: Vec::new(),
        }
    }

    /// Return an error instead of cancelling once the script runs out.
    pub fn failing_when_exhausted(mut self) -> Self {
        self.exhausted = Exhausted::Fail;
        self
    }

    /// Cards shown so far, in order.
    pub fn presented(&self) -> &[Card] {
        &self.presented
    }
}

#[async_trait]
impl Reviewer for ScriptedReviewer {
    async fn present_and_judge(&mut self, card: &Card) -> anyhow::Result<Judgment> {
        self.presented.push(card.clone());
        match self.script.pop_front() {
            Some(judgment) => Ok(judgment),
            None => match self.exhausted {
                Exhausted::Repeat(judgment) => Ok(judgment),
                Exhausted::Fail => anyhow::bail!("scripted reviewer ran out of answers"),
            },
        }
    }
}
