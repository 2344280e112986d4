//! Vocabulary import.
//!
//! Seed files are JSON arrays of `{front, back}` objects. Every imported card
//! starts at level 0.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Card, VocabEntry};

/// Read a vocabulary file into level-0 cards.
pub fn import_vocabulary(path: &Path) -> Result<Vec<Card>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read vocabulary file: {}", path.display()))?;

    parse_vocabulary_str(&content)
        .with_context(|| format!("failed to import vocabulary: {}", path.display()))
}

/// Parse a vocabulary JSON string into level-0 cards.
pub fn parse_vocabulary_str(content: &str) -> Result<Vec<Card>> {
    let entries: Vec<VocabEntry> =
        serde_json::from_str(content).context("expected a JSON array of {front, back} objects")?;

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            anyhow::ensure!(
                !entry.front.trim().is_empty(),
                "entry {i} has an empty front"
            );
            Ok(Card::from(entry))
        })
        .collect()
}

/// Keep only the incoming cards whose `(front, back)` pair is not already in
/// `existing`, or earlier in `incoming`.
pub fn merge_new_cards<'a>(
    existing: impl IntoIterator<Item = &'a Card>,
    incoming: Vec<Card>,
) -> Vec<Card> {
    let mut seen: HashSet<(String, String)> = existing
        .into_iter()
        .map(|c| (c.front.clone(), c.back.clone()))
        .collect();

    incoming
        .into_iter()
        .filter(|c| seen.insert((c.front.clone(), c.back.clone())))
        .collect()
}
