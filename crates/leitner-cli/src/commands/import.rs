//! The `leitner import` command.

use std::path::PathBuf;

use anyhow::Result;

use leitner_core::boxes::CardBox;
use leitner_core::importer::{import_vocabulary, merge_new_cards};

use crate::commands::open_deck;

pub fn execute(
    vocabulary: PathBuf,
    config_path: Option<PathBuf>,
    state: Option<PathBuf>,
) -> Result<()> {
    let mut deck = open_deck(config_path.as_deref(), state, None)?;

    let incoming = import_vocabulary(&vocabulary)?;
    let offered = incoming.len();
    let new_cards = merge_new_cards(deck.scheduler.boxes().iter().flat_map(CardBox::cards), incoming);
    let added = deck.scheduler.add_cards(new_cards);

    deck.scheduler.save(&deck.store)?;

    println!(
        "Imported {added} new card(s) into box 0 ({} already known).",
        offered - added
    );
    println!(
        "Deck now holds {} card(s): {}",
        deck.scheduler.total_cards(),
        deck.config.state_path.display()
    );

    Ok(())
}
