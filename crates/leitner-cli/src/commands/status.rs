//! The `leitner status` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::commands::open_deck;

pub fn execute(config_path: Option<PathBuf>, state: Option<PathBuf>, cards: bool) -> Result<()> {
    let deck = open_deck(config_path.as_deref(), state, None)?;
    let scheduler = &deck.scheduler;

    println!(
        "State: {} (session {}, {} cards)",
        deck.config.state_path.display(),
        scheduler.session_count(),
        scheduler.total_cards()
    );

    let mut table = Table::new();
    table.set_header(vec!["Level", "Name", "Interval", "Cards", "Due next session"]);
    for card_box in scheduler.boxes() {
        table.add_row(vec![
            Cell::new(card_box.level_index()),
            Cell::new(card_box.name()),
            Cell::new(format!("every {}", card_box.interval())),
            Cell::new(card_box.len()),
            Cell::new(if card_box.is_due_next() { "yes" } else { "no" }),
        ]);
    }
    println!("{table}");

    if cards {
        println!("\n{scheduler}");
    }

    Ok(())
}
