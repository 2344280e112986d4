//! The `leitner review` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::commands::open_deck;
use crate::reviewer::TerminalReviewer;

pub async fn execute(
    config_path: Option<PathBuf>,
    state: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let mut deck = open_deck(config_path.as_deref(), state, seed)?;

    if deck.scheduler.total_cards() == 0 {
        println!("The deck is empty. Run `leitner import --vocabulary <file>` to add cards.");
        return Ok(());
    }

    let mut reviewer = TerminalReviewer::stdio();
    let report = match deck.scheduler.run_session(&mut reviewer, &deck.store).await {
        Ok(report) => report,
        Err(e) if e.is_persistence() => {
            return Err(anyhow::Error::new(e).context("progress was NOT saved"));
        }
        Err(e) => return Err(e.into()),
    };

    println!();
    println!("{}", report.summary());
    for card in &report.graduated {
        println!("  Graduated: {} -> {}", card.front, card.back);
    }

    Ok(())
}
