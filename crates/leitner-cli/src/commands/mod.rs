//! Subcommand implementations.

pub mod import;
pub mod init;
pub mod review;
pub mod status;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use leitner_core::config::{load_config_from, LeitnerConfig};
use leitner_core::store::JsonFileStore;
use leitner_core::{Scheduler, SessionStore};

/// Loaded configuration, scheduler and its backing store.
pub struct Deck {
    pub config: LeitnerConfig,
    pub scheduler: Scheduler,
    pub store: JsonFileStore,
}

/// Load config, build the boxes and restore persisted state.
pub fn open_deck(
    config_path: Option<&Path>,
    state_override: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<Deck> {
    let mut config = load_config_from(config_path)?;
    if let Some(path) = state_override {
        config.state_path = path;
    }

    let mut scheduler = Scheduler::new(&config.boxes)?;
    if let Some(seed) = seed.or(config.seed) {
        scheduler = scheduler.with_seed(seed);
    }

    let store = JsonFileStore::new(&config.state_path);
    scheduler
        .load(&store)
        .with_context(|| format!("failed to load session state from {}", store.location()))?;

    tracing::debug!(
        boxes = config.boxes.len(),
        cards = scheduler.total_cards(),
        session = scheduler.session_count(),
        "deck opened"
    );

    Ok(Deck {
        config,
        scheduler,
        store,
    })
}
