//! leitner CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod reviewer;

#[derive(Parser)]
#[command(name = "leitner", version, about = "Leitner-box flashcard reviewer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one review session
    Review {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Session state file (overrides the config)
        #[arg(long)]
        state: Option<PathBuf>,

        /// Shuffle seed for a reproducible card order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Add cards from a vocabulary JSON file to the first box
    Import {
        /// Path to a JSON array of {front, back} objects
        #[arg(long)]
        vocabulary: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Session state file (overrides the config)
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// Show box contents and what is due next
    Status {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Session state file (overrides the config)
        #[arg(long)]
        state: Option<PathBuf>,

        /// List every card
        #[arg(long)]
        cards: bool,
    },

    /// Create a starter config and example vocabulary
    Init,
}

/// `RUST_LOG` when set and valid, otherwise warnings from leitner crates only.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("leitner=warn"))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Review {
            config,
            state,
            seed,
        } => commands::review::execute(config, state, seed).await,
        Commands::Import {
            vocabulary,
            config,
            state,
        } => commands::import::execute(vocabulary, config, state),
        Commands::Status {
            config,
            state,
            cards,
        } => commands::status::execute(config, state, cards),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }

    // A pending stdin read lives on a blocking thread that runtime shutdown would wait on.
    process::exit(0);
}
