mod app;
mod commands;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordcard-cli", about = "Spaced repetition vocabulary trainer", version)]
struct Cli {
    /// Data directory (default: platform local data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Study date as YYYY-MM-DD (default: today)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Draw today's new words and list both working sets
    Today {
        /// Deck name
        deck: String,
    },

    /// Record a recall answer for an item
    Recall {
        /// Deck name
        deck: String,
        /// Item id
        item: String,
        /// The item was recalled correctly
        #[arg(long, conflicts_with = "fail", required_unless_present = "fail")]
        success: bool,
        /// The item was not recalled
        #[arg(long)]
        fail: bool,
        /// Answer was given in a review session
        #[arg(long)]
        review: bool,
    },

    /// Show the next item to study
    Next {
        /// Deck name
        deck: String,
        /// Current position in the working set
        #[arg(long)]
        from: Option<usize>,
        /// Move backward instead of forward
        #[arg(long)]
        back: bool,
        /// Walk the review set instead of today's new words
        #[arg(long)]
        review: bool,
    },

    /// Undo today's batch, or forget a deck entirely
    Reset {
        /// Deck name
        deck: String,
        /// Clear every record of the deck
        #[arg(long)]
        all: bool,
    },

    /// Add study time to the day
    Time {
        /// Minutes studied
        minutes: u64,
    },

    /// Show deck progress, study statistics and goal status
    Stats {
        /// Limit deck progress to one deck
        deck: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut app = app::App::new(cli.data_dir, cli.config.as_deref(), cli.date)?;

    match cli.command {
        Command::Today { deck } => {
            commands::today::run(&mut app, &deck, &cli.format)?;
        }
        Command::Recall { deck, item, success, fail: _, review } => {
            commands::recall::run(&mut app, &deck, &item, success, review, &cli.format)?;
        }
        Command::Next { deck, from, back, review } => {
            commands::next::run(&app, &deck, from, back, review, &cli.format)?;
        }
        Command::Reset { deck, all } => {
            commands::reset::run(&mut app, &deck, all, &cli.format)?;
        }
        Command::Time { minutes } => {
            commands::stats::run_add_time(&app, minutes, &cli.format)?;
        }
        Command::Stats { deck } => {
            commands::stats::run(&app, deck.as_deref(), &cli.format)?;
        }
    }

    Ok(())
}
