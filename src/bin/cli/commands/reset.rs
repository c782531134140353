use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, deck_name: &str, all: bool, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;

    if all {
        app.engine
            .reset_all_progress(&deck.name)
            .with_context(|| format!("Failed to clear deck {}", deck.name))?;

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "deck": deck.name, "cleared": true });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Plain => println!("Cleared all progress of deck {}", deck.name),
        }
        return Ok(());
    }

    let count = app
        .engine
        .reset_deck(&deck.name, app.today)
        .with_context(|| format!("Failed to reset deck {}", deck.name))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "deck": deck.name, "resetItems": count });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Reset {} words assigned on {} in deck {}", count, app.today, deck.name);
        }
    }

    Ok(())
}
