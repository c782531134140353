use anyhow::{Context, Result};

use wordcard_lib::catalog::Deck;
use wordcard_lib::scheduling::AssignmentOutcome;

use super::item_line;
use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, deck_name: &str, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let today = app.today;

    let outcome = app
        .engine
        .assign_daily_batch(&deck, today)
        .context("Failed to assign today's words")?;
    if let AssignmentOutcome::Assigned(ids) = &outcome {
        app.study_log
            .record_assignment(today, ids.len() as u32)
            .context("Failed to update study log")?;
    }

    let new_words = app
        .engine
        .select_new_working_set(&deck, today)
        .context("Failed to select new words")?;
    let review_words = app
        .engine
        .select_review_working_set(&deck, today)
        .context("Failed to select review words")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck.name,
                "date": today,
                "dailyNewWords": app.engine.capacity(),
                "assignment": assignment_json(&outcome),
                "newWords": new_words,
                "reviewWords": review_words,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            match &outcome {
                AssignmentOutcome::Assigned(ids) => {
                    println!("Assigned {} new words for {}", ids.len(), today);
                }
                AssignmentOutcome::InsufficientPool { available, capacity } => {
                    println!(
                        "Only {} unassigned words left (need {}), no new batch drawn",
                        available, capacity
                    );
                }
                AssignmentOutcome::AlreadyAssigned => {}
            }

            let title = format!("New words (daily {})", app.engine.capacity());
            print_set(&deck, &title, &new_words);
            println!();
            print_set(&deck, "Review words", &review_words);
        }
    }

    Ok(())
}

fn assignment_json(outcome: &AssignmentOutcome) -> serde_json::Value {
    match outcome {
        AssignmentOutcome::AlreadyAssigned => serde_json::json!({ "status": "alreadyAssigned" }),
        AssignmentOutcome::InsufficientPool { available, capacity } => serde_json::json!({
            "status": "insufficientPool",
            "available": available,
            "capacity": capacity,
        }),
        AssignmentOutcome::Assigned(ids) => serde_json::json!({
            "status": "assigned",
            "count": ids.len(),
        }),
    }
}

fn print_set(deck: &Deck, title: &str, ids: &[String]) {
    println!("{}: {}", title, ids.len());
    if ids.is_empty() {
        println!("  (none)");
        return;
    }
    for (i, id) in ids.iter().enumerate() {
        let line = deck.item(id).map(item_line).unwrap_or_default();
        println!("  {:>2}. [{}] {}", i, id, line);
    }
}
