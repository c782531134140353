use anyhow::{Context, Result};

use wordcard_lib::scheduling::algorithm::preview_next_review;
use wordcard_lib::session::{advance, Direction, SessionProgress};

use super::item_line;
use crate::app::{mode_for, App};
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck_name: &str,
    from: Option<usize>,
    back: bool,
    review: bool,
    format: &OutputFormat,
) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let mode = mode_for(review);
    let direction = if back { Direction::Backward } else { Direction::Forward };

    let session = app.session_set(&deck, mode)?;
    let counts = app.mastery_counts(&deck, &session)?;
    let position = advance(direction, session.len(), from, |i| !mode.is_complete(counts[i]));

    let Some(index) = position else {
        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "index": null, "mode": mode });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Plain => println!("No {} for today", mode.label()),
        }
        return Ok(());
    };

    let item_id = &session[index];
    let record = app
        .engine
        .record(&deck.name, item_id)
        .with_context(|| format!("Failed to read learning record of {}", item_id))?;
    let (on_success, on_failure) = preview_next_review(&record, app.today);
    let progress = SessionProgress::calculate(mode, &counts);
    app.study_log
        .record_view(app.today)
        .context("Failed to update study log")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "index": index,
                "mode": mode,
                "item": deck.item(item_id),
                "record": record,
                "nextReviewOnSuccess": on_success,
                "nextReviewOnFailure": on_failure,
                "progress": progress,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "[{}/{}] {} ({})",
                index + 1,
                session.len(),
                item_id,
                mode.label()
            );
            if let Some(item) = deck.item(item_id) {
                println!("{}", item_line(item));
                for sentence in &item.sentences {
                    println!("  > {}", sentence.text);
                    if !sentence.translation.is_empty() {
                        println!("    {}", sentence.translation);
                    }
                }
            }
            println!("Mastery: {}", record.mastery_count);
            println!("If remembered, next review {}; if not, {}", on_success, on_failure);
        }
    }

    Ok(())
}
