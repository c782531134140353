use anyhow::{bail, Context, Result};

use wordcard_lib::scheduling::algorithm::format_interval;
use wordcard_lib::session::{is_session_complete, SessionProgress};

use crate::app::{mode_for, App};
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    deck_name: &str,
    item_id: &str,
    succeeded: bool,
    review: bool,
    format: &OutputFormat,
) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    if deck.item(item_id).is_none() {
        bail!("No item '{}' in deck {}", item_id, deck.name);
    }
    let today = app.today;
    let mode = mode_for(review);

    // The session set is taken before the answer moves the item out of it
    let session = app.session_set(&deck, mode)?;
    let was_complete = is_session_complete(mode, app.mastery_counts(&deck, &session)?);
    let goal_was_met = app.study_log.goal_achieved(today, &app.config.goals)?;

    let outcome = app
        .engine
        .process_recall(&deck.name, item_id, succeeded, today)
        .with_context(|| format!("Failed to record recall for {}", item_id))?;
    app.study_log
        .record_recall(today, succeeded, review)
        .context("Failed to update study log")?;

    let progress = SessionProgress::calculate(mode, &app.mastery_counts(&deck, &session)?);
    // Completion and goal are reported only on the answer that reaches them
    let session_completed = !was_complete && progress.is_complete();
    let goal_reached = !goal_was_met && app.study_log.goal_achieved(today, &app.config.goals)?;

    let record = &outcome.record;
    let days_until_review = record
        .next_review_date
        .map(|d| (d - today).num_days())
        .unwrap_or(0);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "record": record,
                "isMemorized": outcome.is_memorized,
                "progress": progress,
                "sessionCompleted": session_completed,
                "goalReached": goal_reached,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let verdict = if succeeded { "remembered" } else { "forgotten" };
            println!("{}: {} (mastery {})", item_id, verdict, record.mastery_count);
            if let Some(next) = record.next_review_date {
                println!("Next review: {} ({})", next, format_interval(days_until_review));
            }
            if outcome.is_memorized {
                println!("Memorized");
            }
            println!(
                "Session: {}/{} {} done ({:.0}%)",
                progress.completed,
                progress.total,
                mode.label(),
                progress.percentage
            );
            if session_completed {
                println!("All {} for today are done!", mode.label());
            }
            if goal_reached {
                println!("Daily goal reached!");
            }
        }
    }

    Ok(())
}
