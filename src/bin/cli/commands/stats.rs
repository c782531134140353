use anyhow::{Context, Result};

use wordcard_lib::catalog::Deck;
use wordcard_lib::scheduling::DeckProgress;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, deck_name: Option<&str>, format: &OutputFormat) -> Result<()> {
    let decks: Vec<Deck> = match deck_name {
        Some(name) => vec![app.find_deck(name)?],
        None => app.catalog.decks().to_vec(),
    };

    let mut progress: Vec<(String, DeckProgress)> = Vec::new();
    for deck in &decks {
        let deck_progress = app
            .engine
            .deck_progress(deck)
            .with_context(|| format!("Failed to read progress of deck {}", deck.name))?;
        progress.push((deck.name.clone(), deck_progress));
    }

    let stats = app
        .study_log
        .statistics(app.today)
        .context("Failed to read study log")?;
    let entry = app.study_log.entry(app.today)?;
    let goal = &app.config.goals;
    let goal_achieved = goal.is_met_by(&entry);

    match format {
        OutputFormat::Json => {
            let decks: Vec<serde_json::Value> = progress
                .iter()
                .map(|(name, p)| {
                    serde_json::json!({
                        "deck": name,
                        "progress": p,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "date": app.today,
                "decks": decks,
                "statistics": stats,
                "today": entry,
                "goal": goal,
                "goalAchieved": goal_achieved,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (name, p) in &progress {
                println!(
                    "{}: {}/{} memorized ({:.1}%), {} to go",
                    name, p.memorized_items, p.total_items, p.memorization_rate, p.unmemorized_items
                );
            }
            println!();
            println!("Today ({}):", app.today);
            println!(
                "  {} viewed, {} remembered, {} min studied",
                entry.words_viewed,
                entry.words_memorized,
                entry.study_minutes()
            );
            println!(
                "  Goal: {} words or {} min ... {}",
                goal.daily_memorized_words,
                goal.daily_study_minutes,
                if goal_achieved { "achieved" } else { "not yet" }
            );
            println!();
            println!("Streak: {} days", stats.current_streak);
            println!(
                "Total: {} days, {} min, {} words remembered",
                stats.total_study_days, stats.total_study_minutes, stats.total_words_memorized
            );
            println!(
                "Average: {:.1} words/day, {:.1} min/day",
                stats.average_words_per_day, stats.average_minutes_per_day
            );
        }
    }

    Ok(())
}

pub fn run_add_time(app: &App, minutes: u64, format: &OutputFormat) -> Result<()> {
    let entry = app
        .study_log
        .add_study_time(app.today, minutes * 60)
        .context("Failed to update study log")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
        OutputFormat::Plain => {
            println!("{}: {} min studied", entry.date, entry.study_minutes());
        }
    }

    Ok(())
}
