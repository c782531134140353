//! Daily assignment, working-set selection and recall processing

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate};

use super::algorithm::{apply_recall, MASTERY_THRESHOLD};
use super::models::*;
use crate::catalog::Deck;
use crate::store::{LearningRecordStore, Result};

/// Default number of new items handed out per deck per day
pub const DEFAULT_DAILY_CAPACITY: usize = 10;

/// Spaced repetition scheduler over an injected record store
pub struct SchedulingEngine<S: LearningRecordStore> {
    store: S,
    capacity: usize,
}

impl<S: LearningRecordStore> SchedulingEngine<S> {
    pub fn new(store: S, capacity: usize) -> Self {
        Self { store, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load a record, creating a default one if it was never stored
    pub fn record(&self, deck: &str, item_id: &str) -> Result<LearningRecord> {
        Ok(self
            .store
            .get(deck, item_id)?
            .unwrap_or_else(|| LearningRecord::new(deck, item_id)))
    }

    // ==================== Assignment ====================

    /// Draw today's batch of new items for a deck
    ///
    /// Runs at most once per deck per day. A batch is only drawn when at
    /// least `capacity` never-assigned items remain; smaller pools are
    /// left untouched.
    pub fn assign_daily_batch(&mut self, deck: &Deck, date: NaiveDate) -> Result<AssignmentOutcome> {
        if self.store.assignment_marker(&deck.name)? == Some(date) {
            log::debug!("Deck {} already has a batch for {}", deck.name, date);
            return Ok(AssignmentOutcome::AlreadyAssigned);
        }

        // Records stamped with `date` but no marker: an earlier call stored
        // the batch and failed before the marker write
        let stamped = self
            .store
            .query(&deck.name, &|r| r.assigned_new_date == Some(date))?;
        if !stamped.is_empty() {
            log::warn!(
                "Deck {} has {} items assigned for {} without a marker; repairing it",
                deck.name,
                stamped.len(),
                date
            );
            self.store.set_assignment_marker(&deck.name, date)?;
            return Ok(AssignmentOutcome::AlreadyAssigned);
        }

        let assigned: HashSet<String> = self
            .store
            .query(&deck.name, &|r| r.is_assigned())?
            .into_iter()
            .map(|r| r.item_id)
            .collect();

        let unassigned: Vec<&str> = deck
            .item_ids()
            .filter(|id| !assigned.contains(*id))
            .collect();

        if unassigned.len() < self.capacity {
            log::info!(
                "Not enough unassigned items in deck {}: {} < {}",
                deck.name,
                unassigned.len(),
                self.capacity
            );
            return Ok(AssignmentOutcome::InsufficientPool {
                available: unassigned.len(),
                capacity: self.capacity,
            });
        }

        let mut batch = Vec::with_capacity(self.capacity);
        for id in unassigned.into_iter().take(self.capacity) {
            let mut record = self.record(&deck.name, id)?;
            record.assigned_new_date = Some(date);
            batch.push(record);
        }

        self.store.put_many(&deck.name, &batch)?;
        self.store.set_assignment_marker(&deck.name, date)?;

        log::info!("Assigned {} new items in deck {} for {}", batch.len(), deck.name, date);
        Ok(AssignmentOutcome::Assigned(
            batch.into_iter().map(|r| r.item_id).collect(),
        ))
    }

    // ==================== Working Sets ====================

    /// Items assigned on `date` that have not been recalled yet
    pub fn select_new_working_set(&self, deck: &Deck, date: NaiveDate) -> Result<Vec<String>> {
        let records = self.store.query(&deck.name, &|r| r.is_new_on(date))?;
        let mut ids = in_catalog_order(deck, records);
        ids.truncate(self.capacity);
        Ok(ids)
    }

    /// Items scheduled for review on `date` that are not yet memorized
    pub fn select_review_working_set(&self, deck: &Deck, date: NaiveDate) -> Result<Vec<String>> {
        let records = self.store.query(&deck.name, &|r| r.is_due_on(date))?;
        Ok(in_catalog_order(deck, records))
    }

    /// Every item drawn in the batch for `date`, recalled or not
    pub fn batch_for(&self, deck: &Deck, date: NaiveDate) -> Result<Vec<String>> {
        let records = self
            .store
            .query(&deck.name, &|r| r.assigned_new_date == Some(date))?;
        Ok(in_catalog_order(deck, records))
    }

    /// Assign today's batch if needed and return both working sets
    pub fn today_words(&mut self, deck: &Deck, date: NaiveDate) -> Result<TodayWords> {
        self.assign_daily_batch(deck, date)?;
        Ok(TodayWords {
            new_words: self.select_new_working_set(deck, date)?,
            review_words: self.select_review_working_set(deck, date)?,
        })
    }

    // ==================== Recall ====================

    /// Apply a recall answer to an item and persist the result
    pub fn process_recall(
        &mut self,
        deck: &str,
        item_id: &str,
        succeeded: bool,
        today: NaiveDate,
    ) -> Result<RecallOutcome> {
        let current = self.record(deck, item_id)?;
        let record = apply_recall(&current, succeeded, today);
        self.store.put(deck, &record)?;

        log::debug!(
            "Recall {} for {}/{}: mastery {} -> {}, next review {:?}",
            if succeeded { "success" } else { "failure" },
            deck,
            item_id,
            current.mastery_count,
            record.mastery_count,
            record.next_review_date
        );

        let is_memorized = record.is_memorized();
        Ok(RecallOutcome { record, is_memorized })
    }

    /// Current mastery counts for a working set, in the same order
    pub fn mastery_counts(&self, deck: &str, item_ids: &[String]) -> Result<Vec<u32>> {
        item_ids
            .iter()
            .map(|id| Ok(self.record(deck, id)?.mastery_count))
            .collect()
    }

    // ==================== Reset ====================

    /// Undo today's batch so it can be drawn again
    ///
    /// Items assigned on earlier days keep their state. The marker is
    /// rewound before the records are cleared, so a failed record write
    /// leaves the batch stamped and `assign_daily_batch` still sees it.
    pub fn reset_deck(&mut self, deck: &str, today: NaiveDate) -> Result<usize> {
        let mut records = self
            .store
            .query(deck, &|r| r.assigned_new_date == Some(today))?;
        for record in &mut records {
            record.reset();
        }

        self.store
            .set_assignment_marker(deck, today - Duration::days(1))?;
        self.store.put_many(deck, &records)?;

        log::info!("Reset {} items assigned today in deck {}", records.len(), deck);
        Ok(records.len())
    }

    /// Forget every record and the assignment marker of a deck
    pub fn reset_all_progress(&mut self, deck: &str) -> Result<()> {
        self.store.clear_deck(deck)?;
        log::info!("Cleared all learning records of deck {}", deck);
        Ok(())
    }

    // ==================== Progress ====================

    /// Mastery figures over every catalog item of a deck
    pub fn deck_progress(&self, deck: &Deck) -> Result<DeckProgress> {
        let counts: HashMap<String, u32> = self
            .store
            .query(&deck.name, &|_| true)?
            .into_iter()
            .map(|r| (r.item_id.clone(), r.mastery_count))
            .collect();

        let total_items = deck.len();
        let memorized_items = deck
            .item_ids()
            .filter(|id| counts.get(*id).copied().unwrap_or(0) >= MASTERY_THRESHOLD)
            .count();

        let memorization_rate = if total_items > 0 {
            memorized_items as f64 / total_items as f64 * 100.0
        } else {
            0.0
        };

        Ok(DeckProgress {
            total_items,
            memorized_items,
            unmemorized_items: total_items - memorized_items,
            memorization_rate,
        })
    }
}

/// Order records by their position in the deck, dropping unknown items
fn in_catalog_order(deck: &Deck, records: Vec<LearningRecord>) -> Vec<String> {
    let positions: HashMap<&str, usize> = deck
        .item_ids()
        .enumerate()
        .map(|(i, id)| (id, i))
        .collect();

    let mut ordered: Vec<(usize, String)> = records
        .into_iter()
        .filter_map(|r| positions.get(r.item_id.as_str()).map(|&pos| (pos, r.item_id)))
        .collect();
    ordered.sort_by_key(|(pos, _)| *pos);
    ordered.into_iter().map(|(_, id)| id).collect()
}
