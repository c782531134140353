//! In-memory learning record store

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::{LearningRecordStore, Result};
use crate::scheduling::LearningRecord;

/// Learning records kept in memory only
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: HashMap<String, BTreeMap<String, LearningRecord>>,
    markers: HashMap<String, NaiveDate>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held for a deck
    pub fn len(&self, deck: &str) -> usize {
        self.records.get(deck).map_or(0, |records| records.len())
    }
}

impl LearningRecordStore for MemoryRecordStore {
    fn get(&self, deck: &str, item_id: &str) -> Result<Option<LearningRecord>> {
        Ok(self
            .records
            .get(deck)
            .and_then(|records| records.get(item_id))
            .cloned())
    }

    fn put(&mut self, deck: &str, record: &LearningRecord) -> Result<()> {
        self.records
            .entry(deck.to_string())
            .or_default()
            .insert(record.item_id.clone(), record.clone());
        Ok(())
    }

    fn query(
        &self,
        deck: &str,
        predicate: &dyn Fn(&LearningRecord) -> bool,
    ) -> Result<Vec<LearningRecord>> {
        Ok(self
            .records
            .get(deck)
            .map(|records| records.values().filter(|r| predicate(r)).cloned().collect())
            .unwrap_or_default())
    }

    fn assignment_marker(&self, deck: &str) -> Result<Option<NaiveDate>> {
        Ok(self.markers.get(deck).copied())
    }

    fn set_assignment_marker(&mut self, deck: &str, date: NaiveDate) -> Result<()> {
        self.markers.insert(deck.to_string(), date);
        Ok(())
    }

    fn clear_deck(&mut self, deck: &str) -> Result<()> {
        self.records.remove(deck);
        self.markers.remove(deck);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decks_are_partitioned() {
        let mut store = MemoryRecordStore::new();
        let mut record = LearningRecord::new("high", "cause");
        record.mastery_count = 2;
        store.put("high", &record).unwrap();

        assert!(store.get("middle", "cause").unwrap().is_none());
        assert_eq!(store.get("high", "cause").unwrap().unwrap().mastery_count, 2);
        assert_eq!(store.len("high"), 1);
        assert_eq!(store.len("middle"), 0);
    }

    #[test]
    fn test_query_and_clear() {
        let mut store = MemoryRecordStore::new();
        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            let mut record = LearningRecord::new("high", id);
            record.mastery_count = i as u32;
            store.put("high", &record).unwrap();
        }
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        store.set_assignment_marker("high", date).unwrap();

        let started = store.query("high", &|r| r.mastery_count > 0).unwrap();
        assert_eq!(started.len(), 2);

        store.clear_deck("high").unwrap();
        assert_eq!(store.len("high"), 0);
        assert!(store.assignment_marker("high").unwrap().is_none());
    }
}
