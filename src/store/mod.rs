//! Persistence for learning records
//!
//! The scheduling engine only talks to a [`LearningRecordStore`]. Two
//! implementations are provided: an in-memory store for tests and
//! short-lived sessions, and a JSON file store for the CLI.

mod file_store;
mod memory;

pub use file_store::FileRecordStore;
pub use memory::MemoryRecordStore;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::scheduling::LearningRecord;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid deck name: {0:?}")]
    InvalidDeck(String),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Write to a sibling temp file, then rename over the target
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Durable mapping from (deck, item id) to a learning record, plus the
/// per-deck daily assignment marker
pub trait LearningRecordStore {
    fn get(&self, deck: &str, item_id: &str) -> Result<Option<LearningRecord>>;

    fn put(&mut self, deck: &str, record: &LearningRecord) -> Result<()>;

    /// Persist several records of one deck together
    fn put_many(&mut self, deck: &str, records: &[LearningRecord]) -> Result<()> {
        for record in records {
            self.put(deck, record)?;
        }
        Ok(())
    }

    fn query(
        &self,
        deck: &str,
        predicate: &dyn Fn(&LearningRecord) -> bool,
    ) -> Result<Vec<LearningRecord>>;

    /// Last date on which the deck's new-item batch was drawn
    fn assignment_marker(&self, deck: &str) -> Result<Option<NaiveDate>>;

    fn set_assignment_marker(&mut self, deck: &str, date: NaiveDate) -> Result<()>;

    /// Remove every record and the marker of a deck
    fn clear_deck(&mut self, deck: &str) -> Result<()>;
}

/// Outcome of decoding one persisted record
#[derive(Debug, Clone, PartialEq)]
pub enum RecordDecode {
    Parsed(LearningRecord),
    /// The stored value was unreadable and a default record stands in for it
    Fallback(LearningRecord),
}

impl RecordDecode {
    /// Decode a stored value, substituting a default record on failure
    pub fn from_value(deck: &str, item_id: &str, value: Value) -> Self {
        match serde_json::from_value::<LearningRecord>(value) {
            Ok(mut record) => {
                // The storage key is authoritative for identity
                record.deck = deck.to_string();
                record.item_id = item_id.to_string();
                Self::Parsed(record)
            }
            Err(e) => {
                log::warn!("Unreadable record {}/{}: {}; using defaults", deck, item_id, e);
                Self::Fallback(LearningRecord::new(deck, item_id))
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn into_record(self) -> LearningRecord {
        match self {
            Self::Parsed(record) | Self::Fallback(record) => record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_valid_record() {
        let value = json!({
            "itemId": "company",
            "deck": "high",
            "masteryCount": 2,
            "nextReviewDate": "2024-06-10"
        });
        let decoded = RecordDecode::from_value("high", "company", value);
        assert!(!decoded.is_fallback());
        let record = decoded.into_record();
        assert_eq!(record.mastery_count, 2);
        assert_eq!(record.next_review_date, NaiveDate::from_ymd_opt(2024, 6, 10));
    }

    #[test]
    fn test_decode_malformed_record_falls_back() {
        let value = json!({ "masteryCount": "lots", "nextReviewDate": 7 });
        let decoded = RecordDecode::from_value("high", "plant", value);
        assert!(decoded.is_fallback());
        assert_eq!(decoded.into_record(), LearningRecord::new("high", "plant"));
    }

    #[test]
    fn test_decode_missing_identity_uses_key() {
        let value = json!({ "masteryCount": 1 });
        let decoded = RecordDecode::from_value("low", "fire", value);
        assert!(!decoded.is_fallback());
        let record = decoded.into_record();
        assert_eq!(record.item_id, "fire");
        assert_eq!(record.deck, "low");
        assert_eq!(record.mastery_count, 1);
    }
}
