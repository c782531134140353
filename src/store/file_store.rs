//! JSON file storage for learning records
//!
//! Directory structure under the data directory:
//! ```text
//! decks/{deck}/
//! ├── records.json   # Object: item id -> learning record
//! └── marker.json    # Last date the daily batch was drawn
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{write_atomic, LearningRecordStore, RecordDecode, Result, StorageError};
use crate::scheduling::LearningRecord;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentMarker {
    last_assigned_date: NaiveDate,
}

/// Learning records persisted as one JSON file per deck
pub struct FileRecordStore {
    /// Base path for app data (e.g., ~/.local/share/wordcard)
    base_path: PathBuf,
}

impl FileRecordStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Default data directory for the application
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("wordcard"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Get the directory for a deck, rejecting names that escape it
    fn deck_dir(&self, deck: &str) -> Result<PathBuf> {
        let invalid = deck.is_empty()
            || deck == "."
            || deck == ".."
            || deck.contains(['/', '\\'])
            || deck.contains('\0');
        if invalid {
            return Err(StorageError::InvalidDeck(deck.to_string()));
        }
        Ok(self.base_path.join("decks").join(deck))
    }

    fn records_path(&self, deck: &str) -> Result<PathBuf> {
        Ok(self.deck_dir(deck)?.join("records.json"))
    }

    fn marker_path(&self, deck: &str) -> Result<PathBuf> {
        Ok(self.deck_dir(deck)?.join("marker.json"))
    }

    /// Load every record of a deck, decoding each one independently
    fn load_records(&self, deck: &str) -> Result<BTreeMap<String, LearningRecord>> {
        let path = self.records_path(deck)?;
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&path)?;
        let entries = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(entries)) => entries,
            Ok(_) | Err(_) => {
                let aside = path.with_extension("json.corrupt");
                log::warn!(
                    "Deck file {:?} is not a record map; moving it to {:?}",
                    path,
                    aside
                );
                fs::rename(&path, &aside)?;
                return Ok(BTreeMap::new());
            }
        };

        Ok(entries
            .into_iter()
            .map(|(item_id, value)| {
                let record = RecordDecode::from_value(deck, &item_id, value).into_record();
                (item_id, record)
            })
            .collect())
    }

    /// Write all records of a deck in one replace
    fn save_records(&self, deck: &str, records: &BTreeMap<String, LearningRecord>) -> Result<()> {
        fs::create_dir_all(self.deck_dir(deck)?)?;
        let json = serde_json::to_string_pretty(records)?;
        write_atomic(&self.records_path(deck)?, &json)
    }
}

impl LearningRecordStore for FileRecordStore {
    fn get(&self, deck: &str, item_id: &str) -> Result<Option<LearningRecord>> {
        Ok(self.load_records(deck)?.remove(item_id))
    }

    fn put(&mut self, deck: &str, record: &LearningRecord) -> Result<()> {
        self.put_many(deck, std::slice::from_ref(record))
    }

    fn put_many(&mut self, deck: &str, records: &[LearningRecord]) -> Result<()> {
        let mut existing = self.load_records(deck)?;
        for record in records {
            existing.insert(record.item_id.clone(), record.clone());
        }
        self.save_records(deck, &existing)
    }

    fn query(
        &self,
        deck: &str,
        predicate: &dyn Fn(&LearningRecord) -> bool,
    ) -> Result<Vec<LearningRecord>> {
        Ok(self
            .load_records(deck)?
            .into_values()
            .filter(|r| predicate(r))
            .collect())
    }

    fn assignment_marker(&self, deck: &str) -> Result<Option<NaiveDate>> {
        let path = self.marker_path(deck)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        match serde_json::from_str::<AssignmentMarker>(&content) {
            Ok(marker) => Ok(Some(marker.last_assigned_date)),
            Err(e) => {
                log::warn!("Unreadable assignment marker for deck {}: {}", deck, e);
                Ok(None)
            }
        }
    }

    fn set_assignment_marker(&mut self, deck: &str, date: NaiveDate) -> Result<()> {
        fs::create_dir_all(self.deck_dir(deck)?)?;
        let marker = AssignmentMarker {
            last_assigned_date: date,
        };
        write_atomic(&self.marker_path(deck)?, &serde_json::to_string_pretty(&marker)?)
    }

    fn clear_deck(&mut self, deck: &str) -> Result<()> {
        let dir = self.deck_dir(deck)?;
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        Ok(())
    }
}
