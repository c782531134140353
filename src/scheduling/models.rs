//! Data models for the scheduling engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::algorithm::MASTERY_THRESHOLD;

/// Spaced repetition state for one vocabulary item within one deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningRecord {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub deck: String,
    /// Successful recalls since the last failure
    #[serde(default)]
    pub mastery_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_success_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<NaiveDate>,
    /// Day this item was handed out as part of a daily new-word batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_new_date: Option<NaiveDate>,
}

impl LearningRecord {
    pub fn new(deck: &str, item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            deck: deck.to_string(),
            mastery_count: 0,
            last_success_date: None,
            next_review_date: None,
            assigned_new_date: None,
        }
    }

    /// Check if the item has reached the mastery threshold
    pub fn is_memorized(&self) -> bool {
        self.mastery_count >= MASTERY_THRESHOLD
    }

    /// Assigned today and not yet recalled successfully
    pub fn is_new_on(&self, date: NaiveDate) -> bool {
        self.assigned_new_date == Some(date) && self.mastery_count == 0
    }

    /// Scheduled for review today and still short of mastery
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.next_review_date == Some(date)
            && self.mastery_count > 0
            && self.mastery_count < MASTERY_THRESHOLD
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_new_date.is_some()
    }

    /// Return all scheduling fields to their defaults, keeping identity
    pub fn reset(&mut self) {
        self.mastery_count = 0;
        self.last_success_date = None;
        self.next_review_date = None;
        self.assigned_new_date = None;
    }
}

/// Result of processing a single recall answer
#[derive(Debug, Clone)]
pub struct RecallOutcome {
    pub record: LearningRecord,
    pub is_memorized: bool,
}

/// What `assign_daily_batch` did for a deck and date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// A batch was already drawn for this date
    AlreadyAssigned,
    /// Not enough unassigned items for a full batch; nothing was assigned
    InsufficientPool { available: usize, capacity: usize },
    /// A full batch was drawn
    Assigned(Vec<String>),
}

impl AssignmentOutcome {
    pub fn assigned_count(&self) -> usize {
        match self {
            Self::Assigned(ids) => ids.len(),
            _ => 0,
        }
    }
}

/// Both working sets for a deck on a given day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayWords {
    pub new_words: Vec<String>,
    pub review_words: Vec<String>,
}

impl TodayWords {
    pub fn total(&self) -> usize {
        self.new_words.len() + self.review_words.len()
    }
}

/// Overall mastery figures for a deck
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckProgress {
    pub total_items: usize,
    pub memorized_items: usize,
    pub unmemorized_items: usize,
    pub memorization_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_new_record_defaults() {
        let record = LearningRecord::new("high", "environment");
        assert_eq!(record.mastery_count, 0);
        assert!(!record.is_assigned());
        assert!(!record.is_memorized());
        assert!(record.next_review_date.is_none());
    }

    #[test]
    fn test_new_and_due_predicates() {
        let today = date("2024-03-10");
        let mut record = LearningRecord::new("high", "company");
        record.assigned_new_date = Some(today);
        assert!(record.is_new_on(today));
        assert!(!record.is_new_on(date("2024-03-11")));

        record.mastery_count = 2;
        record.next_review_date = Some(today);
        assert!(!record.is_new_on(today));
        assert!(record.is_due_on(today));

        record.mastery_count = MASTERY_THRESHOLD;
        assert!(!record.is_due_on(today));
        assert!(record.is_memorized());
    }

    #[test]
    fn test_json_round_trip_with_absent_dates() {
        let record = LearningRecord::new("middle", "face");
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("nextReviewDate"));
        let back: LearningRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_json_round_trip_with_all_fields() {
        let record = LearningRecord {
            item_id: "government".to_string(),
            deck: "high".to_string(),
            mastery_count: 3,
            last_success_date: Some(date("2024-01-02")),
            next_review_date: Some(date("2024-01-14")),
            assigned_new_date: Some(date("2023-12-30")),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"nextReviewDate\":\"2024-01-14\""));
        let back: LearningRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_reset_clears_scheduling_fields() {
        let mut record = LearningRecord::new("high", "race");
        record.mastery_count = 2;
        record.assigned_new_date = Some(date("2024-02-01"));
        record.next_review_date = Some(date("2024-02-07"));
        record.reset();
        assert_eq!(record, LearningRecord::new("high", "race"));
    }
}
