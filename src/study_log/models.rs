//! Study log data models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Activity counters for a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStudyEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub words_viewed: u32,
    /// Successful recalls
    #[serde(default)]
    pub words_memorized: u32,
    #[serde(default)]
    pub study_seconds: u64,
    #[serde(default)]
    pub new_words_assigned: u32,
    /// Successful recalls of items from the review set
    #[serde(default)]
    pub review_words_completed: u32,
}

impl DailyStudyEntry {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            words_viewed: 0,
            words_memorized: 0,
            study_seconds: 0,
            new_words_assigned: 0,
            review_words_completed: 0,
        }
    }

    pub fn study_minutes(&self) -> u64 {
        self.study_seconds / 60
    }
}

/// Daily goal: met when either threshold is reached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyGoal {
    pub daily_memorized_words: u32,
    pub daily_study_minutes: u64,
}

impl Default for DailyGoal {
    fn default() -> Self {
        Self {
            daily_memorized_words: 10,
            daily_study_minutes: 30,
        }
    }
}

impl DailyGoal {
    pub fn is_met_by(&self, entry: &DailyStudyEntry) -> bool {
        entry.words_memorized >= self.daily_memorized_words
            || entry.study_minutes() >= self.daily_study_minutes
    }
}

/// Totals across every logged day
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStatistics {
    pub total_study_days: usize,
    pub total_study_minutes: u64,
    pub total_words_viewed: u64,
    pub total_words_memorized: u64,
    pub average_words_per_day: f64,
    pub average_minutes_per_day: f64,
    pub current_streak: u32,
}
