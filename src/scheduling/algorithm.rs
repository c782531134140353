//! Graduated review interval schedule
//!
//! Every successful recall pushes the next review further out along a
//! fixed table of intervals. Recalls past the end of the table reuse the
//! last interval, so the backoff is capped rather than unbounded.
//!
//! | success | next review |
//! |---------|-------------|
//! | 1       | +3 days     |
//! | 2       | +6 days     |
//! | 3       | +12 days    |
//! | 4+      | +24 days    |
//!
//! A failed recall drops the item back to zero and schedules it for the
//! following day.

use chrono::{Duration, NaiveDate};

use super::models::LearningRecord;

/// Review intervals in days, indexed by mastery count - 1
pub const REVIEW_INTERVALS: [i64; 4] = [3, 6, 12, 24];

/// Number of successful recalls after which an item counts as memorized
pub const MASTERY_THRESHOLD: u32 = 4;

/// Days until the next review after a failed recall
const RETRY_INTERVAL: i64 = 1;

/// Interval in days for an item that has just reached `mastery_count`
pub fn review_interval(mastery_count: u32) -> i64 {
    let index = (mastery_count.max(1) as usize).min(REVIEW_INTERVALS.len()) - 1;
    REVIEW_INTERVALS[index]
}

/// Calculate the updated record after a recall answer on `today`
pub fn apply_recall(record: &LearningRecord, succeeded: bool, today: NaiveDate) -> LearningRecord {
    let mut updated = record.clone();

    if succeeded {
        let mastery_count = record.mastery_count.saturating_add(1);
        updated.mastery_count = mastery_count;
        updated.last_success_date = Some(today);
        updated.next_review_date = Some(today + Duration::days(review_interval(mastery_count)));
    } else {
        updated.mastery_count = 0;
        updated.next_review_date = Some(today + Duration::days(RETRY_INTERVAL));
    }

    updated
}

/// Next review dates for a success and a failure answered on `today`
pub fn preview_next_review(record: &LearningRecord, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let success = today + Duration::days(review_interval(record.mastery_count.saturating_add(1)));
    let failure = today + Duration::days(RETRY_INTERVAL);
    (success, failure)
}

/// Format an interval in days to a short human-readable string
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "today".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else {
        format!("{}mo", days / 30)
    }
}
