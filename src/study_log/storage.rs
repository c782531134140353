//! Study log storage implementation

use std::fs;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate};

use super::models::*;
use crate::store::{write_atomic, Result};

/// Storage for per-day study activity, kept in study_log.json
pub struct StudyLogStorage {
    data_dir: PathBuf,
}

impl StudyLogStorage {
    /// Create a new study log storage
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn log_file(&self) -> PathBuf {
        self.data_dir.join("study_log.json")
    }

    /// List all entries, oldest first
    pub fn list_entries(&self) -> Result<Vec<DailyStudyEntry>> {
        let path = self.log_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        match serde_json::from_str::<Vec<DailyStudyEntry>>(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let aside = path.with_extension("json.corrupt");
                log::warn!(
                    "Study log {:?} is unreadable ({}); moving it to {:?}",
                    path,
                    e,
                    aside
                );
                fs::rename(&path, &aside)?;
                Ok(Vec::new())
            }
        }
    }

    /// Entry for a date, or an empty one if nothing was logged
    pub fn entry(&self, date: NaiveDate) -> Result<DailyStudyEntry> {
        let entries = self.list_entries()?;
        Ok(entries
            .into_iter()
            .find(|e| e.date == date)
            .unwrap_or_else(|| DailyStudyEntry::new(date)))
    }

    fn save_entries(&self, entries: &[DailyStudyEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        write_atomic(&self.log_file(), &json)
    }

    /// Apply a change to the entry for `date`, creating it if needed
    fn update<F>(&self, date: NaiveDate, change: F) -> Result<DailyStudyEntry>
    where
        F: FnOnce(&mut DailyStudyEntry),
    {
        let mut entries = self.list_entries()?;
        let updated = match entries.iter_mut().find(|e| e.date == date) {
            Some(existing) => {
                change(existing);
                existing.clone()
            }
            None => {
                let mut entry = DailyStudyEntry::new(date);
                change(&mut entry);
                entries.push(entry.clone());
                entries.sort_by(|a, b| a.date.cmp(&b.date));
                entry
            }
        };
        self.save_entries(&entries)?;
        Ok(updated)
    }

    // ===== Recording =====

    pub fn record_view(&self, date: NaiveDate) -> Result<DailyStudyEntry> {
        self.update(date, |e| e.words_viewed += 1)
    }

    /// Log a recall answer; only successes move the counters
    pub fn record_recall(
        &self,
        date: NaiveDate,
        succeeded: bool,
        from_review: bool,
    ) -> Result<DailyStudyEntry> {
        self.update(date, |e| {
            if succeeded {
                e.words_memorized += 1;
                if from_review {
                    e.review_words_completed += 1;
                }
            }
        })
    }

    pub fn record_assignment(&self, date: NaiveDate, count: u32) -> Result<DailyStudyEntry> {
        self.update(date, |e| e.new_words_assigned += count)
    }

    pub fn add_study_time(&self, date: NaiveDate, seconds: u64) -> Result<DailyStudyEntry> {
        self.update(date, |e| e.study_seconds += seconds)
    }

    // ===== Analytics =====

    /// Whether the daily goal is met on `date`
    pub fn goal_achieved(&self, date: NaiveDate, goal: &DailyGoal) -> Result<bool> {
        let entries = self.list_entries()?;
        Ok(entries
            .iter()
            .find(|e| e.date == date)
            .is_some_and(|e| goal.is_met_by(e)))
    }

    /// Totals, averages and the current streak as of `today`
    pub fn statistics(&self, today: NaiveDate) -> Result<StudyStatistics> {
        let entries = self.list_entries()?;
        if entries.is_empty() {
            return Ok(StudyStatistics::default());
        }

        let days = entries.len();
        let total_study_minutes: u64 = entries.iter().map(|e| e.study_minutes()).sum();
        let total_words_viewed: u64 = entries.iter().map(|e| e.words_viewed as u64).sum();
        let total_words_memorized: u64 = entries.iter().map(|e| e.words_memorized as u64).sum();

        Ok(StudyStatistics {
            total_study_days: days,
            total_study_minutes,
            total_words_viewed,
            total_words_memorized,
            average_words_per_day: total_words_viewed as f64 / days as f64,
            average_minutes_per_day: total_study_minutes as f64 / days as f64,
            current_streak: calculate_streak(&entries, today),
        })
    }
}

/// Consecutive logged days ending at `today`
fn calculate_streak(entries: &[DailyStudyEntry], today: NaiveDate) -> u32 {
    let mut streak = 0u32;
    let mut check_date = today;

    while entries.iter().any(|e| e.date == check_date) {
        streak += 1;
        check_date = check_date - Duration::days(1);
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (StudyLogStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = StudyLogStorage::new(temp_dir.path().to_path_buf()).unwrap();
        (storage, temp_dir)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_recording_accumulates() {
        let (storage, _temp) = create_test_storage();
        let today = date("2024-07-01");

        storage.record_view(today).unwrap();
        storage.record_view(today).unwrap();
        storage.record_recall(today, true, false).unwrap();
        storage.record_recall(today, true, true).unwrap();
        storage.record_recall(today, false, true).unwrap();
        storage.record_assignment(today, 10).unwrap();
        storage.add_study_time(today, 90).unwrap();

        let entry = storage.entry(today).unwrap();
        assert_eq!(entry.words_viewed, 2);
        assert_eq!(entry.words_memorized, 2);
        assert_eq!(entry.review_words_completed, 1);
        assert_eq!(entry.new_words_assigned, 10);
        assert_eq!(entry.study_seconds, 90);
        assert_eq!(entry.study_minutes(), 1);
    }

    #[test]
    fn test_missing_entry_is_empty() {
        let (storage, _temp) = create_test_storage();
        let entry = storage.entry(date("2024-07-01")).unwrap();
        assert_eq!(entry, DailyStudyEntry::new(date("2024-07-01")));
        assert!(storage.list_entries().unwrap().is_empty());
    }

    #[test]
    fn test_goal_by_words_or_minutes() {
        let (storage, _temp) = create_test_storage();
        let goal = DailyGoal::default();
        let day1 = date("2024-07-01");
        let day2 = date("2024-07-02");

        for _ in 0..9 {
            storage.record_recall(day1, true, false).unwrap();
        }
        assert!(!storage.goal_achieved(day1, &goal).unwrap());
        storage.record_recall(day1, true, false).unwrap();
        assert!(storage.goal_achieved(day1, &goal).unwrap());

        storage.add_study_time(day2, 30 * 60).unwrap();
        assert!(storage.goal_achieved(day2, &goal).unwrap());
        assert!(!storage.goal_achieved(date("2024-07-03"), &goal).unwrap());
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let (storage, _temp) = create_test_storage();
        for day in ["2024-07-01", "2024-07-03", "2024-07-04", "2024-07-05"] {
            storage.record_view(date(day)).unwrap();
        }

        let stats = storage.statistics(date("2024-07-05")).unwrap();
        assert_eq!(stats.current_streak, 3);
        assert_eq!(stats.total_study_days, 4);
        assert_eq!(stats.total_words_viewed, 4);
        assert!((stats.average_words_per_day - 1.0).abs() < 1e-9);

        // No activity today breaks the streak
        let stats = storage.statistics(date("2024-07-06")).unwrap();
        assert_eq!(stats.current_streak, 0);
    }

    #[test]
    fn test_entries_stay_sorted() {
        let (storage, _temp) = create_test_storage();
        storage.record_view(date("2024-07-05")).unwrap();
        storage.record_view(date("2024-07-01")).unwrap();
        storage.record_view(date("2024-07-03")).unwrap();

        let dates: Vec<NaiveDate> = storage.list_entries().unwrap().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date("2024-07-01"), date("2024-07-03"), date("2024-07-05")]);
    }

    #[test]
    fn test_unreadable_log_is_kept_aside() {
        let (storage, temp) = create_test_storage();
        for day in ["2024-07-01", "2024-07-02", "2024-07-03", "2024-07-04", "2024-07-05"] {
            storage.record_view(date(day)).unwrap();
        }

        let log_path = temp.path().join("study_log.json");
        let mut content = fs::read_to_string(&log_path).unwrap();
        content.push(',');
        fs::write(&log_path, &content).unwrap();

        storage.record_view(date("2024-07-06")).unwrap();

        let aside = temp.path().join("study_log.json.corrupt");
        assert_eq!(fs::read_to_string(&aside).unwrap(), content);
        let entries = storage.list_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, date("2024-07-06"));
        assert!(!temp.path().join("study_log.json.tmp").exists());
    }

    #[test]
    fn test_empty_statistics() {
        let (storage, _temp) = create_test_storage();
        let stats = storage.statistics(date("2024-07-01")).unwrap();
        assert_eq!(stats, StudyStatistics::default());
    }
}
