//! Session completion and progress

use serde::{Deserialize, Serialize};

use crate::scheduling::MASTERY_THRESHOLD;

/// Which working set a session is walking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum LearningMode {
    /// Today's batch of new items
    #[default]
    NewWords,
    /// Items due for review today
    Review,
}

impl LearningMode {
    /// Mastery count at which an item is done for this mode's session
    pub fn completion_count(self) -> u32 {
        match self {
            Self::NewWords => 1,
            Self::Review => MASTERY_THRESHOLD,
        }
    }

    pub fn is_complete(self, mastery_count: u32) -> bool {
        mastery_count >= self.completion_count()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NewWords => "new words",
            Self::Review => "review words",
        }
    }
}

/// True when a non-empty working set has every item complete
pub fn is_session_complete<I>(mode: LearningMode, mastery_counts: I) -> bool
where
    I: IntoIterator<Item = u32>,
{
    let mut any = false;
    for count in mastery_counts {
        if !mode.is_complete(count) {
            return false;
        }
        any = true;
    }
    any
}

/// Completion figures for the active working set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProgress {
    pub mode: LearningMode,
    pub total: usize,
    pub completed: usize,
    pub percentage: f64,
}

impl SessionProgress {
    pub fn calculate(mode: LearningMode, mastery_counts: &[u32]) -> Self {
        let total = mastery_counts.len();
        let completed = mastery_counts
            .iter()
            .filter(|&&count| mode.is_complete(count))
            .count();
        let percentage = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            mode,
            total,
            completed,
            percentage,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}
