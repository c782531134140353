//! Cursor movement over a working set
//!
//! Moving skips items that are already complete for the session and wraps
//! around at both ends. The walk is bounded to twice the working-set size,
//! so a set where every item is complete still terminates.

use serde::{Deserialize, Serialize};

use super::completion::LearningMode;

/// Direction of cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Forward,
    Backward,
}

/// Find the next position to display
///
/// Returns `None` for an empty working set. When no probed position is
/// unmastered the cursor falls back to the first item.
pub fn advance<F>(direction: Direction, len: usize, current: Option<usize>, is_unmastered: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    if len == 0 {
        return None;
    }

    // A missing or stale cursor starts just outside the set
    let mut candidate = current.filter(|&i| i < len);

    for _ in 0..len * 2 {
        let next = match (direction, candidate) {
            (Direction::Forward, None) => 0,
            (Direction::Forward, Some(i)) => (i + 1) % len,
            (Direction::Backward, None) | (Direction::Backward, Some(0)) => len - 1,
            (Direction::Backward, Some(i)) => i - 1,
        };
        if is_unmastered(next) {
            return Some(next);
        }
        candidate = Some(next);
    }

    Some(0)
}

/// Cursor over the active working set of a study session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionNavigator {
    mode: LearningMode,
    working_set: Vec<String>,
    cursor: Option<usize>,
}

impl SessionNavigator {
    pub fn new(mode: LearningMode, working_set: Vec<String>) -> Self {
        let cursor = if working_set.is_empty() { None } else { Some(0) };
        Self {
            mode,
            working_set,
            cursor,
        }
    }

    pub fn mode(&self) -> LearningMode {
        self.mode
    }

    pub fn working_set(&self) -> &[String] {
        &self.working_set
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Item id under the cursor
    pub fn current_item(&self) -> Option<&str> {
        self.cursor
            .and_then(|i| self.working_set.get(i))
            .map(String::as_str)
    }

    /// Replace the working set for a new mode and rewind the cursor
    pub fn switch_mode(&mut self, mode: LearningMode, working_set: Vec<String>) {
        *self = Self::new(mode, working_set);
    }

    /// Move forward to the next item whose mastery count leaves it incomplete
    pub fn next<F>(&mut self, mastery_of: F) -> Option<usize>
    where
        F: Fn(&str) -> u32,
    {
        self.step(Direction::Forward, mastery_of)
    }

    /// Move backward to the previous incomplete item
    pub fn previous<F>(&mut self, mastery_of: F) -> Option<usize>
    where
        F: Fn(&str) -> u32,
    {
        self.step(Direction::Backward, mastery_of)
    }

    fn step<F>(&mut self, direction: Direction, mastery_of: F) -> Option<usize>
    where
        F: Fn(&str) -> u32,
    {
        let mode = self.mode;
        let set = &self.working_set;
        self.cursor = advance(direction, set.len(), self.cursor, |i| {
            !mode.is_complete(mastery_of(&set[i]))
        });
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{}", i)).collect()
    }

    #[test]
    fn test_empty_set_has_no_selection() {
        assert_eq!(advance(Direction::Forward, 0, Some(0), |_| true), None);
        assert_eq!(advance(Direction::Backward, 0, None, |_| true), None);
    }

    #[test]
    fn test_forward_skips_mastered() {
        let mastered = [true, false, true, false, false];
        let next = advance(Direction::Forward, 5, Some(1), |i| !mastered[i]);
        assert_eq!(next, Some(3));
    }

    #[test]
    fn test_backward_skips_mastered() {
        let mastered = [false, false, false, true, false, true, true];
        let prev = advance(Direction::Backward, 7, Some(6), |i| !mastered[i]);
        assert_eq!(prev, Some(4));
    }

    #[test]
    fn test_wraps_at_both_ends() {
        assert_eq!(advance(Direction::Forward, 10, Some(9), |_| true), Some(0));
        assert_eq!(advance(Direction::Backward, 10, Some(0), |_| true), Some(9));
    }

    #[test]
    fn test_current_item_can_be_returned_after_full_lap() {
        // Only the current item is unmastered
        let next = advance(Direction::Forward, 4, Some(2), |i| i == 2);
        assert_eq!(next, Some(2));
    }

    #[test]
    fn test_all_mastered_falls_back_to_first() {
        assert_eq!(advance(Direction::Forward, 10, Some(5), |_| false), Some(0));
        assert_eq!(advance(Direction::Backward, 10, Some(5), |_| false), Some(0));
    }

    #[test]
    fn test_probe_budget_is_bounded() {
        for len in 1..20 {
            let probes = Cell::new(0);
            advance(Direction::Forward, len, Some(0), |_| {
                probes.set(probes.get() + 1);
                false
            });
            assert_eq!(probes.get(), 2 * len);
        }
    }

    #[test]
    fn test_missing_or_stale_cursor() {
        assert_eq!(advance(Direction::Forward, 3, None, |_| true), Some(0));
        assert_eq!(advance(Direction::Backward, 3, None, |_| true), Some(2));
        assert_eq!(advance(Direction::Forward, 3, Some(7), |_| true), Some(0));
    }

    #[test]
    fn test_navigator_new_words_mode() {
        let counts = [1u32, 0, 1, 0];
        let set = ids(4);
        let mut nav = SessionNavigator::new(LearningMode::NewWords, set.clone());
        let mastery = |id: &str| counts[set.iter().position(|s| s == id).unwrap()];

        assert_eq!(nav.current_item(), Some("w0"));
        assert_eq!(nav.next(mastery), Some(1));
        assert_eq!(nav.next(mastery), Some(3));
        assert_eq!(nav.next(mastery), Some(1));
        assert_eq!(nav.previous(mastery), Some(3));
        assert_eq!(nav.current_item(), Some("w3"));
    }

    #[test]
    fn test_navigator_review_mode_uses_threshold() {
        let counts = [4u32, 2, 5];
        let set = ids(3);
        let mut nav = SessionNavigator::new(LearningMode::Review, set.clone());
        let mastery = |id: &str| counts[set.iter().position(|s| s == id).unwrap()];

        assert_eq!(nav.next(mastery), Some(1));
        assert_eq!(nav.next(mastery), Some(1));
    }

    #[test]
    fn test_switch_mode_rewinds() {
        let mut nav = SessionNavigator::new(LearningMode::NewWords, ids(3));
        nav.next(|_| 0);
        nav.switch_mode(LearningMode::Review, Vec::new());
        assert_eq!(nav.mode(), LearningMode::Review);
        assert_eq!(nav.cursor(), None);
        assert_eq!(nav.current_item(), None);
        assert_eq!(nav.next(|_| 0), None);
    }
}
