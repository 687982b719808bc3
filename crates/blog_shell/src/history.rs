//! Submitted-line log with a recall cursor.

use std::collections::VecDeque;

/// Position of the recall cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryCursor {
    /// Editing a new line.
    #[default]
    Live,
    /// Showing the entry at this index.
    Recall(usize),
}

/// Append-only history of executed lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLog {
    entries: VecDeque<String>,
    cursor: HistoryCursor,
    limit: usize,
}

impl HistoryLog {
    /// Creates an empty log that keeps at most `limit` entries (at least one).
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: HistoryCursor::Live,
            limit: limit.max(1),
        }
    }

    /// Records a submitted line and returns the cursor to [`HistoryCursor::Live`].
    ///
    /// Consecutive duplicates are kept.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_back(line.into());
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        self.cursor = HistoryCursor::Live;
    }

    /// Returns the cursor to [`HistoryCursor::Live`] without recording anything.
    pub fn reset_cursor(&mut self) {
        self.cursor = HistoryCursor::Live;
    }

    /// Steps toward older entries and returns the text to show.
    ///
    /// Returns `None` when the log is empty.
    pub fn back(&mut self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let index = match self.cursor {
            HistoryCursor::Live => self.entries.len() - 1,
            HistoryCursor::Recall(index) => index.saturating_sub(1),
        };
        self.cursor = HistoryCursor::Recall(index);
        self.entries.get(index).cloned()
    }

    /// Steps toward newer entries and returns the text to show.
    ///
    /// Moving past the newest entry, or stepping forward while live, yields an empty line.
    /// Returns `None` when the log is empty.
    pub fn forward(&mut self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        match self.cursor {
            HistoryCursor::Recall(index) if index + 1 < self.entries.len() => {
                self.cursor = HistoryCursor::Recall(index + 1);
                self.entries.get(index + 1).cloned()
            }
            _ => {
                self.cursor = HistoryCursor::Live;
                Some(String::new())
            }
        }
    }

    /// Current cursor.
    pub fn cursor(&self) -> HistoryCursor {
        self.cursor
    }

    /// Entries oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Number of remembered lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been submitted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_back_and_forth() {
        let mut history = HistoryLog::default();
        history.push("ls");
        history.push("help");
        assert_eq!(history.back().as_deref(), Some("help"));
        assert_eq!(history.back().as_deref(), Some("ls"));
        assert_eq!(history.back().as_deref(), Some("ls"));
        assert_eq!(history.cursor(), HistoryCursor::Recall(0));
        assert_eq!(history.forward().as_deref(), Some("help"));
        assert_eq!(history.forward().as_deref(), Some(""));
        assert_eq!(history.cursor(), HistoryCursor::Live);
        assert_eq!(history.forward().as_deref(), Some(""));
    }

    #[test]
    fn empty_log_does_nothing() {
        let mut history = HistoryLog::default();
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), None);
        assert_eq!(history.cursor(), HistoryCursor::Live);
    }

    #[test]
    fn push_resets_cursor_and_keeps_duplicates() {
        let mut history = HistoryLog::default();
        history.push("ls");
        history.back();
        history.push("ls");
        assert_eq!(history.cursor(), HistoryCursor::Live);
        assert_eq!(history.entries(), vec!["ls".to_string(), "ls".to_string()]);
    }

    #[test]
    fn limit_drops_oldest() {
        let mut history = HistoryLog::new(2);
        for line in ["a", "b", "c"] {
            history.push(line);
        }
        assert_eq!(history.entries(), vec!["b".to_string(), "c".to_string()]);
        assert_eq!(history.back().as_deref(), Some("c"));
    }
}
