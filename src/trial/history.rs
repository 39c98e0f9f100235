//! In-memory record of completed trials.
//!
//! The history is append-only apart from per-item removal and a full clear.
//! Nothing here touches disk; restarting the process discards everything.

use chrono::{DateTime, Local};

/// Identity of a recorded trial. Allocated from a monotonic counter and never
/// reused, even across `History::clear`.
pub type TrialId = u64;

/// A single completed (non-early) attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    pub id: TrialId,
    pub elapsed_ms: u64,
    pub completed_at: DateTime<Local>,
}

impl Trial {
    /// Render the row as shown in the scores list, e.g. `2026-10-14 09:30:12: 231ms`.
    pub fn describe(&self, timestamp_format: &str) -> String {
        format!(
            "{}: {}ms",
            self.completed_at.format(timestamp_format),
            self.elapsed_ms
        )
    }
}

#[derive(Debug, Default)]
pub struct History {
    trials: Vec<Trial>,
    next_id: TrialId,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a trial at the end of the list and return a copy of it.
    pub fn append(&mut self, elapsed_ms: u64, completed_at: DateTime<Local>) -> Trial {
        let trial = Trial {
            id: self.allocate_id(),
            elapsed_ms,
            completed_at,
        };
        self.trials.push(trial.clone());
        trial
    }

    /// Remove one trial by id. Returns the removed trial, or `None` if no
    /// trial carries that id.
    pub fn remove(&mut self, id: TrialId) -> Option<Trial> {
        let idx = self.trials.iter().position(|t| t.id == id)?;
        Some(self.trials.remove(idx))
    }

    /// Drop every trial. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.trials.len();
        self.trials.clear();
        removed
    }

    /// Integer mean of the recorded reaction times, truncated toward zero.
    /// An empty history averages to 0.
    pub fn average(&self) -> u64 {
        if self.trials.is_empty() {
            return 0;
        }
        let sum: u64 = self.trials.iter().map(|t| t.elapsed_ms).sum();
        sum / self.trials.len() as u64
    }

    pub fn last(&self) -> Option<&Trial> {
        self.trials.last()
    }

    pub fn get(&self, index: usize) -> Option<&Trial> {
        self.trials.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trial> {
        self.trials.iter()
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    fn allocate_id(&mut self) -> TrialId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
