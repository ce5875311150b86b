use crate::Difficulty;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Progress through one pass over a deck. Lives only as long as the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    cursor: usize,
    correct_count: u32,
    incorrect_count: u32,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            cursor: 0,
            correct_count: 0,
            incorrect_count: 0,
            started_at,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Tallies the rating and moves to the next card.
    pub(crate) fn record(&mut self, difficulty: Difficulty) {
        if difficulty.is_correct() {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
        self.cursor += 1;
    }

    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        (now - self.started_at).num_seconds().max(0) as u64
    }

    pub fn summarize(&self, now: DateTime<Utc>) -> SessionSummary {
        SessionSummary {
            cards_studied: self.cursor as u32,
            correct_count: self.correct_count,
            incorrect_count: self.incorrect_count,
            elapsed_seconds: self.elapsed_seconds(now),
            finished_at: now,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub cards_studied: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub elapsed_seconds: u64,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            finished_at: now,
            ..Self::default()
        }
    }

    /// `m:ss`, as shown on the session timer.
    pub fn elapsed_display(&self) -> String {
        format!("{}:{:02}", self.elapsed_seconds / 60, self.elapsed_seconds % 60)
    }
}
