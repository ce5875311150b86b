use crate::{Deck, SessionSummary, Settings};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayTotals {
    pub cards_studied: u32,
    pub time_spent_secs: u64,
    pub correct: u32,
    pub incorrect: u32,
}

impl DayTotals {
    pub fn record(&mut self, s: &SessionSummary) {
        self.cards_studied += s.cards_studied;
        self.time_spent_secs += s.elapsed_seconds;
        self.correct += s.correct_count;
        self.incorrect += s.incorrect_count;
    }

    pub fn accuracy(&self) -> f32 {
        let rated = self.correct + self.incorrect;
        if rated == 0 {
            0.0
        } else {
            self.correct as f32 / rated as f32
        }
    }
}

/// Daily counters and the study streak, persisted across sessions.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyStats {
    pub cards_due: u32,
    pub cards_studied_today: u32,
    pub streak: u32,
    pub last_study_date: Option<NaiveDate>,
    pub history: BTreeMap<NaiveDate, DayTotals>,
}

impl StudyStats {
    /// Zeroes today's counter if the last study day is over.
    pub fn roll_over(&mut self, today: NaiveDate) {
        if self.last_study_date != Some(today) {
            self.cards_studied_today = 0;
        }
    }

    /// A session that rated no cards leaves history and streak alone.
    pub fn record_session(&mut self, summary: &SessionSummary, today: NaiveDate) {
        self.roll_over(today);
        if summary.cards_studied == 0 {
            return;
        }
        self.history.entry(today).or_default().record(summary);
        self.cards_studied_today += summary.cards_studied;

        let yesterday = today - Duration::days(1);
        self.streak = match self.last_study_date {
            Some(d) if d == today => self.streak.max(1),
            Some(d) if d == yesterday => self.streak + 1,
            _ => 1,
        };
        self.last_study_date = Some(today);
    }

    /// The streak as of `today`; a missed day breaks it.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        match self.last_study_date {
            Some(d) if d == today || d == today - Duration::days(1) => self.streak,
            _ => 0,
        }
    }

    pub fn totals(&self) -> DayTotals {
        let mut all = DayTotals::default();
        for t in self.history.values() {
            all.cards_studied += t.cards_studied;
            all.time_spent_secs += t.time_spent_secs;
            all.correct += t.correct;
            all.incorrect += t.incorrect;
        }
        all
    }
}

/// Cards due as of `now`, capped at the daily limit from settings.
pub fn cards_due(deck: &Deck, settings: &Settings, now: DateTime<Utc>) -> u32 {
    (deck.due_count(now) as u32).min(settings.new_cards_per_day)
}
