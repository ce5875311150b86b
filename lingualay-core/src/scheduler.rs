use crate::{Card, Difficulty};
use chrono::{DateTime, Utc};

/// Scheduling fields a rating wrote to a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleOutcome {
    pub interval: i64,
    pub repetitions: u32,
    pub due_at: DateTime<Utc>,
}

/// Applies the fixed difficulty table to `card` as of `now`.
///
/// There is no adaptive growth: the stored interval and the due offset come
/// straight from [`Difficulty::interval`] and [`Difficulty::due_offset`].
pub fn apply_difficulty(card: &mut Card, difficulty: Difficulty, now: DateTime<Utc>) -> ScheduleOutcome {
    card.interval = difficulty.interval();
    card.repetitions += 1;
    card.due_at = now + difficulty.due_offset();

    ScheduleOutcome {
        interval: card.interval,
        repetitions: card.repetitions,
        due_at: card.due_at,
    }
}
