use chrono::{Duration, NaiveDate, Utc};
use lingualay_core::{cards_due, Card, Deck, SessionSummary, Settings, StudyStats};

fn summary(studied: u32, correct: u32, secs: u64) -> SessionSummary {
    SessionSummary {
        cards_studied: studied,
        correct_count: correct,
        incorrect_count: studied - correct,
        elapsed_seconds: secs,
        finished_at: Utc::now(),
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

#[test]
fn sessions_on_same_day_accumulate() {
    let mut stats = StudyStats::default();
    stats.record_session(&summary(3, 2, 60), day(1));
    stats.record_session(&summary(2, 2, 30), day(1));

    assert_eq!(stats.cards_studied_today, 5);
    assert_eq!(stats.streak, 1);
    let t = &stats.history[&day(1)];
    assert_eq!(t.cards_studied, 5);
    assert_eq!(t.time_spent_secs, 90);
    assert_eq!(t.correct, 4);
    assert_eq!(t.incorrect, 1);
    assert!((t.accuracy() - 0.8).abs() < 1e-6);
}

#[test]
fn streak_continues_and_breaks() {
    let mut stats = StudyStats::default();
    stats.record_session(&summary(1, 1, 5), day(1));
    stats.record_session(&summary(1, 1, 5), day(2));
    stats.record_session(&summary(1, 0, 5), day(3));
    assert_eq!(stats.streak, 3);
    assert_eq!(stats.current_streak(day(4)), 3);
    assert_eq!(stats.current_streak(day(5)), 0);

    stats.record_session(&summary(1, 1, 5), day(6));
    assert_eq!(stats.streak, 1);
    assert_eq!(stats.totals().cards_studied, 4);
}

#[test]
fn empty_session_is_not_study() {
    let mut stats = StudyStats::default();
    stats.record_session(&summary(0, 0, 3), day(1));
    assert_eq!(stats.streak, 0);
    assert_eq!(stats.last_study_date, None);
    assert!(stats.history.is_empty());
}

#[test]
fn new_day_resets_daily_counter() {
    let mut stats = StudyStats::default();
    stats.record_session(&summary(4, 4, 5), day(1));
    stats.roll_over(day(1));
    assert_eq!(stats.cards_studied_today, 4);
    stats.roll_over(day(2));
    assert_eq!(stats.cards_studied_today, 0);
    stats.record_session(&summary(1, 1, 5), day(2));
    assert_eq!(stats.cards_studied_today, 1);
}

#[test]
fn stats_survive_json() {
    let mut stats = StudyStats::default();
    stats.record_session(&summary(2, 1, 12), day(7));
    let json = serde_json::to_string(&stats).unwrap();
    assert!(json.contains("\"2024-05-07\""));
    let back: StudyStats = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stats);
}

#[test]
fn due_count_is_capped_by_settings() {
    let mut cards: Vec<Card> = (0..30).map(|i| Card::new(format!("{i}"), "x")).collect();
    let now = Utc::now();
    cards[0].due_at = now + Duration::days(1);
    let deck = Deck::new("Many", "", cards);

    assert_eq!(deck.due_count(now), 29);
    assert_eq!(cards_due(&deck, &Settings::default(), now), 20);

    let settings = Settings { new_cards_per_day: 50, ..Settings::default() };
    assert_eq!(cards_due(&deck, &settings, now), 29);
}

#[test]
fn settings_validation() {
    assert!(Settings::default().validate().is_ok());
    let bad = Settings { new_cards_per_day: 0, ..Settings::default() };
    assert!(bad.validate().is_err());
    let bad = Settings { max_review_time_minutes: 0, ..Settings::default() };
    assert!(bad.validate().is_err());
}
