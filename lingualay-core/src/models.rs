use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::CoreError;

pub type CardId = String;

/// Stored `interval` value a freshly imported card starts with.
pub const DEFAULT_INTERVAL: i64 = 1;

/// The four recall judgments a user can give after revealing an answer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Again,
    Hard,
    Good,
    Easy,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Again,
        Difficulty::Hard,
        Difficulty::Good,
        Difficulty::Easy,
    ];

    /// Value written to `Card::interval`. Units are not consistent across
    /// variants: `Again` stores minutes, `Good` stores days.
    pub fn interval(&self) -> i64 {
        match self {
            Difficulty::Again => 1,
            Difficulty::Hard => 6,
            Difficulty::Good => 1,
            Difficulty::Easy => 4,
        }
    }

    /// Offset added to the rating time to get the next due timestamp.
    pub fn due_offset(&self) -> Duration {
        match self {
            Difficulty::Again => Duration::minutes(1),
            Difficulty::Hard => Duration::minutes(6),
            Difficulty::Good => Duration::days(1),
            Difficulty::Easy => Duration::days(4),
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Difficulty::Good | Difficulty::Easy)
    }

    /// Anki ease button number (1..=4).
    pub fn ease(&self) -> u8 {
        match self {
            Difficulty::Again => 1,
            Difficulty::Hard => 2,
            Difficulty::Good => 3,
            Difficulty::Easy => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Again => "again",
            Difficulty::Hard => "hard",
            Difficulty::Good => "good",
            Difficulty::Easy => "easy",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "a" | "again" => Ok(Difficulty::Again),
            "2" | "h" | "hard" => Ok(Difficulty::Hard),
            "3" | "g" | "good" => Ok(Difficulty::Good),
            "4" | "e" | "easy" => Ok(Difficulty::Easy),
            other => Err(CoreError::Parse(format!("unknown difficulty: {other}"))),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default = "new_card_id", deserialize_with = "card_id_from_any")]
    pub id: CardId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub front: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub back: String,
    #[serde(default = "default_interval")]
    pub interval: i64,
    #[serde(default)]
    pub repetitions: u32,
    #[serde(default = "Utc::now", alias = "dueDate")]
    pub due_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeSet<String>,
}

fn new_card_id() -> CardId {
    Uuid::new_v4().to_string()
}

fn default_interval() -> i64 {
    DEFAULT_INTERVAL
}

// Anki hands out numeric card ids; hand-made decks use strings.
fn card_id_from_any<'de, D>(deserializer: D) -> Result<CardId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

// Stored decks may carry explicit nulls; those read as empty content.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self::with_id(new_card_id(), front, back)
    }

    pub fn with_id(id: impl Into<CardId>, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            front: front.into(),
            back: back.into(),
            interval: DEFAULT_INTERVAL,
            repetitions: 0,
            due_at: Utc::now(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags
            .into_iter()
            .map(|t| Into::<String>::into(t).trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.due_at
    }
}

/// A named, ordered collection of cards. Card order is review order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "DeckRecord", from = "DeckRecord")]
pub struct Deck {
    pub name: String,
    pub description: String,
    pub cards: Vec<Card>,
    pub imported_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub study_count: u32,
}

impl Deck {
    pub fn new(name: impl Into<String>, description: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            cards: with_unique_ids(cards),
            imported_at: Utc::now(),
            last_accessed: None,
            study_count: 0,
        }
    }

    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn due_count(&self, now: DateTime<Utc>) -> usize {
        self.cards.iter().filter(|c| c.is_due(now)).count()
    }

    pub fn studied_count(&self) -> usize {
        self.cards.iter().filter(|c| c.repetitions > 0).count()
    }

    /// Marks the deck as opened for a study session.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_accessed = Some(now);
        self.study_count += 1;
    }
}

fn with_unique_ids(mut cards: Vec<Card>) -> Vec<Card> {
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards.iter_mut() {
        if card.id.trim().is_empty() || !seen.insert(card.id.clone()) {
            card.id = new_card_id();
            seen.insert(card.id.clone());
        }
    }
    cards
}

// Serialized shape of a deck. `totalCards` is written for readers of the
// stored file and recomputed from `cards` on load.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default)]
    cards: Vec<Card>,
    #[serde(default)]
    total_cards: usize,
    #[serde(default = "Utc::now")]
    imported_at: DateTime<Utc>,
    #[serde(default)]
    last_accessed: Option<DateTime<Utc>>,
    #[serde(default)]
    study_count: u32,
}

impl From<Deck> for DeckRecord {
    fn from(d: Deck) -> Self {
        Self {
            total_cards: d.cards.len(),
            name: d.name,
            description: d.description,
            cards: d.cards,
            imported_at: d.imported_at,
            last_accessed: d.last_accessed,
            study_count: d.study_count,
        }
    }
}

impl From<DeckRecord> for Deck {
    fn from(r: DeckRecord) -> Self {
        Self {
            name: r.name,
            description: r.description,
            cards: with_unique_ids(r.cards),
            imported_at: r.imported_at,
            last_accessed: r.last_accessed,
            study_count: r.study_count,
        }
    }
}
