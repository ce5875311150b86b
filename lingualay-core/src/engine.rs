//! Review state machine: `Idle -> Presenting -> AnswerRevealed -> ... -> Completed`.

use crate::{apply_difficulty, Deck, Difficulty, Session, SessionSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    Presenting,
    AnswerRevealed,
    Completed,
}

/// What the presentation layer needs to render the current step.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub state: EngineState,
    pub front: String,
    /// Hidden until the answer is revealed.
    pub back: Option<String>,
    pub cursor: usize,
    pub total: usize,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ReviewEngine {
    state: EngineState,
    deck: Option<Deck>,
    session: Option<Session>,
    summary: Option<SessionSummary>,
}

impl Default for ReviewEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewEngine {
    pub fn new() -> Self {
        Self {
            state: EngineState::Idle,
            deck: None,
            session: None,
            summary: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Starts a new session over `deck`, discarding any previous one.
    /// An empty deck completes immediately with zero counts.
    pub fn load(&mut self, deck: Deck, now: DateTime<Utc>) -> EngineState {
        let empty = deck.is_empty();
        self.deck = Some(deck);
        self.session = Some(Session::new(now));
        if empty {
            self.summary = Some(SessionSummary::empty(now));
            self.state = EngineState::Completed;
        } else {
            self.summary = None;
            self.state = EngineState::Presenting;
        }
        self.state
    }

    /// Shows the back of the current card. Ignored outside `Presenting`.
    pub fn reveal(&mut self) -> bool {
        if self.state != EngineState::Presenting {
            tracing::debug!(state = ?self.state, "reveal ignored");
            return false;
        }
        self.state = EngineState::AnswerRevealed;
        true
    }

    /// Rates the current card and advances. Ignored outside `AnswerRevealed`.
    pub fn rate(&mut self, difficulty: Difficulty, now: DateTime<Utc>) -> bool {
        if self.state != EngineState::AnswerRevealed {
            tracing::debug!(state = ?self.state, %difficulty, "rate ignored");
            return false;
        }
        let (Some(deck), Some(session)) = (self.deck.as_mut(), self.session.as_mut()) else {
            return false;
        };
        let Some(card) = deck.cards.get_mut(session.cursor()) else {
            return false;
        };

        let outcome = apply_difficulty(card, difficulty, now);
        tracing::debug!(
            card = %card.id,
            %difficulty,
            interval = outcome.interval,
            due_at = %outcome.due_at,
            "card rated"
        );
        session.record(difficulty);

        if session.cursor() == deck.cards.len() {
            let summary = session.summarize(now);
            tracing::info!(
                deck = %deck.name,
                studied = summary.cards_studied,
                correct = summary.correct_count,
                incorrect = summary.incorrect_count,
                "session completed"
            );
            self.summary = Some(summary);
            self.state = EngineState::Completed;
        } else {
            self.state = EngineState::Presenting;
        }
        true
    }

    /// Ends the session early and hands the deck back, ratings so far included.
    pub fn close(&mut self) -> Option<Deck> {
        self.state = EngineState::Idle;
        self.session = None;
        self.summary = None;
        self.deck.take()
    }

    pub fn view(&self) -> Option<CardView> {
        let deck = self.deck.as_ref()?;
        let session = self.session.as_ref()?;
        let (front, back) = match self.state {
            EngineState::Presenting | EngineState::AnswerRevealed => {
                let card = deck.cards.get(session.cursor())?;
                let back = (self.state == EngineState::AnswerRevealed).then(|| card.back.clone());
                (card.front.clone(), back)
            }
            EngineState::Completed => (String::new(), None),
            EngineState::Idle => return None,
        };
        Some(CardView {
            state: self.state,
            front,
            back,
            cursor: session.cursor(),
            total: deck.cards.len(),
            correct_count: session.correct_count(),
            incorrect_count: session.incorrect_count(),
            started_at: session.started_at(),
        })
    }
}
