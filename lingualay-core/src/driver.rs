//! Runs one study session as a task, talking to the presentation layer over
//! typed channels and writing progress through a [`Store`].

use crate::{cards_due, CardView, Difficulty, EngineState, ReviewEngine, SessionSummary, Store};
use chrono::{Local, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;

pub const NO_DECK_NOTICE: &str = "No deck loaded. Please import a deck first.";

/// Input from the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal,
    Rate(Difficulty),
    Close,
}

/// Output to the presentation layer, one per handled command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Presented(CardView),
    Revealed(CardView),
    /// The command was not valid in the current state.
    Ignored,
    Completed(SessionSummary),
    /// A persistence failure, or the reason a session could not start.
    Notice(String),
    Closed,
}

/// Spawns [`run_session`] and returns the channel ends the presentation
/// layer needs.
pub fn spawn_session(
    store: Arc<dyn Store>,
) -> (
    mpsc::Sender<Command>,
    mpsc::Receiver<Event>,
    tokio::task::JoinHandle<Option<SessionSummary>>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ev_tx, ev_rx) = mpsc::channel(16);
    let handle = tokio::spawn(run_session(store, cmd_rx, ev_tx));
    (cmd_tx, ev_rx, handle)
}

/// Drives a session over the store's current deck until it completes or is
/// closed. Returns the summary of a completed session.
///
/// A dropped command sender is treated as `Close`.
pub async fn run_session(
    store: Arc<dyn Store>,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::Sender<Event>,
) -> Option<SessionSummary> {
    let mut driver = Driver {
        engine: ReviewEngine::new(),
        store,
        events,
    };

    let mut deck = match driver.store.load_deck().await {
        Ok(Some(deck)) => deck,
        Ok(None) => {
            driver.emit(Event::Notice(NO_DECK_NOTICE.to_string())).await;
            return None;
        }
        Err(e) => {
            tracing::warn!(error = %e, "loading deck failed");
            driver.emit(Event::Notice(format!("Error loading deck: {e}"))).await;
            return None;
        }
    };

    let now = Utc::now();
    deck.touch(now);
    if let Err(e) = driver.store.save_deck(&deck).await {
        driver.notice("saving deck", e).await;
    }

    if driver.engine.load(deck, now) == EngineState::Completed {
        return driver.complete().await;
    }
    driver.present().await;

    loop {
        let cmd = commands.recv().await.unwrap_or(Command::Close);
        match cmd {
            Command::Reveal => {
                if driver.engine.reveal() {
                    let view = driver.view();
                    driver.emit(Event::Revealed(view)).await;
                } else {
                    driver.emit(Event::Ignored).await;
                }
            }
            Command::Rate(difficulty) => {
                if !driver.engine.rate(difficulty, Utc::now()) {
                    driver.emit(Event::Ignored).await;
                    continue;
                }
                if driver.engine.state() == EngineState::Completed {
                    return driver.complete().await;
                }
                driver.flush().await;
                driver.present().await;
            }
            Command::Close => {
                driver.flush().await;
                driver.engine.close();
                driver.emit(Event::Closed).await;
                return None;
            }
        }
    }
}

struct Driver {
    engine: ReviewEngine,
    store: Arc<dyn Store>,
    events: mpsc::Sender<Event>,
}

impl Driver {
    async fn emit(&self, event: Event) {
        // A gone receiver also closes the command side, which ends the loop.
        let _ = self.events.send(event).await;
    }

    async fn notice(&self, what: &str, err: crate::CoreError) {
        tracing::warn!(error = %err, "{what} failed");
        self.emit(Event::Notice(format!("Error {what}: {err}"))).await;
    }

    fn view(&self) -> CardView {
        self.engine.view().unwrap_or_else(|| CardView {
            state: self.engine.state(),
            front: String::new(),
            back: None,
            cursor: 0,
            total: 0,
            correct_count: 0,
            incorrect_count: 0,
            started_at: Utc::now(),
        })
    }

    async fn present(&self) {
        let view = self.view();
        self.emit(Event::Presented(view)).await;
    }

    async fn flush(&self) {
        let Some(deck) = self.engine.deck() else {
            return;
        };
        if let Err(e) = self.store.save_deck(deck).await {
            self.notice("saving deck", e).await;
        }
    }

    async fn complete(&self) -> Option<SessionSummary> {
        self.flush().await;
        let summary = self.engine.summary().cloned()?;

        match self.store.load_stats().await {
            Ok(mut stats) => {
                stats.record_session(&summary, Local::now().date_naive());
                if let (Some(deck), Ok(settings)) = (self.engine.deck(), self.store.load_settings().await) {
                    stats.cards_due = cards_due(deck, &settings, Utc::now());
                }
                if let Err(e) = self.store.save_stats(&stats).await {
                    self.notice("saving progress", e).await;
                }
            }
            Err(e) => self.notice("loading stats", e).await,
        }

        self.emit(Event::Completed(summary.clone())).await;
        Some(summary)
    }
}
