use crate::tui::{inputs::{map_event, Action}, views::{self, Screen}};
use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use chrono::Utc;
use lingualay_core::{
    spawn_session, CardView, Command, Event, SessionSummary, Settings, Store,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, error::{TryRecvError, TrySendError}};

pub struct TuiApp {
    pub store: Arc<dyn Store>,
    pub rt: Arc<Runtime>,
    settings: Settings,
    deck_name: String,
    view: Option<CardView>,
    summary: Option<SessionSummary>,
    notice: Option<String>,
    finished: bool,
}

impl TuiApp {
    pub fn new(store: Arc<dyn Store>, rt: Arc<Runtime>) -> Self {
        Self {
            store,
            rt,
            settings: Settings::default(),
            deck_name: String::from("Lingualay"),
            view: None,
            summary: None,
            notice: None,
            finished: false,
        }
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.settings = self.rt.block_on(self.store.load_settings()).unwrap_or_default();
        if let Ok(Some(deck)) = self.rt.block_on(self.store.load_deck()) {
            self.deck_name = deck.name;
        }

        let (tx, rx, handle) = {
            let _guard = self.rt.enter();
            spawn_session(self.store.clone())
        };

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal, &tx, rx);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        // Closing the command channel makes an unfinished session flush and stop.
        drop(tx);
        self.rt.block_on(handle)?;
        res
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::Presented(v) | Event::Revealed(v) => {
                self.notice = None;
                self.view = Some(v);
            }
            Event::Completed(s) => {
                if let Some(v) = self.view.as_mut() {
                    v.cursor = v.total;
                    v.back = None;
                    v.correct_count = s.correct_count;
                    v.incorrect_count = s.incorrect_count;
                }
                self.summary = Some(s);
                self.finished = true;
            }
            Event::Notice(msg) => self.notice = Some(msg),
            Event::Ignored => {}
            Event::Closed => self.finished = true,
        }
    }

    fn send(&mut self, tx: &mpsc::Sender<Command>, cmd: Command) {
        match tx.try_send(cmd) {
            Ok(()) => {}
            Err(TrySendError::Full(cmd)) => {
                tracing::debug!(?cmd, "command channel full, key dropped");
                self.notice = Some("Busy, press the key again.".to_string());
            }
            Err(TrySendError::Closed(_)) => self.finished = true,
        }
    }

    fn mainloop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        tx: &mpsc::Sender<Command>,
        mut rx: mpsc::Receiver<Event>,
    ) -> anyhow::Result<()> {
        loop {
            loop {
                match rx.try_recv() {
                    Ok(ev) => self.apply(ev),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.finished = true;
                        break;
                    }
                }
            }

            let elapsed = self.settings.show_timer.then(|| match (&self.summary, &self.view) {
                (Some(s), _) => s.elapsed_seconds,
                (None, Some(v)) => (Utc::now() - v.started_at).num_seconds().max(0) as u64,
                (None, None) => 0,
            });
            terminal.draw(|f| {
                let area = f.size();
                let screen = Screen {
                    deck_name: &self.deck_name,
                    view: self.view.as_ref(),
                    summary: self.summary.as_ref(),
                    notice: self.notice.as_deref(),
                    elapsed,
                    limit_minutes: self.settings.max_review_time_minutes,
                    theme: self.settings.theme,
                    font_size: self.settings.card_font_size,
                };
                views::draw_ui(f, area, &screen);
            })?;

            if event::poll(std::time::Duration::from_millis(100))? {
                let action = map_event(event::read()?);
                let cmd = match action {
                    Action::Quit => {
                        if !self.finished {
                            let _ = tx.try_send(Command::Close);
                        }
                        break;
                    }
                    Action::Reveal => Command::Reveal,
                    Action::Rate(d) => Command::Rate(d),
                    Action::None => continue,
                };
                if !self.finished {
                    self.send(tx, cmd);
                }
            }
        }
        Ok(())
    }
}
