use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use lingualay_core::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Reveal,
    Rate(Difficulty),
    None,
}

pub fn map_event(ev: Event) -> Action {
    if let Event::Key(KeyEvent { code, kind, .. }) = ev {
        if kind == KeyEventKind::Release {
            return Action::None;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char(' ') | KeyCode::Enter => Action::Reveal,
            KeyCode::Char('1') => Action::Rate(Difficulty::Again),
            KeyCode::Char('2') => Action::Rate(Difficulty::Hard),
            KeyCode::Char('3') => Action::Rate(Difficulty::Good),
            KeyCode::Char('4') => Action::Rate(Difficulty::Easy),
            _ => Action::None,
        }
    } else {
        Action::None
    }
}
