use lingualay_core::{FontSize, Theme};
use ratatui::style::{Color, Modifier, Style, Stylize};

pub fn title_style() -> Style { Style::default().fg(Color::Cyan).bold() }
pub fn correct_style() -> Style { Style::default().fg(Color::Green) }
pub fn incorrect_style() -> Style { Style::default().fg(Color::Red) }
pub fn notice_style() -> Style { Style::default().fg(Color::Yellow).bold() }
pub fn footer_style() -> Style { Style::default().fg(Color::Gray) }

pub fn base_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default(),
        Theme::Dark => Style::default().bg(Color::Black).fg(Color::White),
    }
}

/// Terminals have one font size; the setting maps onto text weight.
pub fn card_style(size: FontSize) -> Style {
    match size {
        FontSize::Small => Style::default().add_modifier(Modifier::DIM),
        FontSize::Medium => Style::default(),
        FontSize::Large => Style::default().add_modifier(Modifier::BOLD),
    }
}
