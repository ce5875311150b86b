use crate::tui::theme::*;
use lingualay_core::{CardView, FontSize, SessionSummary, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Everything one frame shows.
pub struct Screen<'a> {
    pub deck_name: &'a str,
    pub view: Option<&'a CardView>,
    pub summary: Option<&'a SessionSummary>,
    pub notice: Option<&'a str>,
    /// Seconds since the session started; `None` hides the timer.
    pub elapsed: Option<u64>,
    pub limit_minutes: u32,
    pub theme: Theme,
    pub font_size: FontSize,
}

/// `m:ss / limit`, and whether the review time limit has been passed.
pub fn timer_label(secs: u64, limit_minutes: u32) -> (String, bool) {
    let label = format!("{}:{:02} / {}:00", secs / 60, secs % 60, limit_minutes);
    (label, secs >= u64::from(limit_minutes) * 60)
}

pub fn draw_ui(f: &mut Frame, area: Rect, screen: &Screen) {
    f.render_widget(Block::default().style(base_style(screen.theme)), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);
    draw_session(f, chunks[0], screen);
    draw_card(f, chunks[1], screen);

    let foot = Paragraph::new(Line::from(vec![
        Span::raw(" space show answer  "),
        Span::raw(" 1 again  2 hard  3 good  4 easy  "),
        Span::raw(" q quit "),
    ]))
    .style(footer_style());
    f.render_widget(foot, rows[1]);
}

fn draw_session(f: &mut Frame, area: Rect, screen: &Screen) {
    let block = Block::default().title(screen.deck_name.to_string()).borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let (cursor, total, correct, incorrect) = match screen.view {
        Some(v) => (v.cursor, v.total, v.correct_count, v.incorrect_count),
        None => (0, 0, 0, 0),
    };
    let shown = if total == 0 { 0 } else { (cursor + 1).min(total) };
    let ratio = if total == 0 { 0.0 } else { shown as f64 / total as f64 };
    let gauge = Gauge::default()
        .gauge_style(title_style())
        .ratio(ratio)
        .label(format!("{shown} / {total}"));
    f.render_widget(gauge, parts[0]);

    let mut lines = vec![
        Line::from(vec![Span::raw("correct   "), Span::styled(correct.to_string(), correct_style())]),
        Line::from(vec![Span::raw("incorrect "), Span::styled(incorrect.to_string(), incorrect_style())]),
    ];
    if let Some(secs) = screen.elapsed {
        let (label, over) = timer_label(secs, screen.limit_minutes);
        let style = if over { notice_style() } else { footer_style() };
        lines.push(Line::from(vec![Span::raw("time      "), Span::styled(label, style)]));
    }
    f.render_widget(Paragraph::new(lines), parts[2]);
}

fn draw_card(f: &mut Frame, area: Rect, screen: &Screen) {
    let block = Block::default().title("Study").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut text = Vec::new();
    if let Some(msg) = screen.notice {
        text.push(Line::from(Span::styled(msg.to_string(), notice_style())));
        text.push(Line::from(""));
    }

    if let Some(s) = screen.summary {
        text.push(Line::from(Span::styled("Session complete!", title_style())));
        text.push(Line::from(format!("Cards studied: {}", s.cards_studied)));
        text.push(Line::from(format!("Correct: {}", s.correct_count)));
        text.push(Line::from(format!("Time: {}", s.elapsed_display())));
        text.push(Line::from(""));
        text.push(Line::from("Press q to close."));
    } else if let Some(v) = screen.view {
        let body = card_style(screen.font_size);
        text.push(Line::from(vec![Span::styled("Q: ", title_style()), Span::styled(v.front.clone(), body)]));
        if let Some(back) = &v.back {
            text.push(Line::from(""));
            text.push(Line::from(vec![Span::styled("A: ", title_style()), Span::styled(back.clone(), body)]));
        }
    } else if screen.notice.is_none() {
        text.push(Line::from("Loading deck..."));
    }

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
}

#[cfg(test)]
mod tests {
    use super::timer_label;

    #[test]
    fn timer_flags_overrun() {
        assert_eq!(timer_label(65, 30), ("1:05 / 30:00".to_string(), false));
        assert_eq!(timer_label(1800, 30), ("30:00 / 30:00".to_string(), true));
    }
}
