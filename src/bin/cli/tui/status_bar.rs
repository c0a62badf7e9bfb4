use ratatui::prelude::*;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::Paragraph;

use super::app_state::{Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let score = format!(" {} ", state.app.session.scoreboard());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(score.len() as u16)])
        .split(area);

    let score_widget = Paragraph::new(score)
        .style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD));
    f.render_widget(score_widget, chunks[1]);

    // Show flash message if present
    if let Some(ref flash) = state.flash {
        let style = if flash.is_error {
            Style::default().bg(Color::Red).fg(Color::White)
        } else {
            Style::default().bg(Color::Green).fg(Color::Black)
        };
        f.render_widget(Paragraph::new(format!(" {}", flash.text)).style(style), chunks[0]);
        return;
    }

    let hints = match state.mode {
        Mode::Tree => " a: add  r: review  d: delete  j/k: navigate  Enter: open  ?: help  q: quit ",
        Mode::AddCard => " Tab: next field  Enter: save  Esc: cancel ",
        Mode::Review => " Type your answer  Enter: submit  Esc: cancel ",
        Mode::ConfirmDelete { .. } => " y: delete  n: keep ",
    };

    let status = Paragraph::new(hints)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, chunks[0]);
}
