use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::{Detail, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let title = match &state.detail {
        Detail::Empty => " Flashcard ".to_string(),
        Detail::Card { subject, card } => format!(" {} #{} ", subject, card.id),
        Detail::Graded { subject, .. } => format!(" Review: {} ", subject),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let heading = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(Color::DarkGray);

    let text: Vec<Line> = match &state.detail {
        Detail::Empty => {
            let mut lines = vec![Line::from("")];
            if state.tree_items.is_empty() {
                lines.push(Line::from(Span::styled("  No flashcards yet. Press a to add one.", hint)));
            } else {
                lines.push(Line::from(Span::styled(
                    "  Select a card from the tree to see its answer.",
                    hint,
                )));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "  Press r on a subject to review a random card.",
                    hint,
                )));
            }
            lines
        }
        Detail::Card { card, .. } => vec![
            Line::from(Span::styled("Question", heading)),
            Line::from(format!("  {}", card.question)),
            Line::from(""),
            Line::from(Span::styled("Answer", heading)),
            Line::from(format!("  {}", card.answer)),
        ],
        Detail::Graded { question, submitted, outcome, .. } => {
            let verdict = if outcome.correct {
                Span::styled("Correct!", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                Span::styled("Incorrect", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            };
            vec![
                Line::from(Span::styled("Question", heading)),
                Line::from(format!("  {}", question)),
                Line::from(""),
                Line::from(Span::styled("Your answer", heading)),
                Line::from(format!("  {}", submitted)),
                Line::from(""),
                Line::from(verdict),
                Line::from(format!("  Expected: {}", outcome.expected)),
                Line::from(""),
                Line::from(Span::styled(format!("  {}", outcome.scoreboard), hint)),
            ]
        }
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
