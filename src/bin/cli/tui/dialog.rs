use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::app_state::{TuiState, ADD_FIELDS};

/// Center a `width` x `height` box inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn dialog_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Add-card form: one line per field, cursor in the focused one
pub fn draw_add(f: &mut Frame, area: Rect, state: &TuiState) {
    let popup = centered(area, 60, ADD_FIELDS.len() as u16 + 2);
    f.render_widget(Clear, popup);

    let form = &state.add_form;
    let lines: Vec<Line> = ADD_FIELDS.iter().zip(form.fields.iter()).enumerate().map(|(i, (label, value))| {
        let label_style = if i == form.focus {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(vec![
            Span::styled(format!("{:>9}: ", label), label_style),
            Span::raw(value.clone()),
        ])
    }).collect();

    let paragraph = Paragraph::new(lines).block(dialog_block(" Add Flashcard ", Color::Yellow));
    f.render_widget(paragraph, popup);

    let label_width = 11u16;
    let cursor_x = popup.x + 1 + label_width + form.fields[form.focus].chars().count() as u16;
    let cursor_y = popup.y + 1 + form.focus as u16;
    f.set_cursor_position(Position::new(cursor_x, cursor_y));
}

/// Review prompt: the question and the answer typed so far
pub fn draw_review(f: &mut Frame, area: Rect, state: &TuiState) {
    let Some(ref prompt) = state.review else {
        return;
    };

    let popup = centered(area, 60, 7);
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from(vec![
            Span::styled("   Question: ", Style::default().fg(Color::Gray)),
            Span::raw(prompt.card.question.clone()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Your answer: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(prompt.input.clone()),
        ]),
    ];

    let title = format!(" Review: {} ", prompt.subject);
    let paragraph = Paragraph::new(lines)
        .block(dialog_block(&title, Color::Cyan))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup);

    let question_rows = (prompt.card.question.chars().count() as u16 + 13)
        / popup.width.saturating_sub(2).max(1)
        + 1;
    let cursor_x = popup.x + 1 + 13 + prompt.input.chars().count() as u16;
    let cursor_y = popup.y + 1 + question_rows + 1;
    f.set_cursor_position(Position::new(cursor_x, cursor_y));
}

/// Delete confirmation showing the card's question
pub fn draw_confirm_delete(f: &mut Frame, area: Rect, state: &TuiState, id: i64) {
    let popup = centered(area, 50, 5);
    f.render_widget(Clear, popup);

    let question = state
        .app
        .session
        .find_card(id)
        .map(|(_, card)| card.question.clone())
        .unwrap_or_default();

    let lines = vec![
        Line::from(format!("Delete \"{}\"?", question)),
        Line::from(""),
        Line::from(Span::styled("y: delete   n: keep", Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(lines)
        .block(dialog_block(" Delete Flashcard ", Color::Red))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup);
}

/// Key reference overlay
pub fn draw_help(f: &mut Frame, area: Rect, state: &TuiState) {
    let lines = vec![
        Line::from("j/k, Up/Down   move"),
        Line::from("Enter, l       open card / toggle subject"),
        Line::from("h              collapse / go to subject"),
        Line::from("gg / G         top / bottom"),
        Line::from("a              add flashcard"),
        Line::from("r              review selected subject"),
        Line::from("d, Delete      delete selected card"),
        Line::from("?              toggle this help"),
        Line::from("q              quit"),
        Line::from(""),
        Line::from(Span::styled(
            format!("Database: {}", state.app.db_path.display()),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = centered(area, 56, lines.len() as u16 + 2);
    f.render_widget(Clear, popup);
    let paragraph = Paragraph::new(lines)
        .block(dialog_block(" Help ", Color::Green))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered(area, 60, 10);
        assert_eq!(popup, Rect::new(20, 15, 60, 10));

        let small = Rect::new(5, 5, 30, 4);
        let popup = centered(small, 60, 10);
        assert_eq!(popup, small);
    }
}
