use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use super::app_state::{Mode, TreeItemKind, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &mut TuiState) {
    let is_active = state.mode == Mode::Tree;

    let block = Block::default()
        .title(" Subjects ")
        .borders(Borders::ALL)
        .border_style(if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let items: Vec<ListItem> = state.tree_items.iter().map(|item| {
        let indent = "  ".repeat(item.depth);

        let (prefix, style) = match &item.kind {
            TreeItemKind::Subject { .. } => {
                let arrow = if item.expanded || !item.has_children { "\u{25be} " } else { "\u{25b8} " };
                (arrow.to_string(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            }
            TreeItemKind::Card { .. } => {
                ("\u{2022} ".to_string(), Style::default().fg(Color::White))
            }
        };

        let text = format!("{}{}{}", indent, prefix, item.label);
        ListItem::new(text).style(style)
    }).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(if is_active { Color::DarkGray } else { Color::Black })
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_offset(state.tree_scroll);
    if !state.tree_items.is_empty() {
        list_state.select(Some(state.tree_selected));
    }

    f.render_stateful_widget(list, area, &mut list_state);
    state.tree_scroll = list_state.offset();
}
