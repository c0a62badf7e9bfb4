use ratatui::prelude::*;
use ratatui::layout::{Constraint, Direction, Layout};

use super::app_state::{Mode, TuiState};
use super::{content_widget, dialog, status_bar, tree_widget};

pub fn draw(f: &mut Frame, state: &mut TuiState) {
    let size = f.area();

    // Main layout: content area + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    let main_area = outer[0];
    let status_area = outer[1];

    // Horizontal split: tree (40%) | card (60%)
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ])
        .split(main_area);

    let tree_area = panels[0];
    let detail_area = panels[1];

    // Save areas for mouse hit-testing
    state.tree_area = Some(tree_area);

    tree_widget::draw(f, tree_area, state);
    content_widget::draw(f, detail_area, state);
    status_bar::draw(f, status_area, state);

    match state.mode.clone() {
        Mode::AddCard => dialog::draw_add(f, main_area, state),
        Mode::Review => dialog::draw_review(f, main_area, state),
        Mode::ConfirmDelete { id } => dialog::draw_confirm_delete(f, main_area, state, id),
        Mode::Tree => {
            if state.show_help {
                dialog::draw_help(f, main_area, state);
            }
        }
    }
}
