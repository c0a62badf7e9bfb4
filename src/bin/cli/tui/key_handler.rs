use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::app_state::{Mode, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash = None;

    match state.mode.clone() {
        Mode::Tree => handle_tree_key(state, key),
        Mode::AddCard => handle_add_key(state, key),
        Mode::Review => handle_review_key(state, key),
        Mode::ConfirmDelete { id } => handle_confirm_key(state, key, id),
    }
}

fn handle_tree_key(state: &mut TuiState, key: KeyEvent) {
    // Handle pending 'g' key
    if state.pending_key == Some('g') {
        state.pending_key = None;
        if key.code == KeyCode::Char('g') {
            state.tree_go_top();
            return;
        }
    }

    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Char('j') | KeyCode::Down => state.tree_move_down(),
        KeyCode::Char('k') | KeyCode::Up => state.tree_move_up(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => {
            state.activate_selected();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            state.collapse_or_parent();
        }
        KeyCode::Char('g') => {
            state.pending_key = Some('g');
        }
        KeyCode::Char('G') => state.tree_go_bottom(),
        KeyCode::Char('a') => state.begin_add(),
        KeyCode::Char('r') => state.begin_review(),
        KeyCode::Char('d') | KeyCode::Delete => state.begin_delete(),
        KeyCode::Char('?') => {
            state.show_help = !state.show_help;
        }
        _ => {}
    }
}

fn handle_add_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Tree;
        }
        KeyCode::Enter => state.submit_add(),
        KeyCode::Tab | KeyCode::Down => state.add_form.next_field(),
        KeyCode::BackTab | KeyCode::Up => state.add_form.prev_field(),
        KeyCode::Backspace => {
            state.add_form.focused_mut().pop();
        }
        KeyCode::Char(c) => {
            state.add_form.focused_mut().push(c);
        }
        _ => {}
    }
}

fn handle_review_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.cancel_review(),
        KeyCode::Enter => state.submit_review(),
        KeyCode::Backspace => {
            if let Some(prompt) = state.review.as_mut() {
                prompt.input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(prompt) = state.review.as_mut() {
                prompt.input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_confirm_key(state: &mut TuiState, key: KeyEvent, id: i64) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => state.confirm_delete(id),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Tree;
        }
        _ => {}
    }
}

pub fn handle_mouse(state: &mut TuiState, mouse: MouseEvent) {
    if state.mode != Mode::Tree || state.show_help {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let col = mouse.column;
            let row = mouse.row;

            if let Some(ref area) = state.tree_area {
                // Border rows and columns are not items
                if col > area.x && col + 1 < area.x + area.width
                    && row > area.y && row + 1 < area.y + area.height
                {
                    let inner_row = row - area.y - 1;
                    let clicked_idx = state.tree_scroll + inner_row as usize;

                    if clicked_idx < state.tree_items.len() {
                        if state.tree_selected == clicked_idx {
                            // Click same item again: open/toggle
                            state.activate_selected();
                        } else {
                            state.tree_selected = clicked_idx;
                            state.show_selected_card();
                        }
                    }
                }
            }
        }
        MouseEventKind::ScrollDown => state.tree_move_down(),
        MouseEventKind::ScrollUp => state.tree_move_up(),
        _ => {}
    }
}
