use std::collections::HashSet;

use ratatui::prelude::Rect;

use crate::app::App;
use flashdeck_lib::{Flashcard, ReviewOutcome, SessionError};

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Tree,
    AddCard,
    Review,
    ConfirmDelete { id: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeItemKind {
    Subject { name: String },
    Card { id: i64, subject: String },
}

#[derive(Debug, Clone)]
pub struct TreeItem {
    pub label: String,
    pub kind: TreeItemKind,
    pub depth: usize,
    pub expanded: bool,
    pub has_children: bool,
}

/// What the right-hand panel shows
#[derive(Debug, Clone)]
pub enum Detail {
    Empty,
    Card { subject: String, card: Flashcard },
    Graded {
        subject: String,
        question: String,
        submitted: String,
        outcome: ReviewOutcome,
    },
}

pub const ADD_FIELDS: [&str; 3] = ["Subject", "Question", "Answer"];

/// Input for the add-card form
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub fields: [String; 3],
    pub focus: usize,
}

impl AddForm {
    pub fn focused_mut(&mut self) -> &mut String {
        &mut self.fields[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }
}

/// The card being reviewed and the answer typed so far
#[derive(Debug, Clone)]
pub struct ReviewPrompt {
    pub subject: String,
    pub card: Flashcard,
    pub input: String,
}

#[derive(Debug, Clone)]
pub struct Flash {
    pub text: String,
    pub is_error: bool,
}

pub struct TuiState {
    pub app: App,
    pub mode: Mode,

    // Tree state
    pub tree_items: Vec<TreeItem>,
    pub tree_selected: usize,
    pub tree_scroll: usize,
    collapsed: HashSet<String>,

    pub detail: Detail,

    // Dialog state
    pub add_form: AddForm,
    pub review: Option<ReviewPrompt>,

    // Key state for multi-char sequences
    pub pending_key: Option<char>,

    // Tree panel area for mouse hit-testing (updated each draw)
    pub tree_area: Option<Rect>,

    pub flash: Option<Flash>,
    pub show_help: bool,
    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App) -> Self {
        let mut state = Self {
            app,
            mode: Mode::Tree,
            tree_items: Vec::new(),
            tree_selected: 0,
            tree_scroll: 0,
            collapsed: HashSet::new(),
            detail: Detail::Empty,
            add_form: AddForm::default(),
            review: None,
            pending_key: None,
            tree_area: None,
            flash: None,
            show_help: false,
            quit: false,
        };

        state.rebuild_tree();
        state
    }

    /// Rebuild the tree from the mirror, keeping collapse state and the
    /// selected item where possible.
    pub fn rebuild_tree(&mut self) {
        let selected = self.selected_item().map(|item| item.kind.clone());

        self.tree_items.clear();
        for (subject, cards) in self.app.session.mirror().iter() {
            let expanded = !self.collapsed.contains(subject);
            self.tree_items.push(TreeItem {
                label: subject.to_string(),
                kind: TreeItemKind::Subject { name: subject.to_string() },
                depth: 0,
                expanded,
                has_children: !cards.is_empty(),
            });

            if expanded {
                for card in cards {
                    self.tree_items.push(card_item(subject, card));
                }
            }
        }

        self.tree_selected = selected
            .and_then(|kind| self.tree_items.iter().position(|item| item.kind == kind))
            .unwrap_or_else(|| self.tree_selected.min(self.tree_items.len().saturating_sub(1)));
    }

    pub fn selected_item(&self) -> Option<&TreeItem> {
        self.tree_items.get(self.tree_selected)
    }

    /// Subject of the selected row, whether it is a subject or a card
    pub fn selected_subject(&self) -> Option<String> {
        self.selected_item().map(|item| match &item.kind {
            TreeItemKind::Subject { name } => name.clone(),
            TreeItemKind::Card { subject, .. } => subject.clone(),
        })
    }

    pub fn selected_card_id(&self) -> Option<i64> {
        match self.selected_item()?.kind {
            TreeItemKind::Card { id, .. } => Some(id),
            TreeItemKind::Subject { .. } => None,
        }
    }

    pub fn toggle_expand(&mut self) {
        let Some((name, expanded)) = self.selected_item().and_then(|item| match &item.kind {
            TreeItemKind::Subject { name } => Some((name.clone(), item.expanded)),
            TreeItemKind::Card { .. } => None,
        }) else {
            return;
        };

        if expanded {
            self.collapsed.insert(name);
        } else {
            self.collapsed.remove(&name);
        }
        self.rebuild_tree();
    }

    /// Enter on a subject toggles it; on a card it shows the card.
    pub fn activate_selected(&mut self) {
        match self.selected_item().map(|item| item.kind.clone()) {
            Some(TreeItemKind::Subject { .. }) => self.toggle_expand(),
            Some(TreeItemKind::Card { .. }) => self.show_selected_card(),
            None => {}
        }
    }

    pub fn show_selected_card(&mut self) {
        let Some(id) = self.selected_card_id() else {
            return;
        };
        if let Some((subject, card)) = self.app.session.find_card(id) {
            self.detail = Detail::Card {
                subject: subject.to_string(),
                card: card.clone(),
            };
        }
    }

    pub fn collapse_or_parent(&mut self) {
        let Some((expanded, depth)) = self.selected_item().map(|item| (item.expanded, item.depth)) else {
            return;
        };

        if expanded {
            self.toggle_expand();
        } else if depth > 0 {
            if let Some(parent) = (0..self.tree_selected)
                .rev()
                .find(|&i| self.tree_items[i].depth == depth - 1)
            {
                self.tree_selected = parent;
            }
        }
    }

    pub fn tree_move_down(&mut self) {
        if !self.tree_items.is_empty() && self.tree_selected < self.tree_items.len() - 1 {
            self.tree_selected += 1;
            self.show_selected_card();
        }
    }

    pub fn tree_move_up(&mut self) {
        if self.tree_selected > 0 {
            self.tree_selected -= 1;
            self.show_selected_card();
        }
    }

    pub fn tree_go_top(&mut self) {
        self.tree_selected = 0;
        self.tree_scroll = 0;
        self.show_selected_card();
    }

    pub fn tree_go_bottom(&mut self) {
        if !self.tree_items.is_empty() {
            self.tree_selected = self.tree_items.len() - 1;
            self.show_selected_card();
        }
    }

    // ==================== Add ====================

    pub fn begin_add(&mut self) {
        self.add_form = AddForm::default();
        if let Some(subject) = self.selected_subject() {
            self.add_form.fields[0] = subject;
            self.add_form.focus = 1;
        }
        self.mode = Mode::AddCard;
    }

    /// Save the add form. On a validation error the form stays open.
    pub fn submit_add(&mut self) {
        let [subject, question, answer] = &self.add_form.fields;
        match self.app.session.add_flashcard(subject, question, answer) {
            Ok(card) => {
                let subject = subject.trim().to_string();
                self.collapsed.remove(&subject);
                self.rebuild_tree();
                let kind = TreeItemKind::Card { id: card.id, subject: subject.clone() };
                if let Some(pos) = self.tree_items.iter().position(|item| item.kind == kind) {
                    self.tree_selected = pos;
                }
                self.detail = Detail::Card { subject: subject.clone(), card };
                self.set_flash(format!("Added flashcard to \"{}\"", subject));
                self.mode = Mode::Tree;
            }
            Err(e @ SessionError::Validation(_)) => {
                self.set_error(e.to_string());
            }
            Err(e) => {
                self.set_error(format!("Error: {}", e));
                self.mode = Mode::Tree;
            }
        }
    }

    // ==================== Review ====================

    pub fn begin_review(&mut self) {
        let Some(subject) = self.selected_subject() else {
            self.set_error("No subject selected".to_string());
            return;
        };

        match self.app.session.draw_card(&subject) {
            Ok(card) => {
                self.review = Some(ReviewPrompt {
                    subject,
                    card,
                    input: String::new(),
                });
                self.mode = Mode::Review;
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn submit_review(&mut self) {
        let Some(prompt) = self.review.take() else {
            self.mode = Mode::Tree;
            return;
        };

        let outcome = self.app.session.submit_answer(&prompt.card, &prompt.input);
        if outcome.correct {
            self.set_flash("Correct!".to_string());
        } else {
            self.set_error(format!("Incorrect. The answer is: {}", outcome.expected));
        }

        self.detail = Detail::Graded {
            subject: prompt.subject,
            question: prompt.card.question,
            submitted: prompt.input.trim().to_string(),
            outcome,
        };
        self.mode = Mode::Tree;
    }

    pub fn cancel_review(&mut self) {
        self.review = None;
        self.mode = Mode::Tree;
    }

    // ==================== Delete ====================

    pub fn begin_delete(&mut self) {
        match self.selected_card_id() {
            Some(id) => self.mode = Mode::ConfirmDelete { id },
            None => self.set_error("No flashcard selected".to_string()),
        }
    }

    pub fn confirm_delete(&mut self, id: i64) {
        self.mode = Mode::Tree;
        match self.app.session.delete_flashcard(id) {
            Ok(Some(removal)) => {
                if matches!(&self.detail, Detail::Card { card, .. } if card.id == id) {
                    self.detail = Detail::Empty;
                }
                self.rebuild_tree();
                if removal.subject_removed {
                    self.set_flash(format!(
                        "Deleted flashcard {} and empty subject {}",
                        id, removal.subject
                    ));
                } else {
                    self.set_flash(format!("Deleted flashcard {}", id));
                }
            }
            Ok(None) => self.set_error(format!("Flashcard {} no longer exists", id)),
            Err(e) => self.set_error(format!("Error: {}", e)),
        }
    }

    // ==================== Messages ====================

    pub fn set_flash(&mut self, text: String) {
        self.flash = Some(Flash { text, is_error: false });
    }

    pub fn set_error(&mut self, text: String) {
        self.flash = Some(Flash { text, is_error: true });
    }
}

fn card_item(subject: &str, card: &Flashcard) -> TreeItem {
    TreeItem {
        label: card.question.clone(),
        kind: TreeItemKind::Card {
            id: card.id,
            subject: subject.to_string(),
        },
        depth: 1,
        expanded: false,
        has_children: false,
    }
}
