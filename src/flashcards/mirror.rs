//! In-memory copy of the whole flashcard store.
//!
//! Loaded once from [`FlashcardStore::load_all`](super::FlashcardStore::load_all)
//! and then updated right after every successful store write. It holds the
//! entire dataset, so there is nothing to evict.

use std::collections::BTreeMap;

use super::models::Flashcard;
use super::storage::Snapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mirror {
    subjects: BTreeMap<String, Vec<Flashcard>>,
}

impl Mirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a store snapshot, skipping subjects with no cards.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let subjects = snapshot
            .into_iter()
            .filter(|(_, cards)| !cards.is_empty())
            .collect();
        Self { subjects }
    }

    /// Append a card, creating the subject entry if this is its first card.
    pub fn insert(&mut self, subject: &str, card: Flashcard) {
        self.subjects
            .entry(subject.to_string())
            .or_default()
            .push(card);
    }

    /// Remove a card from a subject, dropping the subject once it is empty.
    ///
    /// Returns false if the card was not there.
    pub fn remove(&mut self, subject: &str, id: i64) -> bool {
        let Some(cards) = self.subjects.get_mut(subject) else {
            return false;
        };

        let before = cards.len();
        cards.retain(|card| card.id != id);
        let removed = cards.len() != before;

        if cards.is_empty() {
            self.subjects.remove(subject);
        }
        removed
    }

    /// Find a card by id along with its subject
    pub fn find(&self, id: i64) -> Option<(&str, &Flashcard)> {
        self.subjects.iter().find_map(|(subject, cards)| {
            cards
                .iter()
                .find(|card| card.id == id)
                .map(|card| (subject.as_str(), card))
        })
    }

    /// Subject names in display order
    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.keys().map(String::as_str)
    }

    /// Cards of a subject, empty if the subject does not exist
    pub fn cards(&self, subject: &str) -> &[Flashcard] {
        self.subjects
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_subject(&self, subject: &str) -> bool {
        self.subjects.contains_key(subject)
    }

    /// Iterate subjects together with their cards
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Flashcard])> {
        self.subjects
            .iter()
            .map(|(subject, cards)| (subject.as_str(), cards.as_slice()))
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn card_count(&self) -> usize {
        self.subjects.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Flatten to `(subject, id, question, answer)` rows
    pub fn entries(&self) -> Vec<(String, i64, String, String)> {
        self.iter()
            .flat_map(|(subject, cards)| {
                cards.iter().map(move |card| {
                    (
                        subject.to_string(),
                        card.id,
                        card.question.clone(),
                        card.answer.clone(),
                    )
                })
            })
            .collect()
    }
}
