//! A single study session: the store, its in-memory mirror and the score.
//!
//! Every mutation writes the store first (committed transaction) and only
//! then updates the mirror, so a failed write leaves the mirror untouched.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;

use crate::flashcards::{
    grade, pick_random_card, CardRemoval, Flashcard, FlashcardStorageError, FlashcardStore,
    Mirror, NewFlashcard, Scoreboard,
};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] FlashcardStorageError),

    #[error("Invalid flashcard: {0}")]
    Validation(String),

    #[error("No flashcards in subject: {0}")]
    UnknownSubject(String),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Result of grading one submitted answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub correct: bool,
    pub expected: String,
    pub scoreboard: Scoreboard,
}

pub struct StudySession {
    store: FlashcardStore,
    mirror: Mirror,
    scoreboard: Scoreboard,
    rng: StdRng,
}

impl StudySession {
    /// Load the mirror from `store` and start with a zero score.
    pub fn open(store: FlashcardStore) -> Result<Self> {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Like [`StudySession::open`] with a caller-supplied RNG
    pub fn with_rng(store: FlashcardStore, rng: StdRng) -> Result<Self> {
        store.prune_empty_subjects()?;
        let mirror = Mirror::from_snapshot(store.load_all()?);
        log::info!(
            "Loaded {} flashcards in {} subjects",
            mirror.card_count(),
            mirror.subject_count()
        );

        Ok(Self {
            store,
            mirror,
            scoreboard: Scoreboard::new(),
            rng,
        })
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    pub fn store(&self) -> &FlashcardStore {
        &self.store
    }

    /// Find a card and its subject in the mirror
    pub fn find_card(&self, id: i64) -> Option<(&str, &Flashcard)> {
        self.mirror.find(id)
    }

    /// Add a card, creating the subject if it is new.
    ///
    /// All three fields are trimmed and must be non-empty.
    pub fn add_flashcard(&mut self, subject: &str, question: &str, answer: &str) -> Result<Flashcard> {
        let request = NewFlashcard::new(subject, question, answer);
        let blank = request.blank_fields();
        if !blank.is_empty() {
            return Err(SessionError::Validation(format!(
                "{} must not be empty",
                blank.join(", ")
            )));
        }

        let card = self.store.create_card(&request)?;
        self.mirror.insert(&request.subject, card.clone());
        Ok(card)
    }

    /// Delete a card by id. Returns `None` if there was no such card.
    pub fn delete_flashcard(&mut self, id: i64) -> Result<Option<CardRemoval>> {
        let removal = self.store.remove_card(id)?;
        if let Some(removal) = &removal {
            self.mirror.remove(&removal.subject, removal.card_id);
        }
        Ok(removal)
    }

    /// Pick a random card from `subject` for review
    pub fn draw_card(&mut self, subject: &str) -> Result<Flashcard> {
        pick_random_card(self.mirror.cards(subject), &mut self.rng)
            .cloned()
            .ok_or_else(|| SessionError::UnknownSubject(subject.to_string()))
    }

    /// Grade an answer for `card` and update the running score
    pub fn submit_answer(&mut self, card: &Flashcard, submitted: &str) -> ReviewOutcome {
        let correct = grade(&card.answer, submitted);
        self.scoreboard.record(correct);
        log::debug!(
            "Graded card {}: {} ({})",
            card.id,
            if correct { "correct" } else { "incorrect" },
            self.scoreboard
        );

        ReviewOutcome {
            correct,
            expected: card.answer.clone(),
            scoreboard: self.scoreboard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rusqlite::Connection;
    use tempfile::TempDir;

    fn session() -> StudySession {
        let store = FlashcardStore::open_in_memory().unwrap();
        StudySession::with_rng(store, StdRng::seed_from_u64(42)).unwrap()
    }

    fn assert_in_sync(session: &StudySession) {
        let stored = Mirror::from_snapshot(session.store().load_all().unwrap());
        assert_eq!(session.mirror().entries(), stored.entries());
        assert_eq!(
            session.store().counts().unwrap(),
            (session.mirror().subject_count(), session.mirror().card_count())
        );
    }

    #[test]
    fn test_mirror_tracks_store_through_adds_and_deletes() {
        let mut s = session();

        let a = s.add_flashcard("Geo", "Capital of France?", "Paris").unwrap();
        assert_in_sync(&s);
        let b = s.add_flashcard("Geo", "Capital of Spain?", "Madrid").unwrap();
        assert_in_sync(&s);
        let c = s.add_flashcard("Math", "2 + 2", "4").unwrap();
        assert_in_sync(&s);

        let removal = s.delete_flashcard(a.id).unwrap().unwrap();
        assert_eq!(removal.subject, "Geo");
        assert!(!removal.subject_removed);
        assert_in_sync(&s);

        let removal = s.delete_flashcard(c.id).unwrap().unwrap();
        assert!(removal.subject_removed);
        assert_in_sync(&s);
        assert!(!s.mirror().contains_subject("Math"));

        assert!(s.delete_flashcard(b.id).unwrap().is_some());
        assert_in_sync(&s);
        assert!(s.mirror().is_empty());
    }

    #[test]
    fn test_mirror_tracks_store_through_random_sequences() {
        const SUBJECTS: [&str; 3] = ["Geo", "Math", "Art"];

        for seed in 0..8 {
            let mut ops = StdRng::seed_from_u64(seed);
            let mut s = session();
            let mut issued: Vec<i64> = Vec::new();

            for step in 0..40 {
                if issued.is_empty() || ops.gen_bool(0.55) {
                    let subject = SUBJECTS[ops.gen_range(0..SUBJECTS.len())];
                    let card = s
                        .add_flashcard(subject, &format!("Q{}", step), &format!("A{}", step))
                        .unwrap();
                    issued.push(card.id);
                } else if ops.gen_bool(0.2) {
                    // Ids that were never issued
                    let id = if ops.gen_bool(0.5) {
                        issued.iter().max().copied().unwrap_or(0) + 1000
                    } else {
                        -(step as i64)
                    };
                    let before = s.mirror().clone();
                    assert!(s.delete_flashcard(id).unwrap().is_none());
                    assert_eq!(s.mirror(), &before);
                } else {
                    let id = issued.swap_remove(ops.gen_range(0..issued.len()));
                    let subject = s.find_card(id).unwrap().0.to_string();
                    let removal = s.delete_flashcard(id).unwrap().unwrap();
                    assert_eq!(removal.subject, subject);
                    assert_eq!(removal.subject_removed, !s.mirror().contains_subject(&subject));
                }
                assert_in_sync(&s);
            }
        }
    }

    #[test]
    fn test_failed_add_leaves_mirror_and_store_untouched() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("flashcards.db");
        let store = FlashcardStore::open(&db_path).unwrap();
        let mut s = StudySession::with_rng(store, StdRng::seed_from_u64(7)).unwrap();
        s.add_flashcard("Math", "2 + 2", "4").unwrap();

        Connection::open(&db_path)
            .unwrap()
            .execute_batch(
                "CREATE TRIGGER reject_cards BEFORE INSERT ON flashcards
                 BEGIN SELECT RAISE(ABORT, 'boom'); END;",
            )
            .unwrap();

        let err = s.add_flashcard("Geo", "Capital of France?", "Paris").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Storage(FlashcardStorageError::Integrity(_))
        ));
        assert!(!s.mirror().contains_subject("Geo"));
        assert_eq!(s.mirror().card_count(), 1);
        assert_eq!(s.store().counts().unwrap(), (1, 1));
        assert_in_sync(&s);
    }

    #[test]
    fn test_add_rejects_blank_fields() {
        let mut s = session();

        let err = s.add_flashcard("  ", "Q", "A").unwrap_err();
        assert!(matches!(err, SessionError::Validation(ref msg) if msg.contains("subject")));

        let err = s.add_flashcard("Geo", "Q", "\t").unwrap_err();
        assert!(matches!(err, SessionError::Validation(ref msg) if msg.contains("answer")));

        assert!(s.mirror().is_empty());
        assert_eq!(s.store().counts().unwrap(), (0, 0));
    }

    #[test]
    fn test_add_trims_input() {
        let mut s = session();
        let card = s.add_flashcard(" Geo ", " Capital of Peru? ", " Lima ").unwrap();

        assert_eq!(card.question, "Capital of Peru?");
        assert_eq!(card.answer, "Lima");
        assert!(s.mirror().contains_subject("Geo"));
    }

    #[test]
    fn test_delete_unknown_card_is_noop() {
        let mut s = session();
        s.add_flashcard("Geo", "Q", "A").unwrap();
        let before = s.mirror().clone();

        assert!(s.delete_flashcard(12345).unwrap().is_none());
        assert_eq!(s.mirror(), &before);
        assert_in_sync(&s);
    }

    #[test]
    fn test_draw_card_from_unknown_subject() {
        let mut s = session();
        let err = s.draw_card("Nothing").unwrap_err();
        assert!(matches!(err, SessionError::UnknownSubject(ref name) if name == "Nothing"));
    }

    #[test]
    fn test_draw_card_comes_from_subject() {
        let mut s = session();
        s.add_flashcard("Geo", "Q1", "A1").unwrap();
        s.add_flashcard("Geo", "Q2", "A2").unwrap();
        s.add_flashcard("Art", "Q3", "A3").unwrap();

        for _ in 0..20 {
            let card = s.draw_card("Geo").unwrap();
            assert_ne!(card.question, "Q3");
        }
    }

    #[test]
    fn test_score_counts_survive_unrelated_mutations() {
        let mut s = session();
        let card = s.add_flashcard("Geo", "Capital of France?", "Paris").unwrap();

        assert!(s.submit_answer(&card, "  paris ").correct);
        let extra = s.add_flashcard("Art", "Q", "A").unwrap();
        assert!(!s.submit_answer(&card, "Lyon").correct);
        s.delete_flashcard(extra.id).unwrap();
        let outcome = s.submit_answer(&card, "PARIS");

        assert!(outcome.correct);
        assert_eq!(outcome.expected, "Paris");
        assert_eq!(outcome.scoreboard, Scoreboard { score: 2, total: 3 });
        assert_eq!(s.scoreboard(), outcome.scoreboard);
    }

    #[test]
    fn test_open_prunes_empty_subjects() {
        let store = FlashcardStore::open_in_memory().unwrap();
        store.add_subject_if_absent("Leftover").unwrap();

        let s = StudySession::open(store).unwrap();
        assert!(s.mirror().is_empty());
        assert_eq!(s.store().counts().unwrap(), (0, 0));
    }
}
