//! Random card selection and answer grading
//!
//! Grading is exact: the submitted answer is trimmed and both sides are
//! lowercased, nothing else. No partial credit, no punctuation or accent
//! folding.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::models::Flashcard;

/// Pick a card uniformly at random. `None` for an empty slice.
pub fn pick_random_card<'a, R>(cards: &'a [Flashcard], rng: &mut R) -> Option<&'a Flashcard>
where
    R: Rng + ?Sized,
{
    cards.choose(rng)
}

/// Case-insensitive comparison, trimming only the submitted side
pub fn grade(expected: &str, submitted: &str) -> bool {
    expected.to_lowercase() == submitted.trim().to_lowercase()
}

/// Running score for the current process. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub total: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one graded attempt
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.score += 1;
        }
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}/{}", self.score, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grade_ignores_case_and_submitted_whitespace() {
        assert!(grade("Paris", "  paris "));
        assert!(grade("Paris", "paris "));
        assert!(grade("Paris", "PARIS"));
        assert!(!grade("Paris", "par is"));
        assert!(!grade("Paris", "Paris."));
    }

    #[test]
    fn test_grade_does_not_trim_expected() {
        assert!(!grade(" Paris", "Paris"));
    }

    #[test]
    fn test_grade_non_ascii_case() {
        assert!(grade("Ärger", "ärger"));
        assert!(!grade("café", "cafe"));
    }

    #[test]
    fn test_pick_from_empty_is_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_random_card(&[], &mut rng).is_none());
    }

    #[test]
    fn test_pick_returns_member_and_covers_all_cards() {
        let cards: Vec<Flashcard> = (1..=3)
            .map(|id| Flashcard::new(id, format!("Q{}", id), "A"))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = [false; 3];
        for _ in 0..200 {
            let card = pick_random_card(&cards, &mut rng).unwrap();
            seen[(card.id - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_scoreboard_counts() {
        let mut board = Scoreboard::new();
        board.record(true);
        board.record(false);
        board.record(true);

        assert_eq!(board, Scoreboard { score: 2, total: 3 });
        assert_eq!(board.to_string(), "Score: 2/3");
    }
}
