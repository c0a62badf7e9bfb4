//! Data models for the flashcard system

use serde::{Deserialize, Serialize};

/// A question and answer pair owned by one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    /// Assigned by the store on creation, never reused
    pub id: i64,
    pub question: String,
    /// Compared case-insensitively at review time
    pub answer: String,
}

impl Flashcard {
    pub fn new(id: i64, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// An add request: the subject to file the card under plus its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlashcard {
    pub subject: String,
    pub question: String,
    pub answer: String,
}

impl NewFlashcard {
    /// Build a request from raw form input, trimming every field.
    pub fn new(subject: &str, question: &str, answer: &str) -> Self {
        Self {
            subject: subject.trim().to_string(),
            question: question.trim().to_string(),
            answer: answer.trim().to_string(),
        }
    }

    /// Names of the fields that are empty after trimming
    pub fn blank_fields(&self) -> Vec<&'static str> {
        let mut blank = Vec::new();
        if self.subject.is_empty() {
            blank.push("subject");
        }
        if self.question.is_empty() {
            blank.push("question");
        }
        if self.answer.is_empty() {
            blank.push("answer");
        }
        blank
    }
}

/// What a successful card deletion touched in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRemoval {
    pub card_id: i64,
    pub subject: String,
    /// True when the card was the subject's last one and the subject row went too
    pub subject_removed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_flashcard_trims_fields() {
        let request = NewFlashcard::new("  Geography ", "\tCapital of France?", " Paris\n");
        assert_eq!(request.subject, "Geography");
        assert_eq!(request.question, "Capital of France?");
        assert_eq!(request.answer, "Paris");
        assert!(request.blank_fields().is_empty());
    }

    #[test]
    fn test_blank_fields_reported_in_form_order() {
        let request = NewFlashcard::new("   ", "Q", "");
        assert_eq!(request.blank_fields(), vec!["subject", "answer"]);
    }

    #[test]
    fn test_flashcard_serializes_camel_case() {
        let card = Flashcard::new(7, "2 + 2", "4");
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["question"], "2 + 2");
        assert_eq!(json["answer"], "4");

        let removal = CardRemoval {
            card_id: 7,
            subject: "Math".to_string(),
            subject_removed: true,
        };
        let json = serde_json::to_value(&removal).unwrap();
        assert_eq!(json["cardId"], 7);
        assert_eq!(json["subjectRemoved"], true);
    }
}
