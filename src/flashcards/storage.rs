//! SQLite storage for subjects and flashcards
//!
//! Schema:
//! ```text
//! subjects(id INTEGER PRIMARY KEY, name TEXT UNIQUE NOT NULL)
//! flashcards(id INTEGER PRIMARY KEY, subject_id INTEGER REFERENCES subjects(id),
//!            question TEXT NOT NULL, answer TEXT NOT NULL)
//! ```
//!
//! The single-statement primitives (`add_subject_if_absent`, `add_flashcard`,
//! `delete_flashcard`, `delete_subject`) leave subject lifecycle to the caller.
//! `create_card` and `remove_card` wrap them in one transaction each and keep
//! the "no subject without cards" rule themselves.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use thiserror::Error;

use super::models::{CardRemoval, Flashcard, NewFlashcard};

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Integrity error: {0}")]
    Integrity(String),
}

impl From<rusqlite::Error> for FlashcardStorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref failure, ref message)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                let detail = message.clone().unwrap_or_else(|| failure.to_string());
                Self::Integrity(detail)
            }
            other => Self::Sqlite(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

/// Full contents of the store, keyed by subject name
pub type Snapshot = BTreeMap<String, Vec<Flashcard>>;

/// Persistent store for flashcards.
///
/// Holds one connection for the lifetime of the store. Foreign keys are
/// enforced, so a card can never point at a missing subject and a subject
/// that still has cards cannot be deleted.
pub struct FlashcardStore {
    conn: Connection,
}

impl FlashcardStore {
    /// Open (or create) the database file at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        log::info!("Opened flashcard database at {:?}", db_path);
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create both tables if they are missing. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS subjects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL
            );

            CREATE TABLE IF NOT EXISTS flashcards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                subject_id INTEGER,
                question TEXT NOT NULL,
                answer TEXT NOT NULL,
                FOREIGN KEY (subject_id) REFERENCES subjects(id)
            );

            CREATE INDEX IF NOT EXISTS idx_flashcards_subject_id ON flashcards(subject_id);
            "#,
        )?;
        Ok(())
    }

    // ==================== Primitive Operations ====================

    /// Insert a subject row unless one with this name already exists.
    pub fn add_subject_if_absent(&self, name: &str) -> Result<()> {
        add_subject_if_absent(&self.conn, name)
    }

    /// Insert a card under an existing subject and return its new id.
    pub fn add_flashcard(&self, subject: &str, question: &str, answer: &str) -> Result<i64> {
        add_flashcard(&self.conn, subject, question, answer)
    }

    /// Delete a card row. Unknown ids are ignored.
    pub fn delete_flashcard(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM flashcards WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Delete a subject row. Fails with `Integrity` while cards still reference it.
    pub fn delete_subject(&self, name: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM subjects WHERE name = ?1", params![name])?;
        Ok(())
    }

    /// Read every subject with its cards in id order.
    ///
    /// Subjects without cards are included with an empty list so callers can
    /// see them; see [`FlashcardStore::prune_empty_subjects`].
    pub fn load_all(&self) -> Result<Snapshot> {
        let mut snapshot = Snapshot::new();

        let mut stmt = self.conn.prepare("SELECT name FROM subjects")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        for name in names {
            snapshot.insert(name, Vec::new());
        }

        let mut stmt = self.conn.prepare(
            "SELECT s.name, f.id, f.question, f.answer
             FROM flashcards f
             JOIN subjects s ON s.id = f.subject_id
             ORDER BY f.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                Flashcard {
                    id: row.get(1)?,
                    question: row.get(2)?,
                    answer: row.get(3)?,
                },
            ))
        })?;
        for row in rows {
            let (subject, card) = row?;
            snapshot.entry(subject).or_default().push(card);
        }

        Ok(snapshot)
    }

    // ==================== Composite Operations ====================

    /// Create a card, creating its subject first if needed, in one transaction.
    pub fn create_card(&mut self, request: &NewFlashcard) -> Result<Flashcard> {
        let tx = self.conn.transaction()?;
        add_subject_if_absent(&tx, &request.subject)?;
        let id = add_flashcard(&tx, &request.subject, &request.question, &request.answer)?;
        tx.commit()?;

        log::debug!("Created flashcard {} under subject '{}'", id, request.subject);
        Ok(Flashcard::new(id, request.question.clone(), request.answer.clone()))
    }

    /// Delete a card and, if it was the last one, its subject, in one transaction.
    ///
    /// Returns `None` without touching anything when the id does not exist.
    pub fn remove_card(&mut self, id: i64) -> Result<Option<CardRemoval>> {
        let tx = self.conn.transaction()?;

        let owner: Option<(i64, String)> = tx
            .query_row(
                "SELECT s.id, s.name
                 FROM flashcards f
                 JOIN subjects s ON s.id = f.subject_id
                 WHERE f.id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((subject_id, subject)) = owner else {
            log::warn!("Ignoring delete of unknown flashcard {}", id);
            return Ok(None);
        };

        tx.execute("DELETE FROM flashcards WHERE id = ?1", params![id])?;

        let remaining: i64 = tx.query_row(
            "SELECT COUNT(*) FROM flashcards WHERE subject_id = ?1",
            params![subject_id],
            |row| row.get(0),
        )?;
        let subject_removed = remaining == 0;
        if subject_removed {
            tx.execute("DELETE FROM subjects WHERE id = ?1", params![subject_id])?;
        }

        tx.commit()?;

        log::debug!(
            "Deleted flashcard {} from '{}'{}",
            id,
            subject,
            if subject_removed { " (subject removed)" } else { "" }
        );
        Ok(Some(CardRemoval {
            card_id: id,
            subject,
            subject_removed,
        }))
    }

    /// Delete subjects that have no cards. Returns how many were removed.
    pub fn prune_empty_subjects(&self) -> Result<usize> {
        let removed = self.conn.execute(
            "DELETE FROM subjects
             WHERE NOT EXISTS (SELECT 1 FROM flashcards f WHERE f.subject_id = subjects.id)",
            [],
        )?;
        if removed > 0 {
            log::warn!("Removed {} subject(s) with no flashcards", removed);
        }
        Ok(removed)
    }

    // ==================== Queries ====================

    /// Look up a single card with its subject name
    pub fn get_card(&self, id: i64) -> Result<Option<(String, Flashcard)>> {
        let card = self
            .conn
            .query_row(
                "SELECT s.name, f.id, f.question, f.answer
                 FROM flashcards f
                 JOIN subjects s ON s.id = f.subject_id
                 WHERE f.id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        Flashcard {
                            id: row.get(1)?,
                            question: row.get(2)?,
                            answer: row.get(3)?,
                        },
                    ))
                },
            )
            .optional()?;
        Ok(card)
    }

    /// Number of subject rows and flashcard rows
    pub fn counts(&self) -> Result<(usize, usize)> {
        let subjects: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM subjects", [], |row| row.get(0))?;
        let cards: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM flashcards", [], |row| row.get(0))?;
        Ok((subjects as usize, cards as usize))
    }
}

fn add_subject_if_absent(conn: &Connection, name: &str) -> Result<()> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO subjects (name) VALUES (?1)",
        params![name],
    )?;
    if inserted > 0 {
        log::debug!("Created subject '{}'", name);
    }
    Ok(())
}

fn add_flashcard(conn: &Connection, subject: &str, question: &str, answer: &str) -> Result<i64> {
    let subject_id: Option<i64> = conn
        .query_row(
            "SELECT id FROM subjects WHERE name = ?1",
            params![subject],
            |row| row.get(0),
        )
        .optional()?;

    let subject_id = subject_id.ok_or_else(|| {
        FlashcardStorageError::Integrity(format!("subject '{}' does not exist", subject))
    })?;

    conn.execute(
        "INSERT INTO flashcards (subject_id, question, answer) VALUES (?1, ?2, ?3)",
        params![subject_id, question, answer],
    )?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn request(subject: &str, question: &str, answer: &str) -> NewFlashcard {
        NewFlashcard::new(subject, question, answer)
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let store = FlashcardStore::open_in_memory().unwrap();
        store.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
        assert_eq!(store.counts().unwrap(), (0, 0));
    }

    #[test]
    fn test_add_subject_if_absent_ignores_duplicates() {
        let store = FlashcardStore::open_in_memory().unwrap();
        store.add_subject_if_absent("History").unwrap();
        store.add_subject_if_absent("History").unwrap();
        store.add_subject_if_absent("history").unwrap();
        // Names are case-sensitive
        assert_eq!(store.counts().unwrap(), (2, 0));
    }

    #[test]
    fn test_add_flashcard_requires_subject() {
        let store = FlashcardStore::open_in_memory().unwrap();
        let err = store.add_flashcard("Nowhere", "Q", "A").unwrap_err();
        assert!(matches!(err, FlashcardStorageError::Integrity(_)));
        assert_eq!(store.counts().unwrap(), (0, 0));
    }

    #[test]
    fn test_delete_subject_with_cards_is_integrity_error() {
        let store = FlashcardStore::open_in_memory().unwrap();
        store.add_subject_if_absent("Chemistry").unwrap();
        store.add_flashcard("Chemistry", "H2O?", "Water").unwrap();

        let err = store.delete_subject("Chemistry").unwrap_err();
        assert!(matches!(err, FlashcardStorageError::Integrity(_)));
        assert_eq!(store.counts().unwrap(), (1, 1));
    }

    #[test]
    fn test_delete_flashcard_unknown_id_is_noop() {
        let store = FlashcardStore::open_in_memory().unwrap();
        store.add_subject_if_absent("Art").unwrap();
        store.add_flashcard("Art", "Mona Lisa painter?", "da Vinci").unwrap();

        store.delete_flashcard(9999).unwrap();
        assert_eq!(store.counts().unwrap(), (1, 1));
    }

    #[test]
    fn test_create_card_new_and_existing_subject() {
        let mut store = FlashcardStore::open_in_memory().unwrap();

        store.create_card(&request("Geo", "Capital of France?", "Paris")).unwrap();
        assert_eq!(store.counts().unwrap(), (1, 1));

        store.create_card(&request("Geo", "Capital of Spain?", "Madrid")).unwrap();
        assert_eq!(store.counts().unwrap(), (1, 2));

        store.create_card(&request("Math", "2 + 2", "4")).unwrap();
        assert_eq!(store.counts().unwrap(), (2, 3));
    }

    #[test]
    fn test_create_card_rolls_back_new_subject_when_card_insert_fails() {
        let mut store = FlashcardStore::open_in_memory().unwrap();
        store
            .conn
            .execute_batch(
                "CREATE TRIGGER reject_cards BEFORE INSERT ON flashcards
                 BEGIN SELECT RAISE(ABORT, 'boom'); END;",
            )
            .unwrap();

        let err = store.create_card(&request("Geo", "Q", "A")).unwrap_err();
        assert!(matches!(err, FlashcardStorageError::Integrity(_)));
        assert_eq!(store.counts().unwrap(), (0, 0));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_remove_last_card_removes_subject() {
        let mut store = FlashcardStore::open_in_memory().unwrap();
        let only = store.create_card(&request("Solo", "Q", "A")).unwrap();

        let removal = store.remove_card(only.id).unwrap().unwrap();
        assert_eq!(removal.subject, "Solo");
        assert!(removal.subject_removed);
        assert_eq!(store.counts().unwrap(), (0, 0));
    }

    #[test]
    fn test_remove_one_of_several_keeps_subject() {
        let mut store = FlashcardStore::open_in_memory().unwrap();
        let first = store.create_card(&request("Bio", "Q1", "A1")).unwrap();
        store.create_card(&request("Bio", "Q2", "A2")).unwrap();

        let removal = store.remove_card(first.id).unwrap().unwrap();
        assert!(!removal.subject_removed);
        assert_eq!(store.counts().unwrap(), (1, 1));
    }

    #[test]
    fn test_remove_unknown_card_returns_none() {
        let mut store = FlashcardStore::open_in_memory().unwrap();
        store.create_card(&request("Bio", "Q1", "A1")).unwrap();

        assert!(store.remove_card(42).unwrap().is_none());
        assert_eq!(store.counts().unwrap(), (1, 1));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = FlashcardStore::open_in_memory().unwrap();
        let first = store.create_card(&request("S", "Q1", "A1")).unwrap();
        let second = store.create_card(&request("S", "Q2", "A2")).unwrap();
        store.remove_card(second.id).unwrap();

        let third = store.create_card(&request("S", "Q3", "A3")).unwrap();
        assert!(third.id > second.id);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_load_all_groups_by_subject_in_id_order() {
        let mut store = FlashcardStore::open_in_memory().unwrap();
        let a = store.create_card(&request("Geo", "Q1", "A1")).unwrap();
        let b = store.create_card(&request("Math", "Q2", "A2")).unwrap();
        let c = store.create_card(&request("Geo", "Q3", "A3")).unwrap();

        let snapshot = store.load_all().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["Geo"], vec![a, c]);
        assert_eq!(snapshot["Math"], vec![b]);
    }

    #[test]
    fn test_prune_empty_subjects() {
        let mut store = FlashcardStore::open_in_memory().unwrap();
        store.add_subject_if_absent("Empty").unwrap();
        store.create_card(&request("Full", "Q", "A")).unwrap();

        assert_eq!(store.prune_empty_subjects().unwrap(), 1);
        let snapshot = store.load_all().unwrap();
        assert!(!snapshot.contains_key("Empty"));
        assert!(snapshot.contains_key("Full"));
    }

    #[test]
    fn test_get_card() {
        let mut store = FlashcardStore::open_in_memory().unwrap();
        let card = store.create_card(&request("Geo", "Capital of Peru?", "Lima")).unwrap();

        let (subject, found) = store.get_card(card.id).unwrap().unwrap();
        assert_eq!(subject, "Geo");
        assert_eq!(found, card);
        assert!(store.get_card(card.id + 1).unwrap().is_none());
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("nested").join("flashcards.db");

        let card = {
            let mut store = FlashcardStore::open(&db_path).unwrap();
            store.create_card(&request("Geo", "Capital of Italy?", "Rome")).unwrap()
        };

        let store = FlashcardStore::open(&db_path).unwrap();
        let snapshot = store.load_all().unwrap();
        assert_eq!(snapshot["Geo"], vec![card]);
    }
}
