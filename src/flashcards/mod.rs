//! Flashcards grouped by subject
//!
//! This module provides:
//! - SQLite persistence for subjects and cards
//! - An in-memory mirror of the store for rendering
//! - Random card selection and answer grading

pub mod mirror;
pub mod models;
pub mod quiz;
pub mod storage;

pub use mirror::Mirror;
pub use models::*;
pub use quiz::{grade, pick_random_card, Scoreboard};
pub use storage::{FlashcardStorageError, FlashcardStore, Snapshot};
