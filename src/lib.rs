pub mod config;
pub mod flashcards;
pub mod session;

pub use config::{AppConfig, ConfigError};
pub use flashcards::{Flashcard, FlashcardStorageError, FlashcardStore, Mirror, Scoreboard};
pub use session::{ReviewOutcome, SessionError, StudySession};
