use std::path::PathBuf;

use anyhow::{Context, Result};

use flashdeck_lib::{AppConfig, FlashcardStore, StudySession};

/// Shared application state for CLI commands and the TUI
pub struct App {
    pub config: AppConfig,
    pub db_path: PathBuf,
    pub session: StudySession,
}

impl App {
    /// Open the configured database, or `db_override` when given
    pub fn new(config: AppConfig, db_override: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_override {
            Some(path) => path,
            None => config.database_path().context("Failed to get database path")?,
        };

        let store = FlashcardStore::open(&db_path)
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;
        let session = StudySession::open(store).context("Failed to load flashcards")?;

        Ok(Self {
            config,
            db_path,
            session,
        })
    }
}
