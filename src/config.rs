//! Application configuration
//!
//! Read from `<config_dir>/flashdeck/config.toml` unless a path is given.
//! Every key is optional:
//!
//! ```toml
//! database_path = "/home/me/cards.db"
//! log_level = "info"
//! review_rounds = 5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "flashdeck";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "flashcards.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Could not determine data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database file. Defaults to `<data_local_dir>/flashdeck/flashcards.db`.
    pub database_path: Option<PathBuf>,
    /// env_logger filter used when RUST_LOG is unset
    pub log_level: String,
    /// Cards asked by the `review` command when `--rounds` is omitted
    pub review_rounds: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_level: "warn".to_string(),
            review_rounds: 1,
        }
    }
}

impl AppConfig {
    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the database path, falling back to the platform data dir
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => dirs::data_local_dir()
                .map(|p| p.join(APP_DIR).join(DATABASE_FILE))
                .ok_or(ConfigError::DataDirNotFound),
        }
    }
}
