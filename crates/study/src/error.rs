//! Error types for deck and settings persistence.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed deck file at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("a deck named '{0}' already exists")]
    DuplicateDeck(String),

    #[error("deck name must not be empty")]
    EmptyName,

    #[error("deck {0} not found")]
    DeckNotFound(usize),

    #[error("card {index} out of range for deck with {count} cards")]
    CardNotFound { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, DeckError>;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
