//! Flashcard decks, study settings and review sessions.
//!
//! Decks live as `.deck` text files in a deck directory and are accessed
//! through a [`DeckRepository`]. [`DeckLibrary`] keeps the loaded decks in
//! memory, enforces unique names and writes every edit through to the
//! repository.

pub mod card;
pub mod deck;
pub mod error;
pub mod library;
pub mod repository;
pub mod session;
pub mod settings;

pub use card::{CardDifficulty, FlashCard, Rating};
pub use deck::FlashCardDeck;
pub use error::{DeckError, Result, SettingsError};
pub use library::DeckLibrary;
pub use repository::{DeckRepository, FileDeckRepository, InMemoryDeckRepository};
pub use session::{SessionSummary, StudySession};
pub use settings::{SettingsStore, StudySettings};
