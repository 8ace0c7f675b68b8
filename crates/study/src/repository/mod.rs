//! Deck persistence contracts and implementations.

mod file;
mod memory;

pub use file::FileDeckRepository;
pub use memory::InMemoryDeckRepository;

use crate::deck::FlashCardDeck;
use crate::error::Result;

/// Storage for flashcard decks, keyed by the deck's file stem.
pub trait DeckRepository: Send + Sync {
    /// All stored decks, sorted by name.
    fn list(&self) -> Result<Vec<FlashCardDeck>>;

    /// Creates or overwrites the deck.
    fn save(&self, deck: &FlashCardDeck) -> Result<()>;

    /// Removes the deck named `name`. Missing decks are not an error.
    fn delete(&self, name: &str) -> Result<()>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.list()?.is_empty())
    }
}
