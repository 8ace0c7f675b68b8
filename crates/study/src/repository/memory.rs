use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::deck::{FlashCardDeck, file_stem_for};
use crate::error::{DeckError, Result};
use crate::repository::DeckRepository;

/// In-memory implementation of DeckRepository.
#[derive(Default)]
pub struct InMemoryDeckRepository {
    decks: RwLock<BTreeMap<String, FlashCardDeck>>,
}

impl InMemoryDeckRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decks(decks: impl IntoIterator<Item = FlashCardDeck>) -> Self {
        let decks = decks
            .into_iter()
            .map(|deck| (file_stem_for(&deck.name), deck))
            .collect();
        Self {
            decks: RwLock::new(decks),
        }
    }
}

impl DeckRepository for InMemoryDeckRepository {
    fn list(&self) -> Result<Vec<FlashCardDeck>> {
        let decks = self.decks.read().map_err(|_| DeckError::LockPoisoned)?;
        let mut list: Vec<_> = decks.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    fn save(&self, deck: &FlashCardDeck) -> Result<()> {
        let mut decks = self.decks.write().map_err(|_| DeckError::LockPoisoned)?;
        decks.insert(file_stem_for(&deck.name), deck.clone());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut decks = self.decks.write().map_err(|_| DeckError::LockPoisoned)?;
        decks.remove(&file_stem_for(name));
        Ok(())
    }
}
