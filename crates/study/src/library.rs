//! Loaded decks with write-through persistence.

use crate::card::{FlashCard, Rating};
use crate::deck::{FlashCardDeck, example_decks, file_stem_for};
use crate::error::{DeckError, Result};
use crate::repository::DeckRepository;

/// In-memory view of every deck, kept sorted by name.
///
/// Deck names are unique up to their file stem, so two decks never share a
/// file. Every mutation is saved to the repository before it returns.
pub struct DeckLibrary {
    repository: Box<dyn DeckRepository>,
    decks: Vec<FlashCardDeck>,
}

impl DeckLibrary {
    pub fn load(repository: Box<dyn DeckRepository>) -> Result<Self> {
        let decks = repository.list()?;
        Ok(Self { repository, decks })
    }

    /// Writes the example decks if the repository holds none.
    ///
    /// Returns true if examples were created.
    pub fn seed_examples_if_empty(&mut self) -> Result<bool> {
        if !self.decks.is_empty() {
            return Ok(false);
        }
        for deck in example_decks() {
            self.repository.save(&deck)?;
        }
        tracing::info!("Created example decks");
        self.reload()?;
        Ok(true)
    }

    /// Re-reads every deck from the repository.
    pub fn reload(&mut self) -> Result<()> {
        self.decks = self.repository.list()?;
        Ok(())
    }

    pub fn decks(&self) -> &[FlashCardDeck] {
        &self.decks
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    pub fn deck(&self, index: usize) -> Option<&FlashCardDeck> {
        self.decks.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.decks.iter().position(|deck| deck.name == name)
    }

    pub fn find(&self, name: &str) -> Option<&FlashCardDeck> {
        self.decks.iter().find(|deck| deck.name == name)
    }

    /// Creates an empty deck and returns its index.
    pub fn add_deck(&mut self, name: &str) -> Result<usize> {
        let name = self.check_new_name(name, None)?;
        let deck = FlashCardDeck::new(name.clone());
        self.repository.save(&deck)?;
        self.decks.push(deck);
        self.sort();
        self.position(&name).ok_or(DeckError::DeckNotFound(self.decks.len()))
    }

    pub fn delete_deck(&mut self, index: usize) -> Result<FlashCardDeck> {
        let name = self.deck_at(index)?.name.clone();
        self.repository.delete(&name)?;
        Ok(self.decks.remove(index))
    }

    /// Renames a deck and returns its new index.
    pub fn rename_deck(&mut self, index: usize, new_name: &str) -> Result<usize> {
        let old_name = self.deck_at(index)?.name.clone();
        let new_name = self.check_new_name(new_name, Some(index))?;

        let mut renamed = self.decks[index].clone();
        renamed.name = new_name.clone();
        self.repository.save(&renamed)?;
        if file_stem_for(&old_name) != file_stem_for(&new_name) {
            self.repository.delete(&old_name)?;
        }
        self.decks[index] = renamed;
        self.sort();
        tracing::debug!("Renamed deck '{}' to '{}'", old_name, new_name);
        self.position(&new_name)
            .ok_or(DeckError::DeckNotFound(index))
    }

    /// Appends a card and returns its index in the deck.
    pub fn add_card(&mut self, deck_index: usize, card: FlashCard) -> Result<usize> {
        self.edit_deck(deck_index, |deck| {
            deck.cards.push(card);
            Ok(deck.cards.len() - 1)
        })
    }

    pub fn update_card(
        &mut self,
        deck_index: usize,
        card_index: usize,
        card: FlashCard,
    ) -> Result<()> {
        self.edit_deck(deck_index, |deck| {
            *card_mut(deck, card_index)? = card;
            Ok(())
        })
    }

    pub fn delete_card(&mut self, deck_index: usize, card_index: usize) -> Result<FlashCard> {
        self.edit_deck(deck_index, |deck| {
            card_mut(deck, card_index)?;
            Ok(deck.cards.remove(card_index))
        })
    }

    /// Stores a review result for one card.
    pub fn record_answer(
        &mut self,
        deck_index: usize,
        card_index: usize,
        rating: Rating,
    ) -> Result<()> {
        self.edit_deck(deck_index, |deck| {
            card_mut(deck, card_index)?.record_answer(rating);
            Ok(())
        })
    }

    /// Applies `edit` to a copy of the deck and commits it once saved.
    fn edit_deck<T>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut FlashCardDeck) -> Result<T>,
    ) -> Result<T> {
        let mut deck = self.deck_at(index)?.clone();
        let out = edit(&mut deck)?;
        self.repository.save(&deck)?;
        self.decks[index] = deck;
        Ok(out)
    }

    fn deck_at(&self, index: usize) -> Result<&FlashCardDeck> {
        self.decks.get(index).ok_or(DeckError::DeckNotFound(index))
    }

    fn check_new_name(&self, name: &str, ignore: Option<usize>) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeckError::EmptyName);
        }
        let stem = file_stem_for(name);
        let taken = self
            .decks
            .iter()
            .enumerate()
            .any(|(i, deck)| Some(i) != ignore && file_stem_for(&deck.name) == stem);
        if taken {
            return Err(DeckError::DuplicateDeck(name.to_string()));
        }
        Ok(name.to_string())
    }

    fn sort(&mut self) {
        self.decks.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

fn card_mut(deck: &mut FlashCardDeck, index: usize) -> Result<&mut FlashCard> {
    let count = deck.cards.len();
    deck.cards
        .get_mut(index)
        .ok_or(DeckError::CardNotFound { index, count })
}
