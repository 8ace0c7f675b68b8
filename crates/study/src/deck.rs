//! Deck model and the `.deck` text format.
//!
//! ```text
//! Capital Cities
//! Q: Capital of France?
//! A: Paris
//! D: EASY
//! N: 2
//! -
//! ```
//!
//! The first line names the deck. Each card is a `Q:`/`A:`/`D:`/`N:` block
//! closed by a `-` line. Blank lines are ignored.

use crate::card::{CardDifficulty, FlashCard};
use crate::error::{DeckError, Result};

pub const DECK_EXTENSION: &str = "deck";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlashCardDeck {
    pub name: String,
    pub cards: Vec<FlashCard>,
}

impl FlashCardDeck {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_cards(name: impl Into<String>, cards: Vec<FlashCard>) -> Self {
        Self {
            name: name.into(),
            cards,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// File name stem derived from the deck name: lower-case ASCII
    /// alphanumerics, everything else collapsed to `_`.
    pub fn file_stem(&self) -> String {
        file_stem_for(&self.name)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate();
        let name = lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .map(|(_, line)| line.trim().to_string())
            .ok_or_else(|| DeckError::Parse {
                line: 1,
                reason: "missing deck name".into(),
            })?;

        let mut deck = Self::new(name);
        let mut card: Option<FlashCard> = None;

        for (number, raw) in lines {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line == "-" {
                if let Some(done) = card.take() {
                    deck.cards.push(done);
                }
                continue;
            }

            let Some((tag, value)) = line.split_once(':') else {
                return Err(DeckError::Parse {
                    line: number + 1,
                    reason: format!("expected a tagged line, got '{line}'"),
                });
            };
            let value = value.trim();
            let current = card.get_or_insert_with(FlashCard::default);
            match tag {
                "Q" => current.question = value.to_string(),
                "A" => current.answer = value.to_string(),
                "D" => current.difficulty = CardDifficulty::parse_lenient(value),
                "N" => {
                    current.times_answered = value.parse().map_err(|_| DeckError::Parse {
                        line: number + 1,
                        reason: format!("answer count '{value}' is not a number"),
                    })?;
                }
                other => {
                    return Err(DeckError::Parse {
                        line: number + 1,
                        reason: format!("unknown tag '{other}'"),
                    });
                }
            }
        }

        // A final card without a closing '-' is still kept.
        if let Some(done) = card {
            deck.cards.push(done);
        }
        Ok(deck)
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n", self.name);
        for card in &self.cards {
            out.push_str(&format!(
                "Q: {}\nA: {}\nD: {}\nN: {}\n-\n",
                single_line(&card.question),
                single_line(&card.answer),
                card.difficulty,
                card.times_answered
            ));
        }
        out
    }
}

pub(crate) fn file_stem_for(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            stem.push(ch.to_ascii_lowercase());
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "deck".to_string()
    } else {
        stem.to_string()
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// Decks written to an empty deck directory on first start.
pub fn example_decks() -> Vec<FlashCardDeck> {
    vec![
        FlashCardDeck::with_cards(
            "Example Deck 1",
            vec![
                FlashCard::new("What colour is #FFFFFF?", "White"),
                FlashCard::new("What colour is #000000?", "Black"),
                FlashCard::new("What colour is #FF0000?", "Red"),
            ],
        ),
        FlashCardDeck::with_cards(
            "Capital Cities",
            vec![
                FlashCard::new("Capital of France?", "Paris"),
                FlashCard::new("Capital of Japan?", "Tokyo"),
                FlashCard::new("Capital of Kenya?", "Nairobi"),
                FlashCard::new("Capital of Peru?", "Lima"),
                FlashCard::new("Capital of Canada?", "Ottawa"),
            ],
        ),
    ]
}
