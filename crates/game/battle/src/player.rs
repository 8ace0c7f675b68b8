use crate::card::PlayingCard;
use crate::error::{GameError, Result};

/// One side of the battle: hit points, a hand and a draw pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    hit_points: i32,
    max_hit_points: i32,
    hand: Vec<PlayingCard>,
    deck: Vec<PlayingCard>,
}

impl Player {
    /// Full health, empty hand. The last card of `deck` is drawn first.
    pub fn new(name: impl Into<String>, max_hit_points: i32, deck: Vec<PlayingCard>) -> Self {
        Self {
            name: name.into(),
            hit_points: max_hit_points,
            max_hit_points,
            hand: Vec::new(),
            deck,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hit_points(&self) -> i32 {
        self.hit_points
    }

    pub fn max_hit_points(&self) -> i32 {
        self.max_hit_points
    }

    pub fn hand(&self) -> &[PlayingCard] {
        &self.hand
    }

    pub fn deck(&self) -> &[PlayingCard] {
        &self.deck
    }

    pub fn is_defeated(&self) -> bool {
        self.hit_points <= 0
    }

    /// Moves the top card of the deck into the hand.
    pub fn draw(&mut self) -> Option<PlayingCard> {
        let card = self.deck.pop()?;
        self.hand.push(card);
        Some(card)
    }

    /// Draws until the hand holds `hand_size` cards or the deck is empty.
    pub fn draw_hand(&mut self, hand_size: usize) {
        while self.hand.len() < hand_size && self.draw().is_some() {}
    }

    pub(crate) fn take_card(&mut self, index: usize) -> Result<PlayingCard> {
        if index >= self.hand.len() {
            return Err(GameError::CardOutOfRange {
                index,
                hand_size: self.hand.len(),
            });
        }
        Ok(self.hand.remove(index))
    }

    pub(crate) fn take_damage(&mut self, amount: i32) {
        self.hit_points = self.hit_points.saturating_sub(amount).max(0);
    }

    pub(crate) fn heal(&mut self, amount: i32) {
        self.hit_points = self.hit_points.saturating_add(amount).min(self.max_hit_points);
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Vec<PlayingCard> {
        &mut self.hand
    }
}
