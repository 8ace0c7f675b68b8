use rand::Rng;
use strum::{EnumCount, IntoEnumIterator};

/// Highest value a generated card can carry.
pub const MAX_CARD_VALUE: u8 = 10;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumCount,
)]
pub enum CardKind {
    /// Deals `value` damage to the opponent.
    Damage,
    /// Restores `value` hit points to the player, up to the maximum.
    Heal,
    /// Exchanges the two players' hands.
    #[strum(to_string = "Swap Hands")]
    SwapHands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayingCard {
    kind: CardKind,
    value: u8,
}

impl PlayingCard {
    pub const fn new(kind: CardKind, value: u8) -> Self {
        Self { kind, value }
    }

    /// Uniform kind, value in `1..=MAX_CARD_VALUE`.
    pub fn random(rng: &mut impl Rng) -> Self {
        let kinds = CardKind::iter().collect::<Vec<_>>();
        let kind = kinds[rng.gen_range(0..CardKind::COUNT)];
        Self::new(kind, rng.gen_range(1..=MAX_CARD_VALUE))
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Short label for hand menus, e.g. `Damage 7`.
    pub fn label(&self) -> String {
        match self.kind {
            CardKind::SwapHands => self.kind.to_string(),
            kind => format!("{kind} {}", self.value),
        }
    }
}

pub fn generate_deck(size: usize, rng: &mut impl Rng) -> Vec<PlayingCard> {
    (0..size).map(|_| PlayingCard::random(rng)).collect()
}
