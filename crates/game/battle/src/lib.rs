//! Card battle rules.
//!
//! Two players, the user and a bot, start with full hit points and a hand
//! drawn from a randomly generated deck. Each turn the active player plays one
//! card and draws a replacement; the game ends when a player is defeated or
//! both hands run out.

pub mod card;
pub mod config;
pub mod error;
pub mod game;
pub mod player;

pub use card::{CardKind, PlayingCard, generate_deck};
pub use config::{GameConfig, MAX_HIT_POINTS};
pub use error::{GameError, Result};
pub use game::{Game, Outcome, Side, TurnReport};
pub use player::Player;
