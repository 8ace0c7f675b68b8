use thiserror::Error;

use crate::game::Side;

/// Errors raised when a move breaks the turn rules.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("it is the {0}'s turn")]
    NotYourTurn(Side),

    #[error("the game is already over")]
    GameOver,

    #[error("card {index} out of range for a hand of {hand_size}")]
    CardOutOfRange { index: usize, hand_size: usize },

    #[error("cannot pass while holding {0} cards")]
    MustPlay(usize),
}

pub type Result<T> = std::result::Result<T, GameError>;
