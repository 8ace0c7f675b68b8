use rand::Rng;

use crate::card::{CardKind, PlayingCard, generate_deck};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Side {
    #[strum(to_string = "player")]
    User,
    #[strum(to_string = "bot")]
    Bot,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::User => Self::Bot,
            Self::Bot => Self::User,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

/// What happened on one turn. `card` is `None` when the player passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub side: Side,
    pub card: Option<PlayingCard>,
}

impl TurnReport {
    pub fn describe(&self) -> String {
        let who = match self.side {
            Side::User => "You",
            Side::Bot => "The bot",
        };
        match self.card {
            None => format!("{who} passed."),
            Some(card) => match card.kind() {
                CardKind::Damage => format!("{who} dealt {} damage.", card.value()),
                CardKind::Heal => format!("{who} healed {} hit points.", card.value()),
                CardKind::SwapHands => format!("{who} swapped hands."),
            },
        }
    }
}

/// A battle between the user and the bot. The user moves first.
#[derive(Clone, Debug)]
pub struct Game {
    user: Player,
    bot: Player,
    turn: Side,
    turns_played: u32,
}

impl Game {
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Self {
        let user = Player::new("You", config.hit_points, generate_deck(config.deck_size, rng));
        let bot = Player::new("Bot", config.hit_points, generate_deck(config.deck_size, rng));
        Self::with_players(user, bot, config.hand_size)
    }

    /// Starts a game from prepared players, dealing `hand_size` cards each.
    pub fn with_players(mut user: Player, mut bot: Player, hand_size: usize) -> Self {
        user.draw_hand(hand_size);
        bot.draw_hand(hand_size);
        tracing::debug!(
            "New game: {} vs {} hit points",
            user.hit_points(),
            bot.hit_points()
        );
        Self {
            user,
            bot,
            turn: Side::User,
            turns_played: 0,
        }
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::User => &self.user,
            Side::Bot => &self.bot,
        }
    }

    fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::User => &mut self.user,
            Side::Bot => &mut self.bot,
        }
    }

    /// Over once a player is defeated or neither player holds a card.
    pub fn is_over(&self) -> bool {
        self.user.is_defeated()
            || self.bot.is_defeated()
            || (self.user.hand().is_empty() && self.bot.hand().is_empty())
    }

    /// `None` while the game is still running.
    pub fn winner(&self) -> Option<Outcome> {
        if !self.is_over() {
            return None;
        }
        let outcome = match (self.user.is_defeated(), self.bot.is_defeated()) {
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::Winner(Side::Bot),
            (false, true) => Outcome::Winner(Side::User),
            (false, false) => match self.user.hit_points().cmp(&self.bot.hit_points()) {
                std::cmp::Ordering::Greater => Outcome::Winner(Side::User),
                std::cmp::Ordering::Less => Outcome::Winner(Side::Bot),
                std::cmp::Ordering::Equal => Outcome::Draw,
            },
        };
        Some(outcome)
    }

    pub fn play_user_card(&mut self, index: usize) -> Result<TurnReport> {
        self.check_turn(Side::User)?;
        self.play(Side::User, index)
    }

    /// The bot always plays the last card in its hand, or passes.
    pub fn bot_turn(&mut self) -> Result<TurnReport> {
        self.check_turn(Side::Bot)?;
        match self.bot.hand().len() {
            0 => self.pass_turn(),
            n => self.play(Side::Bot, n - 1),
        }
    }

    /// Passes for the active player, which is only legal with an empty hand.
    pub fn pass_turn(&mut self) -> Result<TurnReport> {
        let side = self.turn;
        self.check_turn(side)?;
        let held = self.player(side).hand().len();
        if held > 0 {
            return Err(GameError::MustPlay(held));
        }
        self.end_turn();
        Ok(TurnReport { side, card: None })
    }

    fn check_turn(&self, side: Side) -> Result<()> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if self.turn != side {
            return Err(GameError::NotYourTurn(self.turn));
        }
        Ok(())
    }

    fn play(&mut self, side: Side, index: usize) -> Result<TurnReport> {
        let card = self.player_mut(side).take_card(index)?;
        let value = i32::from(card.value());
        match card.kind() {
            CardKind::Damage => self.player_mut(side.opponent()).take_damage(value),
            CardKind::Heal => self.player_mut(side).heal(value),
            CardKind::SwapHands => {
                std::mem::swap(self.user.hand_mut(), self.bot.hand_mut());
            }
        }
        self.player_mut(side).draw();
        tracing::debug!("{} played {}", side, card.label());
        self.end_turn();
        Ok(TurnReport {
            side,
            card: Some(card),
        })
    }

    fn end_turn(&mut self) {
        self.turns_played += 1;
        self.turn = self.turn.opponent();
    }
}
