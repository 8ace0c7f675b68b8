use console_ui::{
    ConsoleWindow, Key, Menu, MenuEvent, Orientation, RedrawFlag, Scene, SceneCommand, SceneId,
};
use game_battle::{Game, Outcome, Player, Side, TurnReport};
use ratatui::style::{Color, Modifier, Style};

use super::{GAME, MAIN_MENU, draw_footer, draw_frame, draw_notice};
use crate::art::{HEART, SLIME};
use crate::state::AppState;

const LOG_LINES: usize = 4;
const HP_BAR_WIDTH: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Playing,
    Over { outcome: Outcome, forfeited: bool },
}

/// Card battle against the bot. Every entry deals a fresh game.
pub struct GameScene {
    game: Option<Game>,
    hand: Menu,
    log: Vec<String>,
    phase: Phase,
    notice: Option<String>,
    redraw: RedrawFlag,
}

impl GameScene {
    pub fn new() -> Self {
        Self {
            game: None,
            hand: Menu::new(0),
            log: Vec::new(),
            phase: Phase::Playing,
            notice: None,
            redraw: RedrawFlag::new(),
        }
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Over { .. })
    }

    /// Replaces the current game, e.g. with a prepared one in tests.
    pub fn start(&mut self, game: Game) {
        self.game = Some(game);
        self.phase = Phase::Playing;
        self.log = vec!["A slime blocks the way!".to_string()];
        self.notice = None;
        self.rebuild_hand();
        self.redraw.set();
    }

    fn rebuild_hand(&mut self) {
        let selected = self.hand.selected_index();
        let labels = self
            .game
            .as_ref()
            .map(|game| {
                game.player(Side::User)
                    .hand()
                    .iter()
                    .map(|card| format!(" {} ", card.label()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        let count = labels.len();
        self.hand = Menu::from_labels(labels).with_orientation(Orientation::Horizontal);
        if count > 0 {
            self.hand.select(selected.min(count - 1));
        }
    }

    fn record(&mut self, report: TurnReport) {
        self.log.push(report.describe());
        if self.log.len() > LOG_LINES {
            self.log.remove(0);
        }
    }

    /// Plays the selected card (or passes with an empty hand), then lets the
    /// bot answer.
    fn play_turn(&mut self) {
        let selected = self.hand.selected_index();
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let user_move = if game.player(Side::User).hand().is_empty() {
            game.pass_turn()
        } else {
            game.play_user_card(selected)
        };
        let bot_move = match user_move {
            Ok(report) => {
                let bot = (!game.is_over()).then(|| game.bot_turn());
                self.record(report);
                bot
            }
            Err(e) => {
                tracing::warn!("Rejected move: {}", e);
                self.notice = Some(e.to_string());
                None
            }
        };
        match bot_move {
            Some(Ok(report)) => self.record(report),
            Some(Err(e)) => tracing::warn!("Bot move failed: {}", e),
            None => {}
        }

        if let Some(outcome) = self.game.as_ref().and_then(Game::winner) {
            tracing::info!("Game over: {:?}", outcome);
            self.phase = Phase::Over {
                outcome,
                forfeited: false,
            };
        }
        self.rebuild_hand();
        self.redraw.set();
    }

    fn forfeit(&mut self) {
        tracing::info!("Player forfeited the game");
        self.phase = Phase::Over {
            outcome: Outcome::Winner(Side::Bot),
            forfeited: true,
        };
        self.redraw.set();
    }

    fn draw_player(window: &mut ConsoleWindow, player: &Player, art: &str, x: usize) {
        let height = window
            .ansi_art(art)
            .map(|art| art.height())
            .unwrap_or_default();
        if let Err(e) = window.draw_ansi_art(art, x, 3) {
            tracing::debug!("Skipping art: {}", e);
        }
        let y = 3 + height + 1;
        window.draw_text(x, y, player.name());
        let colour = if player.hit_points().saturating_mul(4) <= player.max_hit_points() {
            Color::Red
        } else {
            Color::Green
        };
        window.draw_styled_text(
            x,
            y + 1,
            &hp_bar(player.hit_points(), player.max_hit_points()),
            Style::default().fg(colour),
        );
        window.draw_text(
            x,
            y + 2,
            &format!(
                "HP {}/{}  deck {}",
                player.hit_points().max(0),
                player.max_hit_points(),
                player.deck().len()
            ),
        );
    }
}

fn hp_bar(hit_points: i32, max: i32) -> String {
    let max = max.max(1);
    let filled = (hit_points.clamp(0, max) as usize * HP_BAR_WIDTH).div_ceil(max as usize);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(HP_BAR_WIDTH - filled)
    )
}

impl Default for GameScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<AppState> for GameScene {
    fn id(&self) -> &SceneId {
        &GAME
    }

    fn handle_input(&mut self, key: Key, _state: &mut AppState) -> SceneCommand<AppState> {
        if self.is_over() {
            if key == Key::Enter {
                return SceneCommand::SwitchTo(MAIN_MENU.clone());
            }
            return SceneCommand::None;
        }

        match key {
            Key::Esc => self.forfeit(),
            Key::Enter => self.play_turn(),
            _ => {
                if self.hand.handle_key(key) == MenuEvent::Moved {
                    self.redraw.set();
                }
            }
        }
        SceneCommand::None
    }

    fn render(&mut self, window: &mut ConsoleWindow, _state: &AppState) {
        draw_frame(window, "Dungeon Battle");
        let Some(game) = &self.game else {
            return;
        };

        Self::draw_player(window, game.player(Side::User), HEART, 4);
        let slime_width = window
            .ansi_art(SLIME)
            .map(|art| art.display_width())
            .unwrap_or_default()
            .max(HP_BAR_WIDTH + 2);
        let bot_x = window.cols().saturating_sub(slime_width + 4);
        Self::draw_player(window, game.player(Side::Bot), SLIME, bot_x);

        for (row, line) in self.log.iter().enumerate() {
            window.draw_centered_text(13 + row, line);
        }

        let bold = Style::default().add_modifier(Modifier::BOLD);
        match self.phase {
            Phase::Playing => {
                let hand_row = 18;
                if self.hand.is_empty() {
                    window.draw_centered_text(hand_row, "Your hand is empty. Enter to pass.");
                } else {
                    window.draw_text(4, hand_row - 1, "Your hand:");
                    self.hand.draw_centered(window, hand_row);
                }
                draw_footer(window, "Left/Right: choose card   Enter: play   Esc: flee");
            }
            Phase::Over { outcome, forfeited } => {
                let message = match outcome {
                    _ if forfeited => "You fled the dungeon.",
                    Outcome::Winner(Side::User) => "Victory! The slime is defeated.",
                    Outcome::Winner(Side::Bot) => "Defeat... the slime wins.",
                    Outcome::Draw => "A draw. Both fighters stand.",
                };
                window.draw_centered_styled_text(18, message, bold);
                draw_footer(window, "Enter: return to the main menu");
            }
        }
        draw_notice(window, self.notice.as_deref());
    }

    fn needs_redraw(&self) -> bool {
        self.redraw.get()
    }

    fn request_redraw(&mut self) {
        self.redraw.set();
    }

    fn clear_redraw(&mut self) {
        self.redraw.clear();
    }

    fn menu(&self) -> Option<&Menu> {
        Some(&self.hand)
    }

    fn on_enter(&mut self, state: &mut AppState) {
        let game = Game::new(state.game_config, &mut state.rng);
        tracing::info!("Starting a new game");
        self.start(game);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::art::register_art;
    use crate::scenes::test_support::{screen, state_with};
    use game_battle::{CardKind, PlayingCard};

    fn rigged(user_cards: Vec<PlayingCard>, bot_cards: Vec<PlayingCard>, hp: i32) -> Game {
        let hand = user_cards.len().max(bot_cards.len());
        Game::with_players(
            Player::new("You", hp, user_cards),
            Player::new("Bot", hp, bot_cards),
            hand,
        )
    }

    #[test]
    fn entering_deals_a_fresh_game() {
        let mut state = state_with(vec![]);
        let mut scene = GameScene::new();
        scene.on_enter(&mut state);
        let hand = scene.game().unwrap().player(Side::User).hand().len();
        assert_eq!(hand, state.game_config.hand_size);
        assert_eq!(scene.hand.button_count(), hand);
        assert!(!scene.is_over());
    }

    #[test]
    fn playing_a_card_triggers_bot_turn() {
        let mut state = state_with(vec![]);
        let mut scene = GameScene::new();
        scene.start(rigged(
            // Hands are drawn from the end of the deck.
            vec![PlayingCard::new(CardKind::Heal, 2), PlayingCard::new(CardKind::Damage, 3)],
            vec![PlayingCard::new(CardKind::Damage, 4), PlayingCard::new(CardKind::Heal, 1)],
            20,
        ));

        scene.handle_input(Key::Enter, &mut state);
        let game = scene.game().unwrap();
        assert_eq!(game.turn(), Side::User);
        assert_eq!(game.player(Side::Bot).hit_points(), 17);
        assert_eq!(game.player(Side::User).hit_points(), 16);
        assert_eq!(scene.log.len(), 3);
        assert_eq!(scene.hand.button_count(), 1);
    }

    #[test]
    fn lethal_card_ends_game() {
        let mut state = state_with(vec![]);
        let mut scene = GameScene::new();
        scene.start(rigged(
            vec![PlayingCard::new(CardKind::Damage, 9)],
            vec![PlayingCard::new(CardKind::Damage, 9)],
            5,
        ));
        scene.handle_input(Key::Enter, &mut state);
        assert!(scene.is_over());
        assert_eq!(scene.game().unwrap().winner(), Some(Outcome::Winner(Side::User)));

        let mut window = ConsoleWindow::new(24, 80);
        register_art(&mut window).unwrap();
        scene.render(&mut window, &state);
        assert!(screen(&window).contains("Victory!"));

        assert!(matches!(scene.handle_input(Key::Left, &mut state), SceneCommand::None));
        assert!(matches!(
            scene.handle_input(Key::Enter, &mut state),
            SceneCommand::SwitchTo(id) if id == MAIN_MENU
        ));
    }

    #[test]
    fn escape_forfeits() {
        let mut state = state_with(vec![]);
        let mut scene = GameScene::new();
        scene.on_enter(&mut state);
        scene.handle_input(Key::Esc, &mut state);
        assert!(scene.is_over());

        let mut window = ConsoleWindow::new(24, 80);
        register_art(&mut window).unwrap();
        scene.render(&mut window, &state);
        assert!(screen(&window).contains("You fled"));

        scene.on_enter(&mut state);
        assert!(!scene.is_over());
    }

    #[test]
    fn empty_hand_passes() {
        let mut state = state_with(vec![]);
        let mut scene = GameScene::new();
        scene.start(rigged(
            vec![],
            vec![PlayingCard::new(CardKind::Heal, 1), PlayingCard::new(CardKind::Heal, 1)],
            10,
        ));
        assert!(scene.hand.is_empty());
        scene.handle_input(Key::Enter, &mut state);
        assert_eq!(scene.log.last().map(String::as_str), Some("The bot healed 1 hit points."));
        assert!(scene.notice.is_none());
    }

    #[test]
    fn hp_bar_scales() {
        assert_eq!(hp_bar(100, 100), format!("[{}]", "#".repeat(16)));
        assert_eq!(hp_bar(0, 100), format!("[{}]", "-".repeat(16)));
        assert_eq!(hp_bar(-5, 100), format!("[{}]", "-".repeat(16)));
        assert_eq!(hp_bar(50, 100), format!("[{}{}]", "#".repeat(8), "-".repeat(8)));
        assert_eq!(hp_bar(i32::MAX, i32::MAX), format!("[{}]", "#".repeat(16)));
    }
}
