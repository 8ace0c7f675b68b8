//! Plays seeded games to completion through the public API.

use game_battle::{Game, GameConfig, GameError, Outcome, Side};
use rand::{SeedableRng, rngs::StdRng};

fn play_out(seed: u64) -> Game {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new(GameConfig::default(), &mut rng);

    while !game.is_over() {
        let report = match game.turn() {
            Side::User if game.player(Side::User).hand().is_empty() => game.pass_turn(),
            Side::User => game.play_user_card(0),
            Side::Bot => game.bot_turn(),
        };
        report.expect("legal move");
    }
    game
}

#[test]
fn every_seeded_game_terminates_with_an_outcome() {
    let config = GameConfig::default();
    for seed in 0..50 {
        let game = play_out(seed);
        assert!(game.winner().is_some(), "seed {seed} has no outcome");
        // Every card is played at most once and a pass is always followed by a play.
        assert!(game.turns_played() as usize <= 4 * config.deck_size + 1);
    }
}

#[test]
fn new_game_deals_opening_hands() {
    let config = GameConfig {
        hand_size: 4,
        deck_size: 10,
        hit_points: 50,
    };
    let game = Game::new(config, &mut StdRng::seed_from_u64(1));
    for side in [Side::User, Side::Bot] {
        let player = game.player(side);
        assert_eq!(player.hand().len(), 4);
        assert_eq!(player.deck().len(), 6);
        assert_eq!(player.hit_points(), 50);
        assert_eq!(player.max_hit_points(), 50);
    }
    assert_eq!(game.winner(), None);
}

#[test]
fn finished_game_rejects_moves() {
    let mut game = play_out(3);
    assert_eq!(game.play_user_card(0), Err(GameError::GameOver));
    assert!(matches!(
        game.winner(),
        Some(Outcome::Draw | Outcome::Winner(_))
    ));
}
