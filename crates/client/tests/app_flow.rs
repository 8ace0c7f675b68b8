//! Headless runs of the whole application with scripted input.

use console_ui::{InputEvent, Key, ScriptedInput};
use ratatui::{Terminal, backend::TestBackend};
use study_core::{FlashCard, FlashCardDeck, InMemoryDeckRepository, StudySettings};
use study_dungeon::scenes::{EDIT_DECKS, GAME, MAIN_MENU};
use study_dungeon::{App, AppConfig};
use tempfile::TempDir;

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(80, 24)).unwrap()
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn memory_app(decks: Vec<FlashCardDeck>) -> App {
    let mut config = AppConfig::with_data_dir("unused");
    config.seed = Some(7);
    App::builder()
        .config(config)
        .repository(InMemoryDeckRepository::with_decks(decks))
        .settings(StudySettings::default())
        .build()
        .unwrap()
}

fn type_text(text: &str) -> Vec<Key> {
    text.chars()
        .map(|ch| if ch == ' ' { Key::Space } else { Key::Char(ch) })
        .collect()
}

#[test]
fn first_frame_shows_main_menu() {
    let mut app = memory_app(vec![FlashCardDeck::new("Empty")]);
    let mut terminal = terminal();
    app.run(&mut terminal, &mut ScriptedInput::from_keys(Vec::<Key>::new()))
        .unwrap();

    assert_eq!(app.manager().current_scene_id(), Some(&MAIN_MENU));
    let text = screen(&terminal);
    assert!(text.contains("Begin Study"));
    assert!(text.contains("Exit Program"));
}

#[test]
fn completed_session_unlocks_the_game() {
    let deck = FlashCardDeck::with_cards(
        "Colours",
        vec![FlashCard::new("#FFF?", "White"), FlashCard::new("#000?", "Black")],
    );
    let mut app = memory_app(vec![deck]);
    let mut terminal = terminal();

    let mut keys = vec![Key::Enter, Key::Enter];
    keys.extend([Key::Space, Key::Enter, Key::Space, Key::Enter]);
    keys.extend([Key::Down, Key::Down, Key::Enter]);
    app.run(&mut terminal, &mut ScriptedInput::from_keys(keys))
        .unwrap();

    assert_eq!(app.manager().current_scene_id(), Some(&GAME));
    let summary = app.state().last_summary.unwrap();
    assert!(summary.completed);
    assert_eq!(summary.easy, 2);

    let deck = app.state().library.find("Colours").unwrap();
    assert!(deck.cards.iter().all(|card| card.times_answered == 1));
    assert!(screen(&terminal).contains("Dungeon Battle"));
}

#[test]
fn stopping_early_keeps_the_game_locked() {
    let mut app = memory_app(vec![FlashCardDeck::with_cards(
        "One",
        vec![FlashCard::new("q", "a"), FlashCard::new("q2", "a2")],
    )]);
    let mut terminal = terminal();
    let keys = [Key::Enter, Key::Enter, Key::Esc, Key::Down, Key::Down, Key::Enter];
    app.run(&mut terminal, &mut ScriptedInput::from_keys(keys))
        .unwrap();

    // Only two buttons: the last Enter picks "Deck Selection".
    assert!(!app.state().last_summary.unwrap().completed);
    assert_ne!(app.manager().current_scene_id(), Some(&GAME));
    assert!(!app.state().settings.session_underway());
}

#[test]
fn exit_program_quits_before_input_runs_out() {
    let mut app = memory_app(vec![]);
    let mut terminal = terminal();
    let mut input = ScriptedInput::from_keys([
        Key::Down,
        Key::Down,
        Key::Down,
        Key::Down,
        Key::Enter,
        Key::Up,
        Key::Up,
    ]);
    app.run(&mut terminal, &mut input).unwrap();
    assert_eq!(input.remaining(), 2);
}

#[test]
fn resize_reaches_the_window() {
    let mut app = memory_app(vec![]);
    let mut terminal = terminal();
    let mut input = ScriptedInput::new([InputEvent::Resize { cols: 100, rows: 30 }]);
    app.run(&mut terminal, &mut input).unwrap();
    assert_eq!(app.manager().window().size(), (30, 100));
}

#[test]
fn decks_and_settings_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::with_data_dir(dir.path());

    let mut app = App::builder().config(config.clone()).build().unwrap();
    let examples = app.state().library.len();
    assert!(examples > 0);

    let mut keys = vec![Key::Down, Key::Enter, Key::Char('a')];
    keys.extend(type_text("Biology"));
    keys.extend([Key::Enter, Key::Esc]);
    keys.extend([Key::Down, Key::Enter, Key::Enter, Key::Enter]);
    app.run(&mut terminal(), &mut ScriptedInput::from_keys(keys))
        .unwrap();
    assert_eq!(app.manager().current_scene_id().map(|id| id.as_str()), Some("settings"));
    assert!(config.deck_dir.join("biology.deck").exists());

    let reopened = App::builder().config(config).build().unwrap();
    let state = reopened.state();
    assert_eq!(state.library.len(), examples + 1);
    assert!(state.library.find("Biology").is_some());
    assert_eq!(state.settings.flash_card_limit(), 17);
}

#[test]
fn edit_decks_scene_is_reachable() {
    let mut app = memory_app(vec![FlashCardDeck::new("Art")]);
    let mut terminal = terminal();
    app.run(
        &mut terminal,
        &mut ScriptedInput::from_keys([Key::Down, Key::Enter]),
    )
    .unwrap();
    assert_eq!(app.manager().current_scene_id(), Some(&EDIT_DECKS));
    assert!(screen(&terminal).contains("Art"));
}
