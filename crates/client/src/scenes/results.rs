use console_ui::{ConsoleWindow, Key, Menu, MenuEvent, RedrawFlag, Scene, SceneCommand, SceneId};

use super::{BROWSE_DECKS, GAME, MAIN_MENU, RESULTS, draw_footer, draw_frame};
use crate::state::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    MainMenu,
    DeckSelection,
    PlayGame,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Self::MainMenu => "Main Menu",
            Self::DeckSelection => "Deck Selection",
            Self::PlayGame => "Play Game",
        }
    }

    fn target(self) -> &'static SceneId {
        match self {
            Self::MainMenu => &MAIN_MENU,
            Self::DeckSelection => &BROWSE_DECKS,
            Self::PlayGame => &GAME,
        }
    }
}

/// Summary of the last study session. The game is offered only after a
/// completed session.
pub struct ResultsScene {
    actions: Vec<Action>,
    menu: Menu,
    redraw: RedrawFlag,
}

impl ResultsScene {
    pub fn new() -> Self {
        let mut scene = Self {
            actions: Vec::new(),
            menu: Menu::new(0),
            redraw: RedrawFlag::new(),
        };
        scene.rebuild(false);
        scene
    }

    fn rebuild(&mut self, game_unlocked: bool) {
        self.actions = vec![Action::MainMenu, Action::DeckSelection];
        if game_unlocked {
            self.actions.push(Action::PlayGame);
        }
        self.menu = Menu::from_labels(self.actions.iter().map(|action| action.label()));
    }
}

impl Default for ResultsScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<AppState> for ResultsScene {
    fn id(&self) -> &SceneId {
        &RESULTS
    }

    fn handle_input(&mut self, key: Key, _state: &mut AppState) -> SceneCommand<AppState> {
        match self.menu.handle_key(key) {
            MenuEvent::Moved => {
                self.redraw.set();
                SceneCommand::None
            }
            MenuEvent::Activated(index) => match self.actions.get(index) {
                Some(action) => SceneCommand::SwitchTo(action.target().clone()),
                None => SceneCommand::None,
            },
            MenuEvent::Ignored if key == Key::Esc => SceneCommand::SwitchTo(MAIN_MENU.clone()),
            MenuEvent::Ignored => SceneCommand::None,
        }
    }

    fn render(&mut self, window: &mut ConsoleWindow, state: &AppState) {
        draw_frame(window, "Session Results");
        let summary = state.last_summary.unwrap_or_default();
        let heading = if summary.completed {
            "Session complete!"
        } else {
            "Session stopped early."
        };
        window.draw_centered_text(3, heading);
        window.draw_centered_text(5, &format!("Easy:   {:>3}", summary.easy));
        window.draw_centered_text(6, &format!("Medium: {:>3}", summary.medium));
        window.draw_centered_text(7, &format!("Hard:   {:>3}", summary.hard));
        window.draw_centered_text(
            9,
            &format!("Score: {} / {}", summary.score(), summary.max_score()),
        );
        if !summary.completed {
            window.draw_centered_text(11, "Finish a session to challenge the dungeon.");
        }
        self.menu.draw_centered(window, 13);
        draw_footer(window, "Up/Down: move   Enter: select");
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
        Some(&self.menu)
    }

    fn on_enter(&mut self, state: &mut AppState) {
        self.rebuild(state.game_unlocked());
    }
}
