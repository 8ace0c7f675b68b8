use console_ui::{ConsoleWindow, Key, RedrawFlag, Scene, SceneCommand, SceneId};

use super::{HOWTO, MAIN_MENU, draw_footer, draw_frame};
use crate::state::AppState;

const PARAGRAPHS: [&str; 4] = [
    "Study Dungeon is a flashcard trainer with a reward. Pick a deck under Begin Study and work through its cards before the study timer runs out.",
    "Press Space to reveal the answer, then rate the card Easy, Medium or Hard. The rating is saved with the card together with how often you answered it.",
    "Finish a session to unlock a card battle against a slime. Damage cards hurt the slime, heal cards restore your hit points and swap cards trade hands.",
    "Decks are plain text files in the deck directory. Use Edit Decks to create, rename or delete decks and to edit their cards.",
];

/// Static help text.
pub struct HowToScene {
    redraw: RedrawFlag,
}

impl HowToScene {
    pub fn new() -> Self {
        Self {
            redraw: RedrawFlag::new(),
        }
    }
}

impl Default for HowToScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<AppState> for HowToScene {
    fn id(&self) -> &SceneId {
        &HOWTO
    }

    fn handle_input(&mut self, key: Key, _state: &mut AppState) -> SceneCommand<AppState> {
        match key {
            Key::Enter | Key::Esc | Key::Backspace => SceneCommand::SwitchTo(MAIN_MENU.clone()),
            _ => SceneCommand::None,
        }
    }

    fn render(&mut self, window: &mut ConsoleWindow, state: &AppState) {
        draw_frame(window, "About Study Dungeon");
        let width = window.cols().saturating_sub(8);
        let mut y = 3;
        for paragraph in PARAGRAPHS {
            y += window.draw_wrapped_text(4, y, width, paragraph) + 1;
        }
        window.draw_text(
            4,
            y,
            &format!("Deck directory: {}", state.settings.deck_dir().display()),
        );
        draw_footer(window, "Enter/Esc: back");
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
}
