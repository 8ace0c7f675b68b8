use console_ui::{ConsoleWindow, Key, Menu, MenuEvent, RedrawFlag, Scene, SceneCommand, SceneId};

use super::{BROWSE_DECKS, EDIT_DECKS, HOWTO, MAIN_MENU, SETTINGS, draw_footer};
use crate::art::TITLE;
use crate::state::AppState;

const ENTRIES: [&str; 5] = ["Begin Study", "Edit Decks", "Settings", "About Program", "Exit Program"];

/// Title screen and entry point to every other scene.
pub struct MainMenuScene {
    menu: Menu,
    redraw: RedrawFlag,
}

impl MainMenuScene {
    pub fn new() -> Self {
        Self {
            menu: Menu::from_labels(ENTRIES.map(|label| format!(" {label} "))),
            redraw: RedrawFlag::new(),
        }
    }
}

impl Default for MainMenuScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<AppState> for MainMenuScene {
    fn id(&self) -> &SceneId {
        &MAIN_MENU
    }

    fn handle_input(&mut self, key: Key, _state: &mut AppState) -> SceneCommand<AppState> {
        match self.menu.handle_key(key) {
            MenuEvent::Moved => {
                self.redraw.set();
                SceneCommand::None
            }
            MenuEvent::Activated(0) => SceneCommand::SwitchTo(BROWSE_DECKS.clone()),
            MenuEvent::Activated(1) => SceneCommand::SwitchTo(EDIT_DECKS.clone()),
            MenuEvent::Activated(2) => SceneCommand::SwitchTo(SETTINGS.clone()),
            MenuEvent::Activated(3) => SceneCommand::SwitchTo(HOWTO.clone()),
            MenuEvent::Activated(_) => SceneCommand::Quit,
            MenuEvent::Ignored if key == Key::Esc => SceneCommand::Quit,
            MenuEvent::Ignored => SceneCommand::None,
        }
    }

    fn render(&mut self, window: &mut ConsoleWindow, _state: &AppState) {
        window.clear();
        window.draw_border();

        let mut menu_row = 3;
        let title = window
            .ascii_art(TITLE)
            .map(|art| (art.width(), art.height(), usize::from(art.y())));
        if let Ok((width, height, y)) = title {
            let x = window.centered_x(width);
            if window.draw_ascii_art(TITLE, x, y).is_ok() {
                menu_row = y + height + 2;
            }
        }

        self.menu.draw_centered(window, menu_row);
        draw_footer(window, "Up/Down: move   Enter: select   Esc: quit");
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
}
