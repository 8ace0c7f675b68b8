use console_ui::{ConsoleWindow, Key, Menu, MenuEvent, RedrawFlag, Scene, SceneCommand, SceneId};

use super::{MAIN_MENU, SETTINGS, draw_footer, draw_frame, draw_notice};
use crate::state::AppState;

const ENTRIES: [&str; 6] = [
    "More Cards",
    "Fewer Cards",
    "More Time",
    "Less Time",
    "Reset Defaults",
    "Back",
];

/// Adjusts the card limit and study time. Every change is saved at once.
pub struct SettingsScene {
    menu: Menu,
    notice: Option<String>,
    redraw: RedrawFlag,
}

impl SettingsScene {
    pub fn new() -> Self {
        Self {
            menu: Menu::from_labels(ENTRIES),
            notice: None,
            redraw: RedrawFlag::new(),
        }
    }

    fn apply(&mut self, entry: usize, state: &mut AppState) -> SceneCommand<AppState> {
        let settings = &mut state.settings;
        match entry {
            0 => settings.inc_flash_card_limit(),
            1 => settings.dec_flash_card_limit(),
            2 => settings.inc_study_duration(),
            3 => settings.dec_study_duration(),
            4 => settings.reset(),
            _ => return SceneCommand::SwitchTo(MAIN_MENU.clone()),
        }
        self.notice = state.save_settings();
        self.redraw.set();
        SceneCommand::None
    }
}

impl Default for SettingsScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<AppState> for SettingsScene {
    fn id(&self) -> &SceneId {
        &SETTINGS
    }

    fn handle_input(&mut self, key: Key, state: &mut AppState) -> SceneCommand<AppState> {
        match self.menu.handle_key(key) {
            MenuEvent::Moved => {
                self.redraw.set();
                SceneCommand::None
            }
            MenuEvent::Activated(entry) => self.apply(entry, state),
            MenuEvent::Ignored if key == Key::Esc => SceneCommand::SwitchTo(MAIN_MENU.clone()),
            MenuEvent::Ignored => SceneCommand::None,
        }
    }

    fn render(&mut self, window: &mut ConsoleWindow, state: &AppState) {
        draw_frame(window, "Settings");
        let settings = &state.settings;
        window.draw_centered_text(
            4,
            &format!("Cards per session: {}", settings.flash_card_limit()),
        );
        window.draw_centered_text(
            5,
            &format!("Study time: {} min", settings.study_duration_min()),
        );
        self.menu.draw_centered(window, 8);
        draw_notice(window, self.notice.as_deref());
        draw_footer(window, "Up/Down: move   Enter: apply   Esc: back");
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

    fn on_enter(&mut self, _state: &mut AppState) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::test_support::{screen, state_with};

    #[test]
    fn adjusts_and_resets_limits() {
        let mut state = state_with(vec![]);
        let mut scene = SettingsScene::new();

        scene.handle_input(Key::Enter, &mut state);
        scene.handle_input(Key::Enter, &mut state);
        assert_eq!(state.settings.flash_card_limit(), 17);

        scene.handle_input(Key::Down, &mut state);
        scene.handle_input(Key::Down, &mut state);
        scene.handle_input(Key::Enter, &mut state);
        assert_eq!(state.settings.study_duration_min(), 26);

        scene.clear_redraw();
        scene.handle_input(Key::Down, &mut state);
        scene.handle_input(Key::Down, &mut state);
        scene.handle_input(Key::Enter, &mut state);
        assert!(scene.needs_redraw());
        assert_eq!(state.settings.flash_card_limit(), 15);
        assert_eq!(state.settings.study_duration_min(), 25);

        scene.handle_input(Key::Down, &mut state);
        assert!(matches!(
            scene.handle_input(Key::Enter, &mut state),
            SceneCommand::SwitchTo(id) if id == MAIN_MENU
        ));
    }

    #[test]
    fn shows_current_values() {
        let mut state = state_with(vec![]);
        state.settings.set_flash_card_limit(40);
        let mut window = ConsoleWindow::new(24, 80);
        SettingsScene::new().render(&mut window, &state);
        let text = screen(&window);
        assert!(text.contains("Cards per session: 40"));
        assert!(text.contains("Study time: 25 min"));
    }
}
