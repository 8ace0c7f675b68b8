//! Concrete scenes of the application.
//!
//! Scenes registered at startup use the ids below. The flashcard review and
//! the card editor are opened on demand with the deck they work on.

mod browse_decks;
mod edit_deck;
mod edit_flashcard;
mod flashcard;
mod game;
mod howto;
mod list;
mod main_menu;
mod results;
mod settings;

pub use browse_decks::BrowseDecksScene;
pub use edit_deck::EditDeckScene;
pub use edit_flashcard::EditFlashcardScene;
pub use flashcard::FlashcardScene;
pub use game::GameScene;
pub use howto::HowToScene;
pub use list::ListCursor;
pub use main_menu::MainMenuScene;
pub use results::ResultsScene;
pub use settings::SettingsScene;

use console_ui::{ConsoleWindow, SceneId, UiManager};
use ratatui::style::{Color, Modifier, Style};

use crate::state::AppState;

pub static MAIN_MENU: SceneId = SceneId::from_static("main_menu");
pub static SETTINGS: SceneId = SceneId::from_static("settings");
pub static HOWTO: SceneId = SceneId::from_static("howto");
pub static BROWSE_DECKS: SceneId = SceneId::from_static("browse_decks");
pub static FLASHCARD: SceneId = SceneId::from_static("flashcard");
pub static RESULTS: SceneId = SceneId::from_static("results");
pub static EDIT_DECKS: SceneId = SceneId::from_static("edit_decks");
pub static EDIT_FLASHCARDS: SceneId = SceneId::from_static("edit_flashcards");
pub static GAME: SceneId = SceneId::from_static("game");

/// Rows taken by the frame, title, header and footer around a list.
const LIST_CHROME_ROWS: usize = 9;

/// Registers every scene that exists from startup.
pub fn register_all(manager: &mut UiManager<AppState>) -> console_ui::Result<()> {
    manager.register(Box::new(MainMenuScene::new()))?;
    manager.register(Box::new(SettingsScene::new()))?;
    manager.register(Box::new(HowToScene::new()))?;
    manager.register(Box::new(BrowseDecksScene::new()))?;
    manager.register(Box::new(ResultsScene::new()))?;
    manager.register(Box::new(EditDeckScene::new()))?;
    manager.register(Box::new(GameScene::new()))?;
    Ok(())
}

/// Clears the window, draws the border and a bold centered title.
fn draw_frame(window: &mut ConsoleWindow, title: &str) {
    window.clear();
    window.draw_border();
    let bold = Style::default().add_modifier(Modifier::BOLD);
    window.draw_centered_styled_text(1, title, bold);
}

/// Key hints on the last row inside the border.
fn draw_footer(window: &mut ConsoleWindow, hint: &str) {
    let y = window.rows().saturating_sub(2);
    window.draw_centered_text(y, hint);
}

fn draw_notice(window: &mut ConsoleWindow, notice: Option<&str>) {
    if let Some(text) = notice {
        let y = window.rows().saturating_sub(3);
        window.draw_centered_styled_text(y, text, Style::default().fg(Color::Yellow));
    }
}

/// Items that fit in one list page at the current window size.
fn list_rows(window: &ConsoleWindow) -> usize {
    window.rows().saturating_sub(LIST_CHROME_ROWS).max(1)
}

/// Truncates `text` to `width` characters, marking the cut with `~`.
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('~');
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_long_text() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdefgh", 5), "abcd~");
    }

    #[test]
    fn list_rows_never_zero() {
        assert_eq!(list_rows(&ConsoleWindow::new(24, 80)), 15);
        assert_eq!(list_rows(&ConsoleWindow::new(4, 80)), 1);
    }
}
