use console_ui::{
    ConsoleWindow, Key, RedrawFlag, Scene, SceneCommand, SceneId, TextInput, TextInputEvent,
};
use ratatui::style::{Modifier, Style};
use study_core::{DeckLibrary, FlashCardDeck};

use super::{
    EDIT_DECKS, EditFlashcardScene, ListCursor, MAIN_MENU, clip, draw_footer, draw_frame,
    draw_notice, list_rows,
};
use crate::state::AppState;

const MAX_NAME_LEN: usize = 40;
const DEFAULT_ROWS: usize = 10;

enum Mode {
    Browse,
    Create(TextInput),
    Rename(TextInput),
    ConfirmDelete,
}

/// Paginated deck list with create, rename and delete.
pub struct EditDeckScene {
    cursor: ListCursor,
    /// Page size fixed by the caller; otherwise it follows the window height.
    page_size: Option<usize>,
    mode: Mode,
    notice: Option<String>,
    redraw: RedrawFlag,
}

impl EditDeckScene {
    pub fn new() -> Self {
        Self {
            cursor: ListCursor::new(DEFAULT_ROWS, 0),
            page_size: None,
            mode: Mode::Browse,
            notice: None,
            redraw: RedrawFlag::new(),
        }
    }

    pub fn current_page(&self) -> usize {
        self.cursor.page()
    }

    pub fn max_cards_per_page(&self) -> usize {
        self.cursor.per_page()
    }

    pub fn selected_deck_index(&self) -> Option<usize> {
        self.cursor.selected()
    }

    pub fn decks<'a>(&self, library: &'a DeckLibrary) -> &'a [FlashCardDeck] {
        library.decks()
    }

    /// Fixes the page size. Rendering no longer derives it from the window.
    pub fn set_max_cards_per_page(&mut self, per_page: usize) {
        self.page_size = Some(per_page);
        self.redraw.mark_if(self.cursor.set_per_page(per_page));
    }

    fn browse(&mut self, key: Key, state: &mut AppState) -> SceneCommand<AppState> {
        let changed = match key {
            Key::Up => self.cursor.select_previous(),
            Key::Down => self.cursor.select_next(),
            Key::Left => self.cursor.previous_page(),
            Key::Right => self.cursor.next_page(),
            Key::Enter => {
                return match self.selected_deck(state) {
                    Some(deck) => {
                        SceneCommand::Open(Box::new(EditFlashcardScene::new(deck.name.clone())))
                    }
                    None => SceneCommand::None,
                };
            }
            Key::Esc | Key::Backspace => return SceneCommand::SwitchTo(MAIN_MENU.clone()),
            key if key.is_char('a') => {
                self.mode = Mode::Create(TextInput::new("New deck name: ", MAX_NAME_LEN));
                true
            }
            key if key.is_char('r') => match self.selected_deck(state) {
                Some(deck) => {
                    let input = TextInput::new("Rename to: ", MAX_NAME_LEN).with_value(&deck.name);
                    self.mode = Mode::Rename(input);
                    true
                }
                None => false,
            },
            key if key.is_char('d') => {
                let selected = self.cursor.selected().is_some();
                if selected {
                    self.mode = Mode::ConfirmDelete;
                }
                selected
            }
            _ => false,
        };
        if changed {
            self.notice = None;
        }
        self.redraw.mark_if(changed);
        SceneCommand::None
    }

    fn selected_deck<'a>(&self, state: &'a AppState) -> Option<&'a FlashCardDeck> {
        self.cursor.selected().and_then(|index| state.library.deck(index))
    }

    fn prompt(&mut self, key: Key, state: &mut AppState) {
        let event = match &mut self.mode {
            Mode::Create(input) | Mode::Rename(input) => input.handle_key(key),
            _ => return,
        };
        match event {
            TextInputEvent::Edited => {
                self.redraw.set();
            }
            TextInputEvent::Ignored => {}
            TextInputEvent::Cancelled => {
                self.mode = Mode::Browse;
                self.redraw.set();
            }
            TextInputEvent::Submitted(name) => {
                let result = match self.mode {
                    Mode::Rename(_) => match self.cursor.selected() {
                        Some(index) => state.library.rename_deck(index, &name),
                        None => Ok(0),
                    },
                    _ => state.library.add_deck(&name),
                };
                self.mode = Mode::Browse;
                match result {
                    Ok(index) => {
                        self.cursor.sync(state.library.len());
                        self.cursor.select(index);
                        tracing::debug!("Deck '{}' saved", name);
                    }
                    Err(e) => self.notice = Some(e.to_string()),
                }
                self.redraw.set();
            }
        }
    }

    fn confirm_delete(&mut self, key: Key, state: &mut AppState) {
        self.mode = Mode::Browse;
        self.redraw.set();
        if !key.is_char('y') {
            return;
        }
        let Some(index) = self.cursor.selected() else {
            return;
        };
        match state.library.delete_deck(index) {
            Ok(deck) => {
                tracing::info!("Deleted deck '{}'", deck.name);
                self.cursor.sync(state.library.len());
            }
            Err(e) => {
                tracing::warn!("Failed to delete deck: {}", e);
                self.notice = Some(e.to_string());
            }
        }
    }
}

impl Default for EditDeckScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<AppState> for EditDeckScene {
    fn id(&self) -> &SceneId {
        &EDIT_DECKS
    }

    fn handle_input(&mut self, key: Key, state: &mut AppState) -> SceneCommand<AppState> {
        match self.mode {
            Mode::Browse => return self.browse(key, state),
            Mode::Create(_) | Mode::Rename(_) => self.prompt(key, state),
            Mode::ConfirmDelete => self.confirm_delete(key, state),
        }
        SceneCommand::None
    }

    fn render(&mut self, window: &mut ConsoleWindow, state: &AppState) {
        let per_page = self.page_size.unwrap_or_else(|| list_rows(window));
        self.cursor.set_per_page(per_page);
        draw_frame(window, "Edit Decks");

        let decks = self.decks(&state.library);
        let top = 4;
        if decks.is_empty() {
            window.draw_centered_text(top, "No decks yet. Press A to create one.");
        } else {
            let width = window.cols().saturating_sub(8);
            let highlight = Style::default().add_modifier(Modifier::REVERSED);
            for (row, index) in self.cursor.visible_range().enumerate() {
                let Some(deck) = decks.get(index) else {
                    continue;
                };
                let label = clip(&format!("{:<30} {:>4} cards", deck.name, deck.len()), width);
                let style = if Some(index) == self.cursor.selected() {
                    highlight
                } else {
                    Style::default()
                };
                window.draw_styled_text(4, top + row, &label, style);
            }
            window.draw_text(
                4,
                2,
                &format!("Page {}/{}", self.cursor.page() + 1, self.cursor.page_count()),
            );
        }

        let prompt_row = window.rows().saturating_sub(4);
        match &self.mode {
            Mode::Create(input) | Mode::Rename(input) => input.draw(window, 4, prompt_row),
            Mode::ConfirmDelete => {
                if let Some(deck) = self.selected_deck(state) {
                    window.draw_text(
                        4,
                        prompt_row,
                        &format!("Delete '{}' and all its cards? (y/n)", deck.name),
                    );
                }
            }
            Mode::Browse => {}
        }

        draw_notice(window, self.notice.as_deref());
        let hint = match self.mode {
            Mode::Browse => "Enter: cards  A: add  R: rename  D: delete  Left/Right: page  Esc: back",
            Mode::ConfirmDelete => "Y: delete   any other key: cancel",
            _ => "Enter: confirm   Esc: cancel",
        };
        draw_footer(window, hint);
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

    fn on_enter(&mut self, state: &mut AppState) {
        self.mode = Mode::Browse;
        self.notice = None;
        self.cursor.sync(state.library.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::EDIT_FLASHCARDS;
    use crate::scenes::test_support::{numbered_deck, screen, state_with};

    fn seven_decks() -> AppState {
        state_with(
            ["A", "B", "C", "D", "E", "F", "G"]
                .into_iter()
                .map(|name| numbered_deck(name, 1))
                .collect(),
        )
    }

    fn type_text(scene: &mut EditDeckScene, state: &mut AppState, text: &str) {
        for ch in text.chars() {
            let key = if ch == ' ' { Key::Space } else { Key::Char(ch) };
            scene.handle_input(key, state);
        }
    }

    #[test]
    fn paging_stops_at_last_page() {
        let mut state = seven_decks();
        let mut scene = EditDeckScene::new();
        scene.on_enter(&mut state);
        scene.set_max_cards_per_page(3);
        assert_eq!(scene.decks(&state.library).len(), 7);

        for _ in 0..5 {
            scene.handle_input(Key::Right, &mut state);
        }
        assert_eq!(scene.current_page(), 2);
        assert_eq!(scene.selected_deck_index(), Some(6));

        scene.handle_input(Key::Left, &mut state);
        assert_eq!(scene.current_page(), 1);
        assert_eq!(scene.selected_deck_index(), Some(3));
        scene.handle_input(Key::Up, &mut state);
        assert_eq!(scene.current_page(), 0);
        assert_eq!(scene.selected_deck_index(), Some(2));
    }

    #[test]
    fn page_size_follows_window_unless_fixed() {
        let mut state = seven_decks();
        let mut scene = EditDeckScene::new();
        scene.on_enter(&mut state);
        let mut window = ConsoleWindow::new(24, 80);

        scene.render(&mut window, &state);
        assert_eq!(scene.max_cards_per_page(), list_rows(&window));
        assert!(screen(&window).contains("Page 1/1"));

        scene.set_max_cards_per_page(3);
        scene.render(&mut window, &state);
        assert_eq!(scene.max_cards_per_page(), 3);
        assert!(screen(&window).contains("Page 1/3"));
    }

    #[test]
    fn every_mutation_requests_redraw() {
        let mut state = seven_decks();
        let mut scene = EditDeckScene::new();
        scene.on_enter(&mut state);
        scene.set_max_cards_per_page(3);
        for key in [Key::Down, Key::Right, Key::Left, Key::Char('a'), Key::Char('x'), Key::Esc] {
            scene.clear_redraw();
            scene.handle_input(key, &mut state);
            assert!(scene.needs_redraw(), "{key:?} left the scene clean");
        }

        // Already at the first deck: nothing changes, nothing to repaint.
        scene.clear_redraw();
        scene.handle_input(Key::Up, &mut state);
        assert!(!scene.needs_redraw());
    }

    #[test]
    fn creates_renames_and_deletes() {
        let mut state = state_with(vec![numbered_deck("Math", 2)]);
        let mut scene = EditDeckScene::new();
        scene.on_enter(&mut state);

        scene.handle_input(Key::Char('a'), &mut state);
        type_text(&mut scene, &mut state, "Art History");
        scene.handle_input(Key::Enter, &mut state);
        assert_eq!(state.library.len(), 2);
        assert_eq!(scene.selected_deck_index(), Some(0));

        scene.handle_input(Key::Char('r'), &mut state);
        for _ in 0.."Art History".len() {
            scene.handle_input(Key::Backspace, &mut state);
        }
        type_text(&mut scene, &mut state, "Zoology");
        scene.handle_input(Key::Enter, &mut state);
        assert!(state.library.find("Zoology").is_some());
        assert_eq!(scene.selected_deck_index(), state.library.position("Zoology"));

        scene.handle_input(Key::Char('d'), &mut state);
        scene.handle_input(Key::Char('n'), &mut state);
        assert_eq!(state.library.len(), 2);
        scene.handle_input(Key::Char('d'), &mut state);
        scene.handle_input(Key::Char('y'), &mut state);
        assert_eq!(state.library.len(), 1);
        assert_eq!(scene.selected_deck_index(), Some(0));
    }

    #[test]
    fn duplicate_name_is_reported() {
        let mut state = state_with(vec![numbered_deck("Math", 2)]);
        let mut scene = EditDeckScene::new();
        scene.on_enter(&mut state);
        scene.handle_input(Key::Char('a'), &mut state);
        type_text(&mut scene, &mut state, "math");
        scene.handle_input(Key::Enter, &mut state);
        assert_eq!(state.library.len(), 1);

        let mut window = ConsoleWindow::new(24, 80);
        scene.render(&mut window, &state);
        assert!(screen(&window).contains("already exists"));
    }

    #[test]
    fn empty_library_is_safe() {
        let mut state = state_with(vec![]);
        let mut scene = EditDeckScene::new();
        scene.on_enter(&mut state);
        for key in [Key::Down, Key::Right, Key::Enter, Key::Char('d'), Key::Char('r')] {
            assert!(matches!(scene.handle_input(key, &mut state), SceneCommand::None));
        }
        assert_eq!(scene.selected_deck_index(), None);

        let mut window = ConsoleWindow::new(24, 80);
        scene.render(&mut window, &state);
        assert!(screen(&window).contains("No decks yet"));
    }

    #[test]
    fn enter_opens_card_editor() {
        let mut state = state_with(vec![numbered_deck("Math", 2)]);
        let mut scene = EditDeckScene::new();
        scene.on_enter(&mut state);
        assert!(matches!(
            scene.handle_input(Key::Enter, &mut state),
            SceneCommand::Open(opened) if *opened.id() == EDIT_FLASHCARDS
        ));
    }
}
