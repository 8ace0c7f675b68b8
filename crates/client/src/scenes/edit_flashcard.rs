use console_ui::{
    ConsoleWindow, Key, Menu, MenuEvent, Orientation, RedrawFlag, Scene, SceneCommand, SceneId,
    TextInput, TextInputEvent,
};
use ratatui::style::{Modifier, Style};
use strum::IntoEnumIterator;
use study_core::{CardDifficulty, DeckLibrary, FlashCard, FlashCardDeck, StudySettings};

use super::{
    EDIT_DECKS, EDIT_FLASHCARDS, ListCursor, clip, draw_footer, draw_frame, draw_notice, list_rows,
};
use crate::state::AppState;

const MAX_TEXT_LEN: usize = 200;
const ROWS_PER_CARD: usize = 3;
const DEFAULT_CARDS_PER_PAGE: usize = 5;

/// Card being written. `target` is `None` for a new card.
struct Draft {
    target: Option<usize>,
    question: String,
    answer: String,
}

enum Mode {
    Browse,
    Question(Draft, TextInput),
    Answer(Draft, TextInput),
    Difficulty(Draft, Menu),
    ConfirmDelete,
}

/// Paginated card list of one deck with add, edit and delete.
pub struct EditFlashcardScene {
    deck_name: String,
    cursor: ListCursor,
    mode: Mode,
    notice: Option<String>,
    redraw: RedrawFlag,
}

impl EditFlashcardScene {
    pub fn new(deck_name: impl Into<String>) -> Self {
        Self {
            deck_name: deck_name.into(),
            cursor: ListCursor::new(DEFAULT_CARDS_PER_PAGE, 0),
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

    pub fn selected_card_index(&self) -> Option<usize> {
        self.cursor.selected()
    }

    pub fn study_settings<'a>(&self, state: &'a AppState) -> &'a StudySettings {
        &state.settings
    }

    pub fn deck<'a>(&self, library: &'a DeckLibrary) -> Option<&'a FlashCardDeck> {
        library.find(&self.deck_name)
    }

    fn card_count(&self, library: &DeckLibrary) -> usize {
        self.deck(library).map_or(0, FlashCardDeck::len)
    }

    fn browse(&mut self, key: Key, state: &mut AppState) -> SceneCommand<AppState> {
        let changed = match key {
            Key::Up => self.cursor.select_previous(),
            Key::Down => self.cursor.select_next(),
            Key::Left => self.cursor.previous_page(),
            Key::Right => self.cursor.next_page(),
            Key::Esc | Key::Backspace => return SceneCommand::SwitchTo(EDIT_DECKS.clone()),
            Key::Enter => {
                let card = self
                    .cursor
                    .selected()
                    .and_then(|index| Some((index, self.deck(&state.library)?.cards.get(index)?)));
                match card {
                    Some((index, card)) => {
                        let draft = Draft {
                            target: Some(index),
                            question: card.question.clone(),
                            answer: card.answer.clone(),
                        };
                        self.ask_question(draft);
                        true
                    }
                    None => false,
                }
            }
            key if key.is_char('a') => {
                let exists = self.deck(&state.library).is_some();
                if exists {
                    self.ask_question(Draft {
                        target: None,
                        question: String::new(),
                        answer: String::new(),
                    });
                }
                exists
            }
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

    fn ask_question(&mut self, draft: Draft) {
        let input = TextInput::new("Question: ", MAX_TEXT_LEN).with_value(&draft.question);
        self.mode = Mode::Question(draft, input);
    }

    /// Feeds a key to the active prompt and advances question, answer,
    /// difficulty in turn.
    fn edit(&mut self, key: Key, state: &mut AppState) {
        let mode = std::mem::replace(&mut self.mode, Mode::Browse);
        self.mode = match mode {
            Mode::Question(mut draft, mut input) => match input.handle_key(key) {
                TextInputEvent::Submitted(question) => {
                    draft.question = question;
                    let input = TextInput::new("Answer: ", MAX_TEXT_LEN).with_value(&draft.answer);
                    Mode::Answer(draft, input)
                }
                TextInputEvent::Cancelled => Mode::Browse,
                _ => Mode::Question(draft, input),
            },
            Mode::Answer(mut draft, mut input) => match input.handle_key(key) {
                TextInputEvent::Submitted(answer) => {
                    draft.answer = answer;
                    let current = draft
                        .target
                        .and_then(|index| self.deck(&state.library)?.cards.get(index))
                        .map(|card| card.difficulty)
                        .unwrap_or_default();
                    Mode::Difficulty(draft, difficulty_menu(current))
                }
                TextInputEvent::Cancelled => Mode::Browse,
                _ => Mode::Answer(draft, input),
            },
            Mode::Difficulty(draft, mut menu) => match menu.handle_key(key) {
                MenuEvent::Activated(index) => {
                    let difficulty = CardDifficulty::iter().nth(index).unwrap_or_default();
                    self.save(draft, difficulty, state);
                    Mode::Browse
                }
                MenuEvent::Ignored if key == Key::Esc => Mode::Browse,
                _ => Mode::Difficulty(draft, menu),
            },
            other => other,
        };
        self.redraw.set();
    }

    fn save(&mut self, draft: Draft, difficulty: CardDifficulty, state: &mut AppState) {
        let Some(deck_index) = state.library.position(&self.deck_name) else {
            self.notice = Some(format!("Deck '{}' no longer exists", self.deck_name));
            return;
        };
        let times_answered = draft
            .target
            .and_then(|index| state.library.deck(deck_index)?.cards.get(index))
            .map_or(0, |card| card.times_answered);
        let card = FlashCard {
            question: draft.question,
            answer: draft.answer,
            difficulty,
            times_answered,
        };

        let result = match draft.target {
            Some(index) => state
                .library
                .update_card(deck_index, index, card)
                .map(|()| index),
            None => state.library.add_card(deck_index, card),
        };
        match result {
            Ok(index) => {
                self.cursor.sync(state.library.deck(deck_index).map_or(0, FlashCardDeck::len));
                self.cursor.select(index);
            }
            Err(e) => {
                tracing::warn!("Failed to save card: {}", e);
                self.notice = Some(e.to_string());
            }
        }
    }

    fn confirm_delete(&mut self, key: Key, state: &mut AppState) {
        self.mode = Mode::Browse;
        self.redraw.set();
        if !key.is_char('y') {
            return;
        }
        let (Some(deck_index), Some(card_index)) =
            (state.library.position(&self.deck_name), self.cursor.selected())
        else {
            return;
        };
        match state.library.delete_card(deck_index, card_index) {
            Ok(_) => {
                self.cursor.sync(self.card_count(&state.library));
            }
            Err(e) => {
                tracing::warn!("Failed to delete card: {}", e);
                self.notice = Some(e.to_string());
            }
        }
    }
}

fn difficulty_menu(current: CardDifficulty) -> Menu {
    let mut menu = Menu::from_labels(CardDifficulty::iter().map(|d| format!(" {d} ")))
        .with_orientation(Orientation::Horizontal);
    if let Some(index) = CardDifficulty::iter().position(|d| d == current) {
        menu.select(index);
    }
    menu
}

impl Scene<AppState> for EditFlashcardScene {
    fn id(&self) -> &SceneId {
        &EDIT_FLASHCARDS
    }

    fn handle_input(&mut self, key: Key, state: &mut AppState) -> SceneCommand<AppState> {
        match self.mode {
            Mode::Browse => return self.browse(key, state),
            Mode::ConfirmDelete => self.confirm_delete(key, state),
            _ => self.edit(key, state),
        }
        SceneCommand::None
    }

    fn render(&mut self, window: &mut ConsoleWindow, state: &AppState) {
        self.cursor
            .set_per_page((list_rows(window) / ROWS_PER_CARD).max(1));
        draw_frame(window, &format!("Edit Deck: {}", self.deck_name));

        let top = 4;
        let width = window.cols().saturating_sub(8);
        match self.deck(&state.library) {
            None => window.draw_centered_text(top, "This deck no longer exists."),
            Some(deck) if deck.is_empty() => {
                window.draw_centered_text(top, "No cards yet. Press A to add one.");
            }
            Some(deck) => {
                let highlight = Style::default().add_modifier(Modifier::REVERSED);
                for (slot, index) in self.cursor.visible_range().enumerate() {
                    let Some(card) = deck.cards.get(index) else {
                        continue;
                    };
                    let y = top + slot * ROWS_PER_CARD;
                    let style = if Some(index) == self.cursor.selected() {
                        highlight
                    } else {
                        Style::default()
                    };
                    let question = clip(&format!("{:>3}. Q: {}", index + 1, card.question), width);
                    window.draw_styled_text(4, y, &question, style);
                    let detail = format!(
                        "     A: {}  [{} x{}]",
                        card.answer, card.difficulty, card.times_answered
                    );
                    window.draw_text(4, y + 1, &clip(&detail, width));
                }
                window.draw_text(
                    4,
                    2,
                    &format!(
                        "Page {}/{}   Cards per session: {}",
                        self.cursor.page() + 1,
                        self.cursor.page_count(),
                        self.study_settings(state).flash_card_limit()
                    ),
                );
            }
        }

        let prompt_row = window.rows().saturating_sub(4);
        match &self.mode {
            Mode::Question(_, input) | Mode::Answer(_, input) => {
                input.draw(window, 4, prompt_row);
            }
            Mode::Difficulty(_, menu) => {
                window.draw_text(4, prompt_row, "Difficulty:");
                menu.draw(window, 17, prompt_row);
            }
            Mode::ConfirmDelete => {
                window.draw_text(4, prompt_row, "Delete the selected card? (y/n)");
            }
            Mode::Browse => {}
        }

        draw_notice(window, self.notice.as_deref());
        let hint = match self.mode {
            Mode::Browse => "Enter: edit  A: add  D: delete  Left/Right: page  Esc: back",
            Mode::Difficulty(..) => "Left/Right: choose   Enter: save   Esc: cancel",
            Mode::ConfirmDelete => "Y: delete   any other key: cancel",
            _ => "Enter: next   Esc: cancel",
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
        self.cursor.sync(self.card_count(&state.library));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::test_support::{numbered_deck, screen, state_with};

    fn open(state: &mut AppState, name: &str) -> EditFlashcardScene {
        let mut scene = EditFlashcardScene::new(name);
        scene.on_enter(state);
        scene
    }

    fn type_text(scene: &mut EditFlashcardScene, state: &mut AppState, text: &str) {
        for ch in text.chars() {
            let key = if ch == ' ' { Key::Space } else { Key::Char(ch) };
            scene.handle_input(key, state);
        }
    }

    #[test]
    fn adds_card_through_prompts() {
        let mut state = state_with(vec![numbered_deck("Deck", 0)]);
        let mut scene = open(&mut state, "Deck");
        assert_eq!(scene.selected_card_index(), None);

        scene.handle_input(Key::Char('a'), &mut state);
        type_text(&mut scene, &mut state, "2 + 2");
        scene.handle_input(Key::Enter, &mut state);
        type_text(&mut scene, &mut state, "4");
        scene.handle_input(Key::Enter, &mut state);
        scene.handle_input(Key::Right, &mut state);
        scene.handle_input(Key::Enter, &mut state);

        let deck = scene.deck(&state.library).unwrap();
        assert_eq!(deck.cards.len(), 1);
        assert_eq!(deck.cards[0].question, "2 + 2");
        assert_eq!(deck.cards[0].answer, "4");
        assert_eq!(deck.cards[0].difficulty, CardDifficulty::Easy);
        assert_eq!(scene.selected_card_index(), Some(0));
    }

    #[test]
    fn edit_keeps_answer_count() {
        let mut deck = numbered_deck("Deck", 2);
        deck.cards[1].times_answered = 4;
        let mut state = state_with(vec![deck]);
        let mut scene = open(&mut state, "Deck");

        scene.handle_input(Key::Down, &mut state);
        scene.handle_input(Key::Enter, &mut state);
        type_text(&mut scene, &mut state, "!");
        scene.handle_input(Key::Enter, &mut state);
        scene.handle_input(Key::Enter, &mut state);
        scene.handle_input(Key::Enter, &mut state);

        let card = &scene.deck(&state.library).unwrap().cards[1];
        assert_eq!(card.question, "Q1!");
        assert_eq!(card.answer, "A1");
        assert_eq!(card.times_answered, 4);
    }

    #[test]
    fn escape_cancels_without_saving() {
        let mut state = state_with(vec![numbered_deck("Deck", 1)]);
        let mut scene = open(&mut state, "Deck");
        scene.handle_input(Key::Enter, &mut state);
        type_text(&mut scene, &mut state, "xyz");
        scene.handle_input(Key::Esc, &mut state);
        assert_eq!(scene.deck(&state.library).unwrap().cards[0].question, "Q0");
        assert!(matches!(
            scene.handle_input(Key::Esc, &mut state),
            SceneCommand::SwitchTo(id) if id == EDIT_DECKS
        ));
    }

    #[test]
    fn deletes_after_confirmation() {
        let mut state = state_with(vec![numbered_deck("Deck", 2)]);
        let mut scene = open(&mut state, "Deck");
        scene.handle_input(Key::Down, &mut state);
        scene.handle_input(Key::Char('d'), &mut state);
        scene.handle_input(Key::Char('y'), &mut state);
        assert_eq!(scene.deck(&state.library).unwrap().len(), 1);
        assert_eq!(scene.selected_card_index(), Some(0));
    }

    #[test]
    fn paginates_cards() {
        let mut state = state_with(vec![numbered_deck("Deck", 12)]);
        let mut scene = open(&mut state, "Deck");
        let mut window = ConsoleWindow::new(24, 80);
        scene.render(&mut window, &state);
        assert_eq!(scene.max_cards_per_page(), 5);

        scene.handle_input(Key::Right, &mut state);
        scene.handle_input(Key::Right, &mut state);
        scene.handle_input(Key::Right, &mut state);
        assert_eq!(scene.current_page(), 2);
        assert_eq!(scene.selected_card_index(), Some(10));

        scene.render(&mut window, &state);
        let text = screen(&window);
        assert!(text.contains("Q11"));
        assert!(!text.contains("Q9"));
        assert_eq!(scene.study_settings(&state).flash_card_limit(), 15);
    }

    #[test]
    fn empty_deck_operations_are_noops() {
        let mut state = state_with(vec![numbered_deck("Deck", 0)]);
        let mut scene = open(&mut state, "Deck");
        for key in [Key::Down, Key::Right, Key::Enter, Key::Char('d')] {
            scene.handle_input(key, &mut state);
        }
        assert_eq!(scene.selected_card_index(), None);
        let mut window = ConsoleWindow::new(24, 80);
        scene.render(&mut window, &state);
        assert!(screen(&window).contains("No cards yet"));
    }
}
