use console_ui::{ConsoleWindow, Key, Pager, RedrawFlag, Scene, SceneCommand, SceneId};
use ratatui::style::{Modifier, Style};
use study_core::StudySession;

use super::{
    BROWSE_DECKS, FlashcardScene, ListCursor, MAIN_MENU, clip, draw_footer, draw_frame,
    draw_notice, list_rows,
};
use crate::state::AppState;

const LIST_X: usize = 3;
const LIST_WIDTH: usize = 30;
const PREVIEW_X: usize = LIST_X + LIST_WIDTH + 3;
const DEFAULT_ROWS: usize = 10;

/// Deck picker for a study session, with a paged preview of the cards.
pub struct BrowseDecksScene {
    decks: ListCursor,
    preview: Pager,
    notice: Option<String>,
    redraw: RedrawFlag,
}

impl BrowseDecksScene {
    pub fn new() -> Self {
        Self {
            decks: ListCursor::new(DEFAULT_ROWS, 0),
            preview: Pager::new(DEFAULT_ROWS, 0),
            notice: None,
            redraw: RedrawFlag::new(),
        }
    }

    pub fn selected_deck_index(&self) -> Option<usize> {
        self.decks.selected()
    }

    pub fn preview_page(&self) -> usize {
        self.preview.page()
    }

    fn reset_preview(&mut self, state: &AppState) {
        let cards = self
            .decks
            .selected()
            .and_then(|index| state.library.deck(index))
            .map_or(0, |deck| deck.len());
        self.preview = Pager::new(self.preview.per_page(), cards);
    }

    fn start(&mut self, state: &mut AppState) -> SceneCommand<AppState> {
        let Some(index) = self.decks.selected() else {
            return SceneCommand::None;
        };
        let Some(deck) = state.library.deck(index) else {
            return SceneCommand::None;
        };
        if deck.is_empty() {
            self.notice = Some(format!("'{}' has no cards yet", deck.name));
            self.redraw.set();
            return SceneCommand::None;
        }

        let limit = state.settings.flash_card_limit() as usize;
        let session = StudySession::new(deck, limit, &mut state.rng);
        tracing::info!("Studying '{}' with {} cards", deck.name, session.len());
        SceneCommand::Open(Box::new(FlashcardScene::new(index, session)))
    }
}

impl Default for BrowseDecksScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene<AppState> for BrowseDecksScene {
    fn id(&self) -> &SceneId {
        &BROWSE_DECKS
    }

    fn handle_input(&mut self, key: Key, state: &mut AppState) -> SceneCommand<AppState> {
        let changed = match key {
            Key::Up | Key::Down => {
                let moved = if key == Key::Up {
                    self.decks.select_previous()
                } else {
                    self.decks.select_next()
                };
                if moved {
                    self.notice = None;
                    self.reset_preview(state);
                }
                moved
            }
            Key::Left => self.preview.previous_page(),
            Key::Right => self.preview.next_page(),
            Key::Enter => return self.start(state),
            Key::Esc | Key::Backspace => return SceneCommand::SwitchTo(MAIN_MENU.clone()),
            _ => false,
        };
        self.redraw.mark_if(changed);
        SceneCommand::None
    }

    fn render(&mut self, window: &mut ConsoleWindow, state: &AppState) {
        let rows = list_rows(window);
        self.decks.set_per_page(rows);
        self.preview.set_per_page(rows);

        draw_frame(window, "Choose a Deck");
        let top = 4;

        if state.library.is_empty() {
            window.draw_centered_text(top, "No decks found. Create one under Edit Decks.");
        } else {
            window.draw_text(LIST_X, top - 1, "Decks");
            let highlight = Style::default().add_modifier(Modifier::REVERSED);
            for (row, index) in self.decks.visible_range().enumerate() {
                let Some(deck) = state.library.deck(index) else {
                    continue;
                };
                let label = clip(&format!("{} ({})", deck.name, deck.len()), LIST_WIDTH);
                let style = if Some(index) == self.decks.selected() {
                    highlight
                } else {
                    Style::default()
                };
                window.draw_styled_text(LIST_X, top + row, &label, style);
            }
            window.draw_text(
                LIST_X,
                top + rows,
                &format!("Page {}/{}", self.decks.page() + 1, self.decks.page_count().max(1)),
            );
        }

        if let Some(deck) = self.decks.selected().and_then(|i| state.library.deck(i)) {
            let width = window.cols().saturating_sub(PREVIEW_X + 2);
            window.draw_text(PREVIEW_X, top - 1, "Questions");
            if deck.is_empty() {
                window.draw_text(PREVIEW_X, top, "(empty deck)");
            }
            for (row, index) in self.preview.visible_range().enumerate() {
                if let Some(card) = deck.cards.get(index) {
                    window.draw_text(PREVIEW_X, top + row, &clip(&card.question, width));
                }
            }
            if self.preview.page_count() > 1 {
                window.draw_text(
                    PREVIEW_X,
                    top + rows,
                    &format!("Page {}/{}", self.preview.page() + 1, self.preview.page_count()),
                );
            }
        }

        draw_notice(window, self.notice.as_deref());
        draw_footer(
            window,
            "Up/Down: deck   Left/Right: cards   Enter: study   Esc: back",
        );
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
        self.decks.sync(state.library.len());
        self.reset_preview(state);
        self.notice = None;
    }
}
