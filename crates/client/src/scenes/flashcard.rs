use std::time::Instant;

use console_ui::{
    ConsoleWindow, Key, Menu, MenuEvent, Orientation, RedrawFlag, Scene, SceneCommand, SceneId,
};
use ratatui::style::{Color, Style};
use study_core::{Rating, SessionSummary, StudySession};

use super::{FLASHCARD, RESULTS, draw_footer, draw_frame, draw_notice};
use crate::state::AppState;

const RATINGS: [Rating; 3] = [Rating::Easy, Rating::Medium, Rating::Hard];

/// Reviews one shuffled session of cards against the study timer.
pub struct FlashcardScene {
    deck_index: usize,
    session: StudySession,
    ratings: Menu,
    notice: Option<String>,
    redraw: RedrawFlag,
}

impl FlashcardScene {
    pub fn new(deck_index: usize, session: StudySession) -> Self {
        let ratings = Menu::from_labels(RATINGS.map(|rating| format!(" {rating} ")))
            .with_orientation(Orientation::Horizontal);
        Self {
            deck_index,
            session,
            ratings,
            notice: None,
            redraw: RedrawFlag::new(),
        }
    }

    pub fn session(&self) -> &StudySession {
        &self.session
    }

    fn finish(&mut self, summary: SessionSummary, state: &mut AppState) -> SceneCommand<AppState> {
        tracing::info!(
            "Session on '{}' ended: {}/{} points, completed={}",
            self.session.deck_name(),
            summary.score(),
            summary.max_score(),
            summary.completed
        );
        state.last_summary = Some(summary);
        SceneCommand::SwitchTo(RESULTS.clone())
    }

    fn rate(&mut self, rating: Rating, state: &mut AppState) -> SceneCommand<AppState> {
        let Some(card) = self.session.rate(rating) else {
            return SceneCommand::None;
        };
        if let Err(e) = state.library.record_answer(self.deck_index, card, rating) {
            tracing::warn!("Failed to record answer: {}", e);
            self.notice = Some(format!("Could not save the answer: {e}"));
        }
        self.redraw.set();
        if self.session.is_finished() {
            return self.finish(self.session.summary(), state);
        }
        SceneCommand::None
    }
}

impl Scene<AppState> for FlashcardScene {
    fn id(&self) -> &SceneId {
        &FLASHCARD
    }

    fn handle_input(&mut self, key: Key, state: &mut AppState) -> SceneCommand<AppState> {
        if key == Key::Esc {
            return self.finish(self.session.summary(), state);
        }
        if !self.session.is_revealed() {
            if matches!(key, Key::Space | Key::Enter) {
                self.redraw.mark_if(self.session.reveal());
            }
            return SceneCommand::None;
        }
        match self.ratings.handle_key(key) {
            MenuEvent::Moved => {
                self.redraw.set();
                SceneCommand::None
            }
            MenuEvent::Activated(index) => match RATINGS.get(index) {
                Some(&rating) => self.rate(rating, state),
                None => SceneCommand::None,
            },
            MenuEvent::Ignored => SceneCommand::None,
        }
    }

    fn update(&mut self, state: &mut AppState) -> SceneCommand<AppState> {
        if state.settings.session_expired_at(Instant::now()) {
            return self.finish(self.session.summary_on_timeout(), state);
        }
        SceneCommand::None
    }

    fn render(&mut self, window: &mut ConsoleWindow, state: &AppState) {
        draw_frame(window, &format!("Studying: {}", self.session.deck_name()));
        let (position, total) = self.session.progress();
        window.draw_text(3, 3, &format!("Card {position}/{total}"));
        if let Some(left) = state.settings.remaining_at(Instant::now()) {
            let secs = left.as_secs();
            let clock = format!("{:02}:{:02} left", secs / 60, secs % 60);
            let x = window.cols().saturating_sub(clock.len() + 3);
            window.draw_text(x, 3, &clock);
        }

        let card = self
            .session
            .current_card()
            .and_then(|index| state.library.deck(self.deck_index)?.cards.get(index));
        let width = window.cols().saturating_sub(10);
        if let Some(card) = card {
            window.draw_text(4, 5, "Question:");
            let mut y = 6 + window.draw_wrapped_text(6, 6, width, &card.question);
            if self.session.is_revealed() {
                y += 1;
                window.draw_styled_text(4, y, "Answer:", Style::default().fg(Color::Green));
                y += 1 + window.draw_wrapped_text(6, y + 1, width, &card.answer);
                window.draw_centered_text(y + 1, "How hard was it?");
                self.ratings.draw_centered(window, y + 2);
            }
        }

        draw_notice(window, self.notice.as_deref());
        let hint = if self.session.is_revealed() {
            "Left/Right: choose   Enter: rate   Esc: stop"
        } else {
            "Space: reveal answer   Esc: stop"
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

    fn menu(&self) -> Option<&Menu> {
        Some(&self.ratings)
    }

    fn on_enter(&mut self, state: &mut AppState) {
        state.settings.start_session();
        state.last_summary = None;
    }

    fn on_exit(&mut self, state: &mut AppState) {
        state.settings.end_session();
    }
}
