use ratatui::style::{Modifier, Style};

use crate::input::Key;
use crate::window::ConsoleWindow;

/// Outcome of feeding a key to a [`TextInput`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextInputEvent {
    Edited,
    Submitted(String),
    Cancelled,
    Ignored,
}

/// Single-line prompt edited in place inside a scene.
#[derive(Clone, Debug)]
pub struct TextInput {
    prompt: String,
    value: String,
    max_len: usize,
}

impl TextInput {
    pub fn new(prompt: impl Into<String>, max_len: usize) -> Self {
        Self {
            prompt: prompt.into(),
            value: String::new(),
            max_len,
        }
    }

    /// Starts the prompt pre-filled with `value`.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into().chars().take(self.max_len).collect();
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn handle_key(&mut self, key: Key) -> TextInputEvent {
        match key {
            Key::Enter => TextInputEvent::Submitted(self.value.trim().to_string()),
            Key::Esc => TextInputEvent::Cancelled,
            Key::Backspace => {
                if self.value.pop().is_some() {
                    TextInputEvent::Edited
                } else {
                    TextInputEvent::Ignored
                }
            }
            Key::Space => self.push(' '),
            Key::Char(ch) => self.push(ch),
            _ => TextInputEvent::Ignored,
        }
    }

    fn push(&mut self, ch: char) -> TextInputEvent {
        if self.value.chars().count() >= self.max_len || ch.is_control() {
            return TextInputEvent::Ignored;
        }
        self.value.push(ch);
        TextInputEvent::Edited
    }

    /// Draws `prompt value_` with the cursor cell underlined.
    pub fn draw(&self, window: &mut ConsoleWindow, x: usize, y: usize) {
        let text = format!("{}{}", self.prompt, self.value);
        window.draw_text(x, y, &text);
        let cursor = Style::default().add_modifier(Modifier::UNDERLINED);
        window.draw_styled_text(x + text.chars().count(), y, " ", cursor);
    }
}
