//! Input decoding for the console toolkit.
//!
//! This module owns the mapping from `crossterm` events to [`Key`] so scenes
//! never see raw terminal events.

use std::collections::VecDeque;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::Result;

/// Logical key delivered to scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Space,
    Tab,
    Char(char),
    /// Ctrl-C. Always ends the event loop.
    Interrupt,
}

impl Key {
    /// Converts a raw key event. Releases and unbound keys yield `None`.
    pub fn from_key_event(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => Some(Self::Interrupt),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Enter => Some(Self::Enter),
            KeyCode::Esc => Some(Self::Esc),
            KeyCode::Backspace => Some(Self::Backspace),
            KeyCode::Tab => Some(Self::Tab),
            KeyCode::Char(' ') => Some(Self::Space),
            KeyCode::Char(ch) => Some(Self::Char(ch)),
            _ => None,
        }
    }

    /// Case-insensitive check for a letter binding.
    pub fn is_char(self, expected: char) -> bool {
        matches!(self, Self::Char(ch) if ch.eq_ignore_ascii_case(&expected))
    }
}

/// Event handed to the UI manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize { cols: u16, rows: u16 },
}

impl InputEvent {
    pub fn from_terminal_event(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Key::from_key_event(key).map(Self::Key),
            Event::Resize(cols, rows) => Some(Self::Resize { cols, rows }),
            _ => None,
        }
    }
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

/// Source of input events for the event loop.
pub trait InputSource {
    /// Blocks until the next event. `None` means the source is exhausted.
    fn next_event(&mut self) -> Result<Option<InputEvent>>;
}

/// Reads events from the terminal.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        loop {
            if let Some(event) = InputEvent::from_terminal_event(event::read()?) {
                return Ok(Some(event));
            }
        }
    }
}

/// Replays a fixed sequence of events. Used for headless runs and tests.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self::new(keys.into_iter().map(InputEvent::Key))
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}
