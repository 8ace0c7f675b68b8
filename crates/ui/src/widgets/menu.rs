use ratatui::style::{Modifier, Style};

use super::Button;
use crate::error::{Result, UiError};
use crate::input::Key;
use crate::window::ConsoleWindow;

/// Columns between buttons of a horizontal menu.
const HORIZONTAL_GAP: usize = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// What happens when navigation runs past either end of the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Stay on the first or last button.
    #[default]
    Clamp,
    /// Jump to the opposite end.
    Wrap,
}

/// Outcome of feeding a key to a [`Menu`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// The selection changed.
    Moved,
    /// Enter was pressed on the button at this index.
    Activated(usize),
    /// The key did not affect the menu.
    Ignored,
}

/// Ordered buttons with a single selection.
///
/// The selected index is always in `[0, button_count)` when the menu is
/// non-empty, and no button is wider than [`Menu::max_width`].
#[derive(Clone, Debug)]
pub struct Menu {
    buttons: Vec<Button>,
    selected: usize,
    max_width: usize,
    orientation: Orientation,
    policy: SelectionPolicy,
}

impl Menu {
    pub fn new(max_width: usize) -> Self {
        Self {
            buttons: Vec::new(),
            selected: 0,
            max_width,
            orientation: Orientation::Vertical,
            policy: SelectionPolicy::Clamp,
        }
    }

    pub fn horizontal(max_width: usize) -> Self {
        Self::new(max_width).with_orientation(Orientation::Horizontal)
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds a menu of buttons padded to the widest label.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut menu = Self::new(width);
        menu.buttons = labels
            .into_iter()
            .map(|label| Button::with_width(label, width))
            .collect();
        menu
    }

    pub fn add_button(&mut self, button: Button) -> Result<()> {
        if button.width() > self.max_width {
            return Err(UiError::ButtonTooWide {
                label: button.label().to_string(),
                width: button.width(),
                max_width: self.max_width,
            });
        }
        self.buttons.push(button);
        Ok(())
    }

    /// Removes every button and resets the selection.
    pub fn clear(&mut self) {
        self.buttons.clear();
        self.selected = 0;
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn button(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    pub fn button_width(&self, index: usize) -> Result<usize> {
        self.buttons
            .get(index)
            .map(Button::width)
            .ok_or(UiError::ButtonOutOfRange {
                index,
                count: self.buttons.len(),
            })
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_button(&self) -> Option<&Button> {
        self.buttons.get(self.selected)
    }

    pub fn max_width(&self) -> usize {
        self.max_width
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Columns covered when drawn horizontally.
    pub fn total_width(&self) -> usize {
        let buttons: usize = self.buttons.iter().map(Button::width).sum();
        buttons + HORIZONTAL_GAP * self.buttons.len().saturating_sub(1)
    }

    /// Selects `index`. Out-of-range indices leave the selection unchanged.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.buttons.len() {
            return false;
        }
        let moved = index != self.selected;
        self.selected = index;
        moved
    }

    /// Returns true if the selection moved.
    pub fn select_next(&mut self) -> bool {
        let count = self.buttons.len();
        if count == 0 {
            return false;
        }
        if self.selected + 1 < count {
            self.selected += 1;
            true
        } else if self.policy == SelectionPolicy::Wrap && count > 1 {
            self.selected = 0;
            true
        } else {
            false
        }
    }

    /// Returns true if the selection moved.
    pub fn select_previous(&mut self) -> bool {
        let count = self.buttons.len();
        if count == 0 {
            return false;
        }
        if self.selected > 0 {
            self.selected -= 1;
            true
        } else if self.policy == SelectionPolicy::Wrap && count > 1 {
            self.selected = count - 1;
            true
        } else {
            false
        }
    }

    pub fn handle_key(&mut self, key: Key) -> MenuEvent {
        let (previous, next) = match self.orientation {
            Orientation::Vertical => (Key::Up, Key::Down),
            Orientation::Horizontal => (Key::Left, Key::Right),
        };
        let moved = if key == previous {
            self.select_previous()
        } else if key == next {
            self.select_next()
        } else if key == Key::Enter && !self.buttons.is_empty() {
            return MenuEvent::Activated(self.selected);
        } else {
            false
        };
        if moved {
            MenuEvent::Moved
        } else {
            MenuEvent::Ignored
        }
    }

    /// Draws the buttons from `(x, y)`, the selected one in reverse video.
    pub fn draw(&self, window: &mut ConsoleWindow, x: usize, y: usize) {
        let highlight = Style::default().add_modifier(Modifier::REVERSED);
        let mut column = x;
        for (index, button) in self.buttons.iter().enumerate() {
            let style = if index == self.selected {
                highlight
            } else {
                Style::default()
            };
            match self.orientation {
                Orientation::Vertical => {
                    window.draw_styled_text(x, y + index, &button.padded_label(), style);
                }
                Orientation::Horizontal => {
                    window.draw_styled_text(column, y, &button.padded_label(), style);
                    column += button.width() + HORIZONTAL_GAP;
                }
            }
        }
    }

    /// Draws the menu horizontally centered in the window starting at row `y`.
    pub fn draw_centered(&self, window: &mut ConsoleWindow, y: usize) {
        let width = match self.orientation {
            Orientation::Vertical => self.buttons.iter().map(Button::width).max().unwrap_or(0),
            Orientation::Horizontal => self.total_width(),
        };
        let x = window.centered_x(width);
        self.draw(window, x, y);
    }
}
