//! Widgets composed by scenes: buttons, menus, pagers and line prompts.

mod button;
mod menu;
mod pager;
mod text_input;

pub use button::Button;
pub use menu::{Menu, MenuEvent, Orientation, SelectionPolicy};
pub use pager::Pager;
pub use text_input::{TextInput, TextInputEvent};
