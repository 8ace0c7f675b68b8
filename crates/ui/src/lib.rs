//! Scene-based console UI toolkit.
//!
//! The toolkit is built from a few layers:
//! - [`ConsoleWindow`]: a bounded character surface with named art registries
//! - Widgets: [`Button`], [`Menu`], [`Pager`] and [`TextInput`]
//! - [`Scene`]: one interactive view that paints into the window
//! - [`UiManager`]: owns the window, the scenes and the shared state, and
//!   runs the blocking input/render loop
//!
//! Input arrives through an [`InputSource`]; [`CrosstermInput`] reads the
//! terminal and [`ScriptedInput`] replays a fixed script for headless runs.

pub mod art;
pub mod error;
pub mod input;
pub mod manager;
pub mod scene;
pub mod terminal;
pub mod widgets;
pub mod window;

pub use art::{ANSI_CELL_COLUMNS, AnsiArt, AnsiCode, AsciiArt};
pub use error::{ArtKind, ErrorClass, Result, UiError};
pub use input::{CrosstermInput, InputEvent, InputSource, Key, ScriptedInput};
pub use manager::{Dispatch, UiManager};
pub use scene::{RedrawFlag, Scene, SceneCommand, SceneId, SceneRegistry};
pub use widgets::{
    Button, Menu, MenuEvent, Orientation, Pager, SelectionPolicy, TextInput, TextInputEvent,
};
pub use window::ConsoleWindow;
