//! Study Dungeon: flashcard study sessions with a card battle as reward.
//!
//! # Architecture
//!
//! ```text
//! App (composition root)
//!   └─→ UiManager<AppState> (console-ui)
//!         ├─→ ConsoleWindow + artwork
//!         ├─→ Scenes (main menu, study, editors, game, ...)
//!         └─→ AppState
//!               ├─→ DeckLibrary + StudySettings (study-core)
//!               └─→ GameConfig (game-battle)
//! ```
//!
//! [`App::builder`] wires the pieces from an [`AppConfig`]; `main` only adds
//! logging and the terminal.

pub mod art;
mod builder;
pub mod config;
pub mod logging;
pub mod scenes;
pub mod state;

pub use builder::AppBuilder;
pub use config::AppConfig;
pub use state::AppState;

use anyhow::Result;
use console_ui::{InputSource, UiManager};
use ratatui::{Terminal, backend::Backend};

/// The assembled application: a UI manager over [`AppState`].
pub struct App {
    manager: UiManager<AppState>,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn manager(&self) -> &UiManager<AppState> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut UiManager<AppState> {
        &mut self.manager
    }

    pub fn state(&self) -> &AppState {
        self.manager.state()
    }

    /// Runs the event loop until the user quits or `input` runs dry.
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        input: &mut impl InputSource,
    ) -> Result<()> {
        self.manager.run(terminal, input)?;
        tracing::info!("Goodbye");
        Ok(())
    }
}
