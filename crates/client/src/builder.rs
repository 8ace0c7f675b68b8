//! Application builder.

use anyhow::{Context, Result};
use console_ui::{ConsoleWindow, UiManager};
use rand::SeedableRng;
use rand::rngs::StdRng;
use study_core::{DeckLibrary, DeckRepository, FileDeckRepository, SettingsStore, StudySettings};

use crate::App;
use crate::art::register_art;
use crate::config::AppConfig;
use crate::scenes::{self, MAIN_MENU};
use crate::state::AppState;

const DEFAULT_ROWS: usize = 24;
const DEFAULT_COLS: usize = 80;

/// Builder for constructing an [`App`].
///
/// - **Required**: the configuration
/// - **Optional**: a deck repository (defaults to `.deck` files in the
///   configured deck directory), fixed settings (default: loaded from and
///   saved to the settings file) and the window size
#[derive(Default)]
pub struct AppBuilder {
    config: Option<AppConfig>,
    repository: Option<Box<dyn DeckRepository>>,
    settings: Option<StudySettings>,
    window_size: Option<(usize, usize)>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration (required).
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `repository` instead of the deck directory.
    pub fn repository(mut self, repository: impl DeckRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Start from `settings` and keep them in memory only.
    pub fn settings(mut self, settings: StudySettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Initial window size as `(rows, cols)`.
    pub fn window_size(mut self, rows: usize, cols: usize) -> Self {
        self.window_size = Some((rows, cols));
        self
    }

    /// Build the App.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is not set
    /// - The deck directory cannot be created or read
    /// - Artwork or scene registration fails
    pub fn build(self) -> Result<App> {
        let config = self
            .config
            .context("Configuration is required. Use .config() to set it.")?;

        let repository = match self.repository {
            Some(repository) => repository,
            None => Box::new(
                FileDeckRepository::new(&config.deck_dir).with_context(|| {
                    format!("opening deck directory {}", config.deck_dir.display())
                })?,
            ),
        };
        let mut library = DeckLibrary::load(repository).context("loading decks")?;
        library
            .seed_examples_if_empty()
            .context("creating example decks")?;
        tracing::info!("Loaded {} decks", library.len());

        let (settings, store) = match self.settings {
            Some(mut settings) => {
                settings.set_deck_dir(&config.deck_dir);
                (settings, None)
            }
            None => {
                let store = SettingsStore::new(config.settings_path());
                let settings = store.load(&config.deck_dir).unwrap_or_else(|e| {
                    tracing::warn!("Using default settings: {}", e);
                    StudySettings::new(&config.deck_dir)
                });
                (settings, Some(store))
            }
        };

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut state = AppState::new(settings, library, config.game, rng);
        if let Some(store) = store {
            state = state.with_settings_store(store);
        }

        let (rows, cols) = self.window_size.unwrap_or((DEFAULT_ROWS, DEFAULT_COLS));
        let mut window = ConsoleWindow::new(rows, cols);
        register_art(&mut window).context("registering artwork")?;

        let mut manager = UiManager::with_window(window, state);
        scenes::register_all(&mut manager).context("registering scenes")?;
        manager
            .set_current_scene(&MAIN_MENU)
            .context("entering the main menu")?;

        Ok(App { manager })
    }
}
