//! State shared by every scene.
use game_battle::GameConfig;
use rand::rngs::StdRng;
use study_core::{DeckLibrary, SessionSummary, SettingsStore, StudySettings};

/// Everything scenes read and mutate through the UI manager.
pub struct AppState {
    pub settings: StudySettings,
    /// `None` keeps settings in memory only.
    pub settings_store: Option<SettingsStore>,
    pub library: DeckLibrary,
    pub game_config: GameConfig,
    pub rng: StdRng,
    /// Result of the most recent study session.
    pub last_summary: Option<SessionSummary>,
}

impl AppState {
    pub fn new(
        settings: StudySettings,
        library: DeckLibrary,
        game_config: GameConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            settings,
            settings_store: None,
            library,
            game_config,
            rng,
            last_summary: None,
        }
    }

    pub fn with_settings_store(mut self, store: SettingsStore) -> Self {
        self.settings_store = Some(store);
        self
    }

    /// Writes the current settings, returning a status message on failure.
    pub fn save_settings(&self) -> Option<String> {
        let store = self.settings_store.as_ref()?;
        match store.save(&self.settings) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("Failed to save settings: {}", e);
                Some(format!("Could not save settings: {e}"))
            }
        }
    }

    /// True when the last session earned the game.
    pub fn game_unlocked(&self) -> bool {
        self.last_summary.is_some_and(|summary| summary.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use study_core::InMemoryDeckRepository;
    use tempfile::TempDir;

    fn state() -> AppState {
        let library = DeckLibrary::load(Box::new(InMemoryDeckRepository::new())).unwrap();
        AppState::new(
            StudySettings::new("decks"),
            library,
            GameConfig::default(),
            StdRng::seed_from_u64(0),
        )
    }

    #[test]
    fn saves_settings_when_store_present() {
        let state = state();
        assert_eq!(state.save_settings(), None);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let mut state = state.with_settings_store(SettingsStore::new(&path));
        state.settings.set_flash_card_limit(7);
        assert_eq!(state.save_settings(), None);

        let loaded = SettingsStore::new(&path).load("decks").unwrap();
        assert_eq!(loaded.flash_card_limit(), 7);
    }

    #[test]
    fn game_requires_completed_session() {
        let mut state = state();
        assert!(!state.game_unlocked());
        state.last_summary = Some(SessionSummary::default());
        assert!(!state.game_unlocked());
        state.last_summary = Some(SessionSummary {
            completed: true,
            ..SessionSummary::default()
        });
        assert!(state.game_unlocked());
    }
}
