//! Application configuration read from the environment.
use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use game_battle::GameConfig;

const FALLBACK_DATA_DIR: &str = ".study-dungeon";

/// Paths and tuning for one run of the application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub deck_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub game: GameConfig,
}

impl AppConfig {
    /// Builds a configuration rooted at `data_dir` with default tuning.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            deck_dir: data_dir.join("Decks"),
            log_dir: data_dir.join("logs"),
            data_dir,
            seed: None,
            game: GameConfig::default(),
        }
    }

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STUDY_DUNGEON_DATA_DIR` - Data root (default: platform data dir)
    /// - `STUDY_DUNGEON_DECK_DIR` - Deck directory (default: `<data>/Decks`)
    /// - `STUDY_DUNGEON_LOG_DIR` - Log directory (default: `<data>/logs`)
    /// - `STUDY_DUNGEON_SEED` - RNG seed for shuffles and game decks
    /// - `STUDY_DUNGEON_HAND_SIZE` - Cards per hand (default: 5)
    /// - `STUDY_DUNGEON_GAME_DECK_SIZE` - Cards per game deck (default: 15)
    /// - `STUDY_DUNGEON_HIT_POINTS` - Starting hit points (default: 100, at most 999)
    pub fn from_env() -> Self {
        let data_dir = read_env::<PathBuf>("STUDY_DUNGEON_DATA_DIR").unwrap_or_else(default_data_dir);
        let mut config = Self::with_data_dir(data_dir);

        if let Some(dir) = read_env::<PathBuf>("STUDY_DUNGEON_DECK_DIR") {
            config.deck_dir = dir;
        }
        if let Some(dir) = read_env::<PathBuf>("STUDY_DUNGEON_LOG_DIR") {
            config.log_dir = dir;
        }
        config.seed = read_env::<u64>("STUDY_DUNGEON_SEED");

        if let Some(size) = read_env::<usize>("STUDY_DUNGEON_HAND_SIZE") {
            config.game.hand_size = size.max(1);
        }
        if let Some(size) = read_env::<usize>("STUDY_DUNGEON_GAME_DECK_SIZE") {
            config.game.deck_size = size.max(1);
        }
        if let Some(hp) = read_env::<i32>("STUDY_DUNGEON_HIT_POINTS") {
            config.game = config.game.with_hit_points(hp);
        }

        config
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "study-dungeon")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DATA_DIR))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
