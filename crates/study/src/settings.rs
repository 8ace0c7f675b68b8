//! Study settings and their JSON persistence.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

pub const DEFAULT_FLASH_CARD_LIMIT: u32 = 15;
pub const DEFAULT_STUDY_DURATION_MIN: u32 = 25;
/// Ceiling for the increment controls; `set_*` accepts larger values.
pub const MAX_FLASH_CARD_LIMIT: u32 = 100;
pub const MAX_STUDY_DURATION_MIN: u32 = 60;

/// Card limit, study time and the running session clock.
///
/// Only the limits are persisted; the deck directory comes from the
/// application configuration and the session clock is per process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudySettings {
    #[serde(skip)]
    deck_dir: PathBuf,
    flash_card_limit: u32,
    study_duration_min: u32,
    #[serde(skip)]
    session_start: Option<Instant>,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self::new("Decks")
    }
}

impl StudySettings {
    pub fn new(deck_dir: impl Into<PathBuf>) -> Self {
        Self {
            deck_dir: deck_dir.into(),
            flash_card_limit: DEFAULT_FLASH_CARD_LIMIT,
            study_duration_min: DEFAULT_STUDY_DURATION_MIN,
            session_start: None,
        }
    }

    pub fn deck_dir(&self) -> &Path {
        &self.deck_dir
    }

    pub fn set_deck_dir(&mut self, deck_dir: impl Into<PathBuf>) {
        self.deck_dir = deck_dir.into();
    }

    pub fn flash_card_limit(&self) -> u32 {
        self.flash_card_limit
    }

    /// Values below one are raised to one.
    pub fn set_flash_card_limit(&mut self, limit: u32) {
        self.flash_card_limit = limit.max(1);
    }

    pub fn inc_flash_card_limit(&mut self) {
        if self.flash_card_limit < MAX_FLASH_CARD_LIMIT {
            self.flash_card_limit += 1;
        }
    }

    pub fn dec_flash_card_limit(&mut self) {
        if self.flash_card_limit > 1 {
            self.flash_card_limit -= 1;
        }
    }

    pub fn study_duration_min(&self) -> u32 {
        self.study_duration_min
    }

    pub fn study_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.study_duration_min) * 60)
    }

    /// Values below one are raised to one.
    pub fn set_study_duration_min(&mut self, minutes: u32) {
        self.study_duration_min = minutes.max(1);
    }

    pub fn inc_study_duration(&mut self) {
        if self.study_duration_min < MAX_STUDY_DURATION_MIN {
            self.study_duration_min += 1;
        }
    }

    pub fn dec_study_duration(&mut self) {
        if self.study_duration_min > 1 {
            self.study_duration_min -= 1;
        }
    }

    /// Restores the default limits. The deck directory is kept.
    pub fn reset(&mut self) {
        self.flash_card_limit = DEFAULT_FLASH_CARD_LIMIT;
        self.study_duration_min = DEFAULT_STUDY_DURATION_MIN;
    }

    pub fn start_session(&mut self) {
        self.start_session_at(Instant::now());
    }

    pub fn start_session_at(&mut self, start: Instant) {
        self.session_start = Some(start);
    }

    pub fn end_session(&mut self) {
        self.session_start = None;
    }

    pub fn session_underway(&self) -> bool {
        self.session_start.is_some()
    }

    pub fn session_start(&self) -> Option<Instant> {
        self.session_start
    }

    /// True once the study duration has elapsed at `now`.
    pub fn session_expired_at(&self, now: Instant) -> bool {
        self.session_start
            .is_some_and(|start| now.saturating_duration_since(start) >= self.study_duration())
    }

    /// Time left at `now`, or `None` with no session running.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        let start = self.session_start?;
        Some(
            self.study_duration()
                .saturating_sub(now.saturating_duration_since(start)),
        )
    }
}

/// Reads and writes [`StudySettings`] as JSON.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored limits; a missing file yields the defaults.
    pub fn load(&self, deck_dir: impl Into<PathBuf>) -> Result<StudySettings, SettingsError> {
        let mut settings = if self.path.exists() {
            let text = fs::read_to_string(&self.path)?;
            serde_json::from_str::<StudySettings>(&text)?
        } else {
            StudySettings::default()
        };
        settings.set_deck_dir(deck_dir);
        // Hand-edited files may hold zeros.
        settings.set_flash_card_limit(settings.flash_card_limit);
        settings.set_study_duration_min(settings.study_duration_min);
        Ok(settings)
    }

    pub fn save(&self, settings: &StudySettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_string_pretty(settings)?)?;
        fs::rename(&temp_path, &self.path)?;
        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}
