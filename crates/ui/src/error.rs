//! Error types raised by the console toolkit.
//!
//! Every error carries a [`ErrorClass`] so callers can decide between aborting
//! startup (configuration mistakes) and treating the failure as a no-op.

use thiserror::Error;

use crate::scene::SceneId;

/// Classification of a [`UiError`], used to pick a recovery strategy.
///
/// - **Configuration**: programming or setup mistake, fatal at startup
/// - **NotFound**: lookup of an unregistered key, recoverable
/// - **OutOfRange**: index outside a collection, recoverable as a no-op
/// - **Terminal**: reading or flushing the terminal failed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    Configuration,
    NotFound,
    OutOfRange,
    Terminal,
}

impl ErrorClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::NotFound => "not_found",
            Self::OutOfRange => "out_of_range",
            Self::Terminal => "terminal",
        }
    }

    /// Returns true if the event loop may continue after this error.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound | Self::OutOfRange)
    }
}

/// Which art registry an art error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum ArtKind {
    #[strum(to_string = "ASCII")]
    Ascii,
    #[strum(to_string = "ANSI")]
    Ansi,
}

/// Errors surfaced by windows, widgets, scenes and the UI manager.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("{kind} art '{name}' is already registered")]
    DuplicateArt { kind: ArtKind, name: String },

    #[error("invalid art '{name}': {reason}")]
    InvalidArt { name: String, reason: String },

    #[error("button '{label}' is {width} columns wide, menu allows {max_width}")]
    ButtonTooWide {
        label: String,
        width: usize,
        max_width: usize,
    },

    #[error("scene '{0}' is already registered")]
    DuplicateScene(SceneId),

    #[error("{kind} art '{name}' not found")]
    ArtNotFound { kind: ArtKind, name: String },

    #[error("scene '{0}' not found")]
    SceneNotFound(SceneId),

    #[error("scene '{0}' has no menu")]
    MenuNotFound(SceneId),

    #[error("line {index} out of range for window with {rows} rows")]
    LineOutOfRange { index: usize, rows: usize },

    #[error("button {index} out of range for menu with {count} buttons")]
    ButtonOutOfRange { index: usize, count: usize },

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UiError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::DuplicateArt { .. }
            | Self::InvalidArt { .. }
            | Self::ButtonTooWide { .. }
            | Self::DuplicateScene(_) => ErrorClass::Configuration,
            Self::ArtNotFound { .. } | Self::SceneNotFound(_) | Self::MenuNotFound(_) => {
                ErrorClass::NotFound
            }
            Self::LineOutOfRange { .. } | Self::ButtonOutOfRange { .. } => ErrorClass::OutOfRange,
            Self::Io(_) => ErrorClass::Terminal,
        }
    }

    pub(crate) fn invalid_art(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArt {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UiError>;
