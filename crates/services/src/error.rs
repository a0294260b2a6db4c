//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{Category, OptionLabel, ParticipantError, QuestionOrdinal};
use quiz_core::{QuestionBankError, ScoringError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the session state machine and its timed driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ParticipantError),
    #[error("session already started")]
    AlreadyStarted,
    #[error("session has not started")]
    NotStarted,
    #[error("no question is awaiting an answer")]
    NotAsking,
    #[error("no answer is waiting to be advanced")]
    NotAdvancing,
    #[error("a question reveal is still pending")]
    RevealPending,
    #[error("question {ordinal} does not offer {category}")]
    OptionNotOffered {
        ordinal: QuestionOrdinal,
        category: Category,
    },
    #[error("question {ordinal} has no option {label}")]
    UnknownOption {
        ordinal: QuestionOrdinal,
        label: OptionLabel,
    },
    #[error("question {ordinal} is not in the bank")]
    UnknownQuestion { ordinal: QuestionOrdinal },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl SessionError {
    /// True for input problems the landing screen should show as a notice.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::Validation(_))
    }
}

/// Errors from a single remote mirror submission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MirrorError {
    #[error("remote mirror is not configured")]
    Disabled,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors from an audio backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AudioError {
    #[error("audio output unavailable")]
    Unavailable,
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Errors from native share or clipboard backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShareError {
    #[error("share cancelled")]
    Cancelled,
    #[error("share backend failed: {0}")]
    Backend(String),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
}
