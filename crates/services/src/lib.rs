#![forbid(unsafe_code)]

pub mod app_services;
pub mod archive;
pub mod config;
pub mod error;
pub mod mirror;
pub mod presentation;
pub mod rng;
pub mod sessions;
pub mod share;
pub mod sound;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use archive::{ArchiveReport, ResultArchive};
pub use config::QuizConfig;
pub use error::{
    AppServicesError, AudioError, ConfigError, MirrorError, SessionError, ShareError,
};
pub use mirror::{RemoteMirror, RemoteSummary};
pub use presentation::{
    CardPresenter, ChatMessage, ChatPresenter, MessageRole, PresentationEvent,
    PresentationStyle, Presenter, TimingConfig, presenter_for,
};
pub use rng::SharedRng;
pub use sessions::{
    Advance, QuizLoop, QuizSession, ResultHistoryService, SessionEvent, SessionPhase,
    SessionProgress, SessionSnapshot,
};
pub use share::{Clipboard, ShareOutcome, ShareService, ShareTarget, SystemClipboard};
pub use sound::{AudioOutput, SilentOutput, SoundBoard, SoundEffect};
