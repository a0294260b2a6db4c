use quiz_core::model::{Answer, Locale, Participant, QuestionOrdinal, QuizResult};

use super::progress::SessionProgress;
use super::service::SessionPhase;
use crate::archive::ArchiveReport;
use crate::presentation::{ChatMessage, PresentationEvent};

/// Transition notifications published to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started { first: QuestionOrdinal },
    Answered(Answer),
    Presentation(PresentationEvent),
    Finished(QuizResult),
    Archived(ArchiveReport),
    LocaleChanged(Locale),
    Reset,
    /// A timed transition failed to commit.
    Fault(String),
}

/// Point-in-time copy of the loop's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub participant: Option<Participant>,
    pub answers: Vec<Answer>,
    pub progress: SessionProgress,
    pub result: Option<QuizResult>,
    pub locale: Locale,
    pub composing: bool,
    pub pending_reveal: bool,
    pub transcript: Vec<ChatMessage>,
}
