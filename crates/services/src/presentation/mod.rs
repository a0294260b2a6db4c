//! Presentation timing strategies.
//!
//! A [`Presenter`] decides how long to wait before the next question appears
//! and what the rendering layer sees meanwhile. It never touches answers or
//! scores; the session driver calls it on each transition and executes the
//! returned [`RevealSchedule`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{
    Locale, Participant, Question, QuestionOption, QuestionOrdinal, StartRequirements,
};

mod card;
mod chat;

pub use card::CardPresenter;
pub use chat::ChatPresenter;

/// Which presentation flow the quiz runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PresentationStyle {
    /// One question card at a time, swapped after a short settle delay.
    #[default]
    Card,
    /// Simulated chat with a greeting, reply echoes and a typing indicator.
    Chat,
}

impl PresentationStyle {
    /// The chat flow addresses the participant by name, so it needs one.
    #[must_use]
    pub fn requirements(self) -> StartRequirements {
        StartRequirements {
            require_name: matches!(self, PresentationStyle::Chat),
        }
    }
}

impl fmt::Display for PresentationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PresentationStyle::Card => "card",
            PresentationStyle::Chat => "chat",
        })
    }
}

impl FromStr for PresentationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "chat" => Ok(Self::Chat),
            other => Err(format!("unknown presentation style: {other}")),
        }
    }
}

/// Cosmetic delays. Any of them may be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Card flow: pause between an answer and the next card.
    pub settle: Duration,
    /// Chat flow: pause before the typing indicator appears.
    pub short: Duration,
    /// Chat flow: how long the typing indicator shows before the prompt.
    pub long: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(300),
            short: Duration::from_millis(500),
            long: Duration::from_millis(1000),
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn instant() -> Self {
        Self {
            settle: Duration::ZERO,
            short: Duration::ZERO,
            long: Duration::ZERO,
        }
    }
}

/// Waits to observe before committing a pending reveal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealSchedule {
    /// Plain pause.
    pub settle: Duration,
    /// Typing-indicator phase after the pause, if any.
    pub typing: Option<Duration>,
}

impl RevealSchedule {
    #[must_use]
    pub fn immediate() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_immediate(&self) -> bool {
        self.settle.is_zero() && self.typing.is_none()
    }
}

/// Who a chat bubble belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    Prompt,
    Reply,
}

/// One bubble in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// `None` for the greeting.
    pub ordinal: Option<QuestionOrdinal>,
    pub role: MessageRole,
    pub text: String,
}

/// What the rendering layer should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationEvent {
    QuestionShown(QuestionOrdinal),
    Message(ChatMessage),
    Composing(bool),
}

/// Immediate presentation output plus the wait before the next reveal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cue {
    pub events: Vec<PresentationEvent>,
    pub schedule: RevealSchedule,
}

pub trait Presenter: Send + Sync {
    fn style(&self) -> PresentationStyle;

    /// Called once the session has started; the first question is revealed
    /// when the returned schedule elapses.
    fn opening(&self, participant: &Participant, first: &Question, locale: Locale) -> Cue;

    /// Called after `choice` was recorded for `question`. `next` is `None`
    /// when that was the final question.
    fn after_answer(
        &self,
        question: &Question,
        choice: &QuestionOption,
        next: Option<&Question>,
        locale: Locale,
    ) -> Cue;

    /// The schedule's plain pause has elapsed and typing begins.
    fn begin_typing(&self) -> Vec<PresentationEvent>;

    /// The reveal fired; `question` is now current.
    fn show_question(&self, question: &Question, locale: Locale) -> Vec<PresentationEvent>;

    /// Drop all presentation state for a fresh session.
    fn reset(&self) -> Vec<PresentationEvent>;

    fn is_composing(&self) -> bool {
        false
    }

    fn transcript(&self) -> Vec<ChatMessage> {
        Vec::new()
    }
}

/// Build the presenter for `style`.
#[must_use]
pub fn presenter_for(style: PresentationStyle, timing: TimingConfig) -> Arc<dyn Presenter> {
    match style {
        PresentationStyle::Card => Arc::new(CardPresenter::new(timing.settle)),
        PresentationStyle::Chat => Arc::new(ChatPresenter::new(timing.short, timing.long)),
    }
}
