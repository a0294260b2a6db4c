use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use quiz_core::model::{Locale, Participant, Question, QuestionOption};
use quiz_core::strings;

use super::{
    ChatMessage, Cue, MessageRole, PresentationEvent, PresentationStyle, Presenter,
    RevealSchedule,
};

#[derive(Debug, Default)]
struct ChatState {
    transcript: Vec<ChatMessage>,
    composing: bool,
}

/// Simulated chat: greeting, echoed replies, and a typing indicator before
/// every prompt.
#[derive(Debug)]
pub struct ChatPresenter {
    short: Duration,
    long: Duration,
    state: Mutex<ChatState>,
}

impl ChatPresenter {
    #[must_use]
    pub fn new(short: Duration, long: Duration) -> Self {
        Self {
            short,
            long,
            state: Mutex::new(ChatState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChatState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn prompt_schedule(&self) -> RevealSchedule {
        RevealSchedule {
            settle: self.short,
            typing: (!self.long.is_zero()).then_some(self.long),
        }
    }
}

impl Presenter for ChatPresenter {
    fn style(&self) -> PresentationStyle {
        PresentationStyle::Chat
    }

    fn opening(&self, participant: &Participant, _first: &Question, locale: Locale) -> Cue {
        let greeting = ChatMessage {
            ordinal: None,
            role: MessageRole::Prompt,
            text: strings::greeting(participant.name(), locale),
        };
        self.lock().transcript.push(greeting.clone());
        Cue {
            events: vec![PresentationEvent::Message(greeting)],
            schedule: self.prompt_schedule(),
        }
    }

    fn after_answer(
        &self,
        question: &Question,
        choice: &QuestionOption,
        next: Option<&Question>,
        locale: Locale,
    ) -> Cue {
        let reply = ChatMessage {
            ordinal: Some(question.ordinal()),
            role: MessageRole::Reply,
            text: choice.text(locale).to_string(),
        };
        self.lock().transcript.push(reply.clone());

        // No typing indicator before the result; it is not a prompt.
        let schedule = if next.is_some() {
            self.prompt_schedule()
        } else {
            RevealSchedule {
                settle: self.short,
                typing: None,
            }
        };
        Cue {
            events: vec![PresentationEvent::Message(reply)],
            schedule,
        }
    }

    fn begin_typing(&self) -> Vec<PresentationEvent> {
        let mut state = self.lock();
        if state.composing {
            return Vec::new();
        }
        state.composing = true;
        vec![PresentationEvent::Composing(true)]
    }

    fn show_question(&self, question: &Question, locale: Locale) -> Vec<PresentationEvent> {
        let prompt = ChatMessage {
            ordinal: Some(question.ordinal()),
            role: MessageRole::Prompt,
            text: question.prompt(locale).to_string(),
        };

        let mut state = self.lock();
        let mut events = Vec::with_capacity(3);
        state.transcript.push(prompt.clone());
        if state.composing {
            state.composing = false;
            events.push(PresentationEvent::Composing(false));
        }
        events.push(PresentationEvent::Message(prompt));
        events.push(PresentationEvent::QuestionShown(question.ordinal()));
        events
    }

    fn reset(&self) -> Vec<PresentationEvent> {
        let mut state = self.lock();
        state.transcript.clear();
        if state.composing {
            state.composing = false;
            return vec![PresentationEvent::Composing(false)];
        }
        Vec::new()
    }

    fn is_composing(&self) -> bool {
        self.lock().composing
    }

    fn transcript(&self) -> Vec<ChatMessage> {
        self.lock().transcript.clone()
    }
}
