use std::time::Duration;

use quiz_core::model::{Locale, Participant, Question, QuestionOption};

use super::{Cue, PresentationEvent, PresentationStyle, Presenter, RevealSchedule};

/// Shows each question at once; waits `settle` after an answer so the card
/// can animate out.
#[derive(Debug, Clone)]
pub struct CardPresenter {
    settle: Duration,
}

impl CardPresenter {
    #[must_use]
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }
}

impl Presenter for CardPresenter {
    fn style(&self) -> PresentationStyle {
        PresentationStyle::Card
    }

    fn opening(&self, _participant: &Participant, _first: &Question, _locale: Locale) -> Cue {
        Cue::default()
    }

    fn after_answer(
        &self,
        _question: &Question,
        _choice: &QuestionOption,
        _next: Option<&Question>,
        _locale: Locale,
    ) -> Cue {
        Cue {
            events: Vec::new(),
            schedule: RevealSchedule {
                settle: self.settle,
                typing: None,
            },
        }
    }

    fn begin_typing(&self) -> Vec<PresentationEvent> {
        Vec::new()
    }

    fn show_question(&self, question: &Question, _locale: Locale) -> Vec<PresentationEvent> {
        vec![PresentationEvent::QuestionShown(question.ordinal())]
    }

    fn reset(&self) -> Vec<PresentationEvent> {
        Vec::new()
    }
}
