use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;

use quiz_core::model::{
    Answer, Category, OptionLabel, Participant, ParticipantDraft, Question, QuestionOption,
    QuestionOrdinal, QuizResult, StartRequirements,
};
use quiz_core::{QuestionBank, scoring};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Landing,
    /// Question `n` is awaiting an answer; `n - 1` answers are recorded.
    Asking(QuestionOrdinal),
    /// Question `n` was answered; the next reveal has not been committed.
    Advancing(QuestionOrdinal),
    Finished,
}

impl SessionPhase {
    #[must_use]
    pub fn is_landing(self) -> bool {
        matches!(self, SessionPhase::Landing)
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, SessionPhase::Finished)
    }

    /// Ordinal of the question on screen, if any.
    #[must_use]
    pub fn ordinal(self) -> Option<QuestionOrdinal> {
        match self {
            SessionPhase::Asking(n) | SessionPhase::Advancing(n) => Some(n),
            SessionPhase::Landing | SessionPhase::Finished => None,
        }
    }
}

/// Outcome of committing an `Advancing` session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next(QuestionOrdinal),
    Finished(QuizResult),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One participant's pass through a question bank.
///
/// Purely synchronous: callers decide when `advance` runs. Every transition
/// either succeeds completely or leaves the session untouched.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    requirements: StartRequirements,
    phase: SessionPhase,
    participant: Option<Participant>,
    answers: Vec<Answer>,
    result: Option<QuizResult>,
}

impl QuizSession {
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, requirements: StartRequirements) -> Self {
        Self {
            bank,
            requirements,
            phase: SessionPhase::Landing,
            participant: None,
            answers: Vec::new(),
            result: None,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn requirements(&self) -> StartRequirements {
        self.requirements
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn participant(&self) -> Option<&Participant> {
        self.participant.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// The scored result, once `Finished`.
    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.phase
            .ordinal()
            .and_then(|ordinal| self.bank.question(ordinal))
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.bank.len();
        let answered = self.answers.len();
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: self.phase.is_finished(),
            position: self.phase.ordinal(),
        }
    }

    /// Validate the participant and move to the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` outside `Landing` and
    /// `SessionError::Validation` for a bad name or age; the session stays
    /// in `Landing` either way.
    pub fn start(&mut self, draft: ParticipantDraft) -> Result<QuestionOrdinal, SessionError> {
        if !self.phase.is_landing() {
            return Err(SessionError::AlreadyStarted);
        }
        let participant = draft.validate(self.requirements)?;

        self.participant = Some(participant);
        self.phase = SessionPhase::Asking(QuestionOrdinal::FIRST);
        Ok(QuestionOrdinal::FIRST)
    }

    /// Record `category` for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAsking` unless a question is awaiting an
    /// answer, and `SessionError::OptionNotOffered` if the question has no
    /// option for `category`.
    pub fn answer(&mut self, category: Category) -> Result<Answer, SessionError> {
        let ordinal = self.asking()?;
        let question = self.question_at(ordinal)?;
        if question.option_for(category).is_none() {
            return Err(SessionError::OptionNotOffered { ordinal, category });
        }
        Ok(self.record(ordinal, category))
    }

    /// Record the option labelled `label` for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAsking` unless a question is awaiting an
    /// answer, and `SessionError::UnknownOption` for a label the question
    /// does not have.
    pub fn select(&mut self, label: OptionLabel) -> Result<(Answer, QuestionOption), SessionError> {
        let ordinal = self.asking()?;
        let option = self
            .question_at(ordinal)?
            .option(label)
            .cloned()
            .ok_or(SessionError::UnknownOption { ordinal, label })?;
        let answer = self.record(ordinal, option.category());
        Ok((answer, option))
    }

    /// Commit the pending transition: reveal the next question or score.
    ///
    /// `now` stamps the result and should come from the services clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAdvancing` unless an answer was just
    /// recorded, and `SessionError::Scoring` if scoring rejects the answers.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Advance, SessionError> {
        let SessionPhase::Advancing(ordinal) = self.phase else {
            return Err(SessionError::NotAdvancing);
        };

        if ordinal < self.bank.last_ordinal() {
            let next = ordinal.next();
            self.phase = SessionPhase::Asking(next);
            return Ok(Advance::Next(next));
        }

        let participant = self.participant.as_ref().ok_or(SessionError::NotStarted)?;
        let score = scoring::score(&self.answers, &self.bank, rng)?;
        let result = QuizResult {
            personality: score.winner,
            percentages: score.percentages,
            age: participant.age(),
            answers: self.answers.clone(),
            timestamp: now,
            name: participant.name().map(str::to_string),
        };

        self.phase = SessionPhase::Finished;
        self.result = Some(result.clone());
        Ok(Advance::Finished(result))
    }

    /// Discard everything and return to `Landing`. Valid from any phase.
    pub fn reset(&mut self) {
        self.phase = SessionPhase::Landing;
        self.participant = None;
        self.answers.clear();
        self.result = None;
    }

    fn asking(&self) -> Result<QuestionOrdinal, SessionError> {
        match self.phase {
            SessionPhase::Asking(ordinal) => Ok(ordinal),
            _ => Err(SessionError::NotAsking),
        }
    }

    fn question_at(&self, ordinal: QuestionOrdinal) -> Result<&Question, SessionError> {
        self.bank
            .question(ordinal)
            .ok_or(SessionError::UnknownQuestion { ordinal })
    }

    fn record(&mut self, ordinal: QuestionOrdinal, category: Category) -> Answer {
        let answer = Answer::new(ordinal, category);
        self.answers.push(answer);
        self.phase = SessionPhase::Advancing(ordinal);
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Age;
    use quiz_core::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> QuizSession {
        QuizSession::new(
            Arc::new(QuestionBank::reference().unwrap()),
            StartRequirements::default(),
        )
    }

    fn scenario() -> [Category; 7] {
        [
            Category::Jolly,
            Category::Snip,
            Category::Slick,
            Category::Buck,
            Category::Jolly,
            Category::Jolly,
            Category::Jolly,
        ]
    }

    #[test]
    fn answer_count_tracks_ordinal_until_finished() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = session();
        assert_eq!(session.start(ParticipantDraft::new("25")).unwrap(), QuestionOrdinal::FIRST);

        // Question 1 only offers jolly/slick.
        for (k, category) in scenario().into_iter().enumerate() {
            let SessionPhase::Asking(n) = session.phase() else {
                panic!("expected Asking, got {:?}", session.phase());
            };
            assert_eq!(n.index(), k);
            assert_eq!(session.answers().len(), k);

            session.answer(category).unwrap();
            assert_eq!(session.answers().len(), k + 1);
            assert!(!session.phase().is_finished());

            let advance = session.advance(&mut rng, fixed_now()).unwrap();
            if k + 1 < 7 {
                assert!(matches!(advance, Advance::Next(_)));
            } else {
                let Advance::Finished(result) = advance else {
                    panic!("expected Finished");
                };
                assert_eq!(result.personality, Category::Jolly);
                assert_eq!(result.percentages.jolly, 73);
                assert_eq!(result.age, Age::new(25).unwrap());
                assert_eq!(result.timestamp, fixed_now());
                assert_eq!(result.answers.len(), 7);
            }
        }

        assert!(session.phase().is_finished());
        assert_eq!(session.answers().len(), 7);
        assert!(session.result().is_some());
        assert!(session.progress().is_complete);
    }

    #[test]
    fn invalid_start_stays_on_landing() {
        let mut session = session();
        let err = session.start(ParticipantDraft::new("0")).unwrap_err();
        assert!(err.is_validation());
        assert!(session.phase().is_landing());

        let mut chat = QuizSession::new(
            Arc::new(QuestionBank::reference().unwrap()),
            StartRequirements { require_name: true },
        );
        assert!(chat.start(ParticipantDraft::new("30")).unwrap_err().is_validation());
        assert!(chat.phase().is_landing());
        chat.start(ParticipantDraft::new("30").with_name("Rina")).unwrap();
        assert_eq!(chat.participant().and_then(Participant::name), Some("Rina"));
    }

    #[test]
    fn transitions_out_of_order_are_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = session();
        assert!(matches!(
            session.answer(Category::Jolly),
            Err(SessionError::NotAsking)
        ));
        assert!(matches!(
            session.advance(&mut rng, fixed_now()),
            Err(SessionError::NotAdvancing)
        ));

        session.start(ParticipantDraft::new("40")).unwrap();
        assert!(matches!(
            session.start(ParticipantDraft::new("40")),
            Err(SessionError::AlreadyStarted)
        ));

        session.answer(Category::Slick).unwrap();
        assert!(matches!(
            session.answer(Category::Slick),
            Err(SessionError::NotAsking)
        ));
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn options_are_checked_against_the_current_question() {
        let mut session = session();
        session.start(ParticipantDraft::new("18")).unwrap();

        let err = session.answer(Category::Buck).unwrap_err();
        assert!(matches!(err, SessionError::OptionNotOffered { .. }));

        let err = session.select(OptionLabel::new('D').unwrap()).unwrap_err();
        assert!(matches!(err, SessionError::UnknownOption { .. }));
        assert!(session.answers().is_empty());

        let (answer, option) = session.select(OptionLabel::new('b').unwrap()).unwrap();
        assert_eq!(answer.category, Category::Slick);
        assert_eq!(option.text(quiz_core::model::Locale::En), "Female");
    }

    #[test]
    fn reset_from_any_phase_matches_a_fresh_session() {
        let fresh = session();
        let mut rng = StdRng::seed_from_u64(3);

        let mut landing = session();
        landing.reset();

        let mut mid = session();
        mid.start(ParticipantDraft::new("33")).unwrap();
        mid.answer(Category::Jolly).unwrap();
        mid.reset();

        let mut done = session();
        done.start(ParticipantDraft::new("33")).unwrap();
        for category in scenario() {
            done.answer(category).unwrap();
            done.advance(&mut rng, fixed_now()).unwrap();
        }
        done.reset();

        for reset in [&landing, &mid, &done] {
            assert_eq!(reset.phase(), fresh.phase());
            assert!(reset.answers().is_empty());
            assert!(reset.participant().is_none());
            assert!(reset.result().is_none());
            assert_eq!(reset.progress(), fresh.progress());
        }
    }

    #[test]
    fn progress_reports_position() {
        let mut session = session();
        assert_eq!(session.progress().percent(), 0);
        session.start(ParticipantDraft::new("21")).unwrap();
        let progress = session.progress();
        assert_eq!(progress.position, Some(QuestionOrdinal::FIRST));
        assert_eq!(progress.remaining, 7);
        assert_eq!(
            session.current_question().map(Question::ordinal),
            Some(QuestionOrdinal::FIRST)
        );
    }
}
