use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use quiz_core::model::{
    Answer, Category, Locale, OptionLabel, ParticipantDraft, QuestionOption, QuestionOrdinal,
    QuizResult,
};
use quiz_core::{Clock, QuestionBank};

use super::events::{SessionEvent, SessionSnapshot};
use super::service::{Advance, QuizSession};
use crate::archive::ResultArchive;
use crate::error::SessionError;
use crate::presentation::{Cue, Presenter};
use crate::rng::SharedRng;
use crate::sound::{SoundBoard, SoundEffect};

const EVENT_CAPACITY: usize = 128;

/// Drives one [`QuizSession`] through its timed presentation.
///
/// Every delayed reveal runs on its own tokio task and is tagged with the
/// generation it was scheduled in. `reset` aborts the task and bumps the
/// generation, so a reveal that already woke up is dropped as stale. The
/// task only holds a weak handle; dropping the last `QuizLoop` cancels it.
///
/// Sound effects are queued while the state is locked and played after the
/// lock is released, so an [`AudioOutput`](crate::sound::AudioOutput) may
/// call back into the loop.
///
/// All operations that may schedule a reveal or archive a result must run
/// inside a tokio runtime.
#[derive(Clone)]
pub struct QuizLoop {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<LoopState>,
    events: broadcast::Sender<SessionEvent>,
    presenter: Arc<dyn Presenter>,
    sounds: Arc<SoundBoard>,
    archive: Arc<ResultArchive>,
    rng: SharedRng,
    clock: Clock,
}

struct LoopState {
    session: QuizSession,
    locale: Locale,
    generation: u64,
    pending: Option<PendingReveal>,
    sounds_due: Vec<SoundEffect>,
}

struct PendingReveal {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Debug, Clone, Copy)]
enum RevealAction {
    Show(QuestionOrdinal),
    Advance,
}

impl QuizLoop {
    #[must_use]
    pub fn new(
        bank: Arc<QuestionBank>,
        presenter: Arc<dyn Presenter>,
        sounds: Arc<SoundBoard>,
        archive: Arc<ResultArchive>,
        rng: SharedRng,
        clock: Clock,
    ) -> Self {
        let session = QuizSession::new(bank, presenter.style().requirements());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(LoopState {
                    session,
                    locale: Locale::default(),
                    generation: 0,
                    pending: None,
                    sounds_due: Vec::new(),
                }),
                events,
                presenter,
                sounds,
                archive,
                rng,
                clock,
            }),
        }
    }

    #[must_use]
    pub fn with_locale(self, locale: Locale) -> Self {
        self.shared.lock().locale = locale;
        self
    }

    /// Receive every transition from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    #[must_use]
    pub fn presenter(&self) -> Arc<dyn Presenter> {
        Arc::clone(&self.shared.presenter)
    }

    #[must_use]
    pub fn sounds(&self) -> Arc<SoundBoard> {
        Arc::clone(&self.shared.sounds)
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.shared.lock().locale
    }

    #[must_use]
    pub fn has_pending_reveal(&self) -> bool {
        self.shared.lock().pending.is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.shared.lock();
        SessionSnapshot {
            phase: state.session.phase(),
            participant: state.session.participant().cloned(),
            answers: state.session.answers().to_vec(),
            progress: state.session.progress(),
            result: state.session.result().cloned(),
            locale: state.locale,
            composing: self.shared.presenter.is_composing(),
            pending_reveal: state.pending.is_some(),
            transcript: self.shared.presenter.transcript(),
        }
    }

    /// Leave the landing screen and schedule the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Validation` for bad input and
    /// `SessionError::AlreadyStarted` outside `Landing`.
    ///
    /// # Panics
    ///
    /// Panics if a delayed reveal must be scheduled outside a tokio runtime.
    pub fn start(&self, draft: ParticipantDraft) -> Result<QuestionOrdinal, SessionError> {
        let shared = &self.shared;
        let mut state = shared.lock();
        let first = state.session.start(draft)?;

        let cue = {
            let participant = state.session.participant().ok_or(SessionError::NotStarted)?;
            let question = state
                .session
                .bank()
                .question(first)
                .ok_or(SessionError::UnknownQuestion { ordinal: first })?;
            shared.presenter.opening(participant, question, state.locale)
        };

        shared.emit(SessionEvent::Started { first });
        state.sounds_due.push(SoundEffect::Start);
        shared.schedule(&mut state, RevealAction::Show(first), cue);
        shared.release(state);
        Ok(first)
    }

    /// Record `category` for the question on screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RevealPending` while a reveal is scheduled,
    /// otherwise whatever [`QuizSession::answer`] rejects.
    ///
    /// # Panics
    ///
    /// Panics if a delayed reveal must be scheduled outside a tokio runtime.
    pub fn answer(&self, category: Category) -> Result<Answer, SessionError> {
        let mut state = self.shared.lock();
        if state.pending.is_some() {
            return Err(SessionError::RevealPending);
        }
        let answer = state.session.answer(category)?;
        self.shared.respond(&mut state, answer)?;
        self.shared.release(state);
        Ok(answer)
    }

    /// Record the option labelled `label` for the question on screen.
    ///
    /// # Errors
    ///
    /// Same as [`QuizLoop::answer`], plus `SessionError::UnknownOption`.
    ///
    /// # Panics
    ///
    /// Panics if a delayed reveal must be scheduled outside a tokio runtime.
    pub fn select(&self, label: OptionLabel) -> Result<(Answer, QuestionOption), SessionError> {
        let mut state = self.shared.lock();
        if state.pending.is_some() {
            return Err(SessionError::RevealPending);
        }
        let (answer, option) = state.session.select(label)?;
        self.shared.respond(&mut state, answer)?;
        self.shared.release(state);
        Ok((answer, option))
    }

    /// Cancel any pending reveal and return to a fresh `Landing` session.
    pub fn reset(&self) {
        let shared = &self.shared;
        let mut state = shared.lock();
        if let Some(pending) = state.pending.take() {
            pending.handle.abort();
            debug!(generation = pending.generation, "pending reveal cancelled");
        }
        state.generation = state.generation.wrapping_add(1);
        state.session.reset();
        for event in shared.presenter.reset() {
            shared.emit(SessionEvent::Presentation(event));
        }
        shared.emit(SessionEvent::Reset);
        state.sounds_due.push(SoundEffect::Click);
        shared.release(state);
    }

    pub fn set_locale(&self, locale: Locale) {
        self.shared.lock().locale = locale;
        self.shared.emit(SessionEvent::LocaleChanged(locale));
        self.shared.sounds.play(SoundEffect::Click);
    }

    /// Switch between the two locales. Returns the new one.
    pub fn toggle_locale(&self) -> Locale {
        let locale = self.locale().toggle();
        self.set_locale(locale);
        locale
    }
}

impl fmt::Debug for QuizLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("QuizLoop")
            .field("phase", &state.session.phase())
            .field("generation", &state.generation)
            .field("pending", &state.pending.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── REVEAL SCHEDULING ─────────────────────────────────────────────────────────
//

impl Shared {
    fn lock(&self) -> MutexGuard<'_, LoopState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    /// Unlock, then play whatever was queued under the lock.
    fn release(&self, mut state: MutexGuard<'_, LoopState>) {
        let due = std::mem::take(&mut state.sounds_due);
        drop(state);
        for effect in due {
            self.sounds.play(effect);
        }
    }

    fn respond(self: &Arc<Self>, state: &mut LoopState, answer: Answer) -> Result<(), SessionError> {
        let ordinal = answer.question;
        let cue = {
            let bank = state.session.bank();
            let question = bank
                .question(ordinal)
                .ok_or(SessionError::UnknownQuestion { ordinal })?;
            let choice = question
                .option_for(answer.category)
                .ok_or(SessionError::OptionNotOffered {
                    ordinal,
                    category: answer.category,
                })?;
            let next = if ordinal < bank.last_ordinal() {
                bank.question(ordinal.next())
            } else {
                None
            };
            self.presenter.after_answer(question, choice, next, state.locale)
        };

        self.emit(SessionEvent::Answered(answer));
        state.sounds_due.push(SoundEffect::Click);
        self.schedule(state, RevealAction::Advance, cue);
        Ok(())
    }

    fn schedule(self: &Arc<Self>, state: &mut LoopState, action: RevealAction, cue: Cue) {
        for event in cue.events {
            self.emit(SessionEvent::Presentation(event));
        }

        let schedule = cue.schedule;
        if schedule.is_immediate() {
            self.commit(state, action);
            return;
        }

        let generation = state.generation;
        let weak = Arc::downgrade(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(schedule.settle).await;
            if let Some(typing) = schedule.typing {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                if !shared.begin_typing(generation) {
                    return;
                }
                drop(shared);
                tokio::time::sleep(typing).await;
            }
            if let Some(shared) = weak.upgrade() {
                shared.fire(generation, action);
            }
        });
        state.pending = Some(PendingReveal { generation, handle });
    }

    fn is_current(state: &LoopState, generation: u64) -> bool {
        state.generation == generation
            && state
                .pending
                .as_ref()
                .is_some_and(|pending| pending.generation == generation)
    }

    fn begin_typing(&self, generation: u64) -> bool {
        let state = self.lock();
        if !Self::is_current(&state, generation) {
            debug!(generation, "stale typing phase dropped");
            return false;
        }
        for event in self.presenter.begin_typing() {
            self.emit(SessionEvent::Presentation(event));
        }
        true
    }

    fn fire(&self, generation: u64, action: RevealAction) {
        let mut state = self.lock();
        if !Self::is_current(&state, generation) {
            debug!(generation, ?action, "stale reveal dropped");
            return;
        }
        state.pending = None;
        self.commit(&mut state, action);
        self.release(state);
    }

    fn commit(&self, state: &mut LoopState, action: RevealAction) {
        if let Err(err) = self.try_commit(state, action) {
            error!(error = %err, ?action, "reveal failed to commit");
            self.emit(SessionEvent::Fault(err.to_string()));
        }
    }

    fn try_commit(&self, state: &mut LoopState, action: RevealAction) -> Result<(), SessionError> {
        match action {
            RevealAction::Show(ordinal) => self.show(state, ordinal),
            RevealAction::Advance => {
                let now = self.clock.now();
                let session = &mut state.session;
                match self.rng.with(|rng| session.advance(rng, now))? {
                    Advance::Next(next) => {
                        state.sounds_due.push(SoundEffect::Transition);
                        self.show(state, next)
                    }
                    Advance::Finished(result) => {
                        state.sounds_due.push(SoundEffect::Success);
                        self.finish(result, state.locale);
                        Ok(())
                    }
                }
            }
        }
    }

    fn show(&self, state: &LoopState, ordinal: QuestionOrdinal) -> Result<(), SessionError> {
        let question = state
            .session
            .bank()
            .question(ordinal)
            .ok_or(SessionError::UnknownQuestion { ordinal })?;
        for event in self.presenter.show_question(question, state.locale) {
            self.emit(SessionEvent::Presentation(event));
        }
        Ok(())
    }

    /// Publish the result, then archive it on a detached task.
    fn finish(&self, result: QuizResult, locale: Locale) {
        info!(
            personality = %result.personality,
            was_named = result.name.is_some(),
            "quiz finished"
        );
        self.emit(SessionEvent::Finished(result.clone()));

        let archive = Arc::clone(&self.archive);
        let events = self.events.clone();
        tokio::spawn(async move {
            let report = archive.record(&result, locale).await;
            let _ = events.send(SessionEvent::Archived(report));
        });
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = state.pending.take() {
            pending.handle.abort();
            debug!(generation = pending.generation, "loop dropped; pending reveal cancelled");
        }
    }
}
