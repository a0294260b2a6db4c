use thiserror::Error;

use crate::bank::QuestionBankError;
use crate::model::{ParticipantError, QuestionError};
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Participant(#[from] ParticipantError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
