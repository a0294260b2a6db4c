#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod model;
pub mod scoring;
pub mod strings;
pub mod time;

pub use bank::{QuestionBank, QuestionBankError};
pub use error::Error;
pub use scoring::{Score, ScoringError, Tallies, score};
pub use time::Clock;
