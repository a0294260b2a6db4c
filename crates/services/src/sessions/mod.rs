mod events;
mod history;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use events::{SessionEvent, SessionSnapshot};
pub use history::ResultHistoryService;
pub use progress::SessionProgress;
pub use service::{Advance, QuizSession, SessionPhase};
pub use workflow::QuizLoop;
