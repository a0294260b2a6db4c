mod answer;
mod category;
mod ids;
mod locale;
mod participant;
mod question;
mod result;

pub use answer::{Answer, join_categories};
pub use category::Category;
pub use ids::{OptionLabel, QuestionOrdinal};
pub use locale::{Locale, LocaleError, LocalizedText};
pub use participant::{Age, Participant, ParticipantDraft, ParticipantError, StartRequirements};
pub use question::{Question, QuestionError, QuestionOption};
pub use result::{Percentages, QuizResult};
