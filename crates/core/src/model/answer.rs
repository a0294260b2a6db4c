use serde::{Deserialize, Serialize};

use crate::model::{Category, QuestionOrdinal};

/// The category chosen for one question.
///
/// Appended once per question, in question order, and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Answer {
    pub question: QuestionOrdinal,
    pub category: Category,
}

impl Answer {
    #[must_use]
    pub fn new(question: QuestionOrdinal, category: Category) -> Self {
        Self { question, category }
    }
}

/// `"jolly, snip, slick"`: the answer list as submitted to the remote sink.
#[must_use]
pub fn join_categories(answers: &[Answer]) -> String {
    answers
        .iter()
        .map(|answer| answer.category.key())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_comma_and_space() {
        let answers = [
            Answer::new(QuestionOrdinal::FIRST, Category::Jolly),
            Answer::new(QuestionOrdinal::new(2).unwrap(), Category::Snip),
        ];
        assert_eq!(join_categories(&answers), "jolly, snip");
        assert_eq!(join_categories(&[]), "");
    }
}
