use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Category, Locale, LocalizedText, OptionLabel, QuestionOrdinal};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {ordinal} needs at least two options, got {count}")]
    TooFewOptions { ordinal: QuestionOrdinal, count: usize },

    #[error("question {ordinal} repeats option label {label}")]
    DuplicateLabel {
        ordinal: QuestionOrdinal,
        label: OptionLabel,
    },

    #[error("question {ordinal} weight must be >= 1")]
    ZeroWeight { ordinal: QuestionOrdinal },
}

//
// ─── OPTION ────────────────────────────────────────────────────────────────────
//

/// One selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    label: OptionLabel,
    category: Category,
    text: LocalizedText,
}

impl QuestionOption {
    #[must_use]
    pub fn new(label: OptionLabel, category: Category, text: LocalizedText) -> Self {
        Self {
            label,
            category,
            text,
        }
    }

    #[must_use]
    pub fn label(&self) -> OptionLabel {
        self.label
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn text(&self, locale: Locale) -> &str {
        self.text.get(locale)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// An immutable multiple-choice question with an importance weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    ordinal: QuestionOrdinal,
    prompt: LocalizedText,
    options: Vec<QuestionOption>,
    weight: u32,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if there are fewer than two options, a label
    /// repeats, or the weight is zero.
    pub fn new(
        ordinal: QuestionOrdinal,
        prompt: LocalizedText,
        options: Vec<QuestionOption>,
        weight: u32,
    ) -> Result<Self, QuestionError> {
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                ordinal,
                count: options.len(),
            });
        }
        if weight == 0 {
            return Err(QuestionError::ZeroWeight { ordinal });
        }

        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.label) {
                return Err(QuestionError::DuplicateLabel {
                    ordinal,
                    label: option.label,
                });
            }
        }

        Ok(Self {
            ordinal,
            prompt,
            options,
            weight,
        })
    }

    #[must_use]
    pub fn ordinal(&self) -> QuestionOrdinal {
        self.ordinal
    }

    #[must_use]
    pub fn prompt(&self, locale: Locale) -> &str {
        self.prompt.get(locale)
    }

    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    #[must_use]
    pub fn weight(&self) -> u32 {
        self.weight
    }

    #[must_use]
    pub fn option(&self, label: OptionLabel) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.label == label)
    }

    /// First option leading to `category`, if the question offers one.
    #[must_use]
    pub fn option_for(&self, category: Category) -> Option<&QuestionOption> {
        self.options
            .iter()
            .find(|option| option.category == category)
    }
}
