use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Locale;
use crate::strings;

/// Errors raised while validating landing-screen input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParticipantError {
    #[error("age must be a whole number between {min} and {max}, got {raw:?}", min = Age::MIN, max = Age::MAX)]
    InvalidAge { raw: String },

    #[error("a display name is required")]
    MissingName,
}

impl ParticipantError {
    /// Transient message shown to the user.
    #[must_use]
    pub fn message(&self, locale: Locale) -> &'static str {
        match self {
            ParticipantError::InvalidAge { .. } => strings::invalid_age(locale),
            ParticipantError::MissingName => strings::missing_name(locale),
        }
    }
}

/// Validated age in `[1, 120]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Age(u8);

impl Age {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 120;

    /// # Errors
    ///
    /// Returns `ParticipantError::InvalidAge` when outside `[1, 120]`.
    pub fn new(years: u32) -> Result<Self, ParticipantError> {
        if !(Self::MIN..=Self::MAX).contains(&years) {
            return Err(ParticipantError::InvalidAge {
                raw: years.to_string(),
            });
        }
        let years = u8::try_from(years).map_err(|_| ParticipantError::InvalidAge {
            raw: years.to_string(),
        })?;
        Ok(Self(years))
    }

    /// Parse free-form text from the age input.
    ///
    /// # Errors
    ///
    /// Returns `ParticipantError::InvalidAge` for blank, non-numeric or out-of-range input.
    pub fn parse(raw: &str) -> Result<Self, ParticipantError> {
        let years: u32 = raw
            .trim()
            .parse()
            .map_err(|_| ParticipantError::InvalidAge {
                raw: raw.to_string(),
            })?;
        Self::new(years).map_err(|_| ParticipantError::InvalidAge {
            raw: raw.to_string(),
        })
    }

    #[must_use]
    pub fn years(self) -> u32 {
        u32::from(self.0)
    }
}

impl TryFrom<u32> for Age {
    type Error = ParticipantError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for u32 {
    fn from(age: Age) -> Self {
        age.years()
    }
}

/// What the landing screen must collect before a session can start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartRequirements {
    pub require_name: bool,
}

/// Raw landing-screen input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantDraft {
    pub name: Option<String>,
    pub age: String,
}

impl ParticipantDraft {
    #[must_use]
    pub fn new(age: impl Into<String>) -> Self {
        Self {
            name: None,
            age: age.into(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validate the draft against the given requirements.
    ///
    /// The name is checked first so the chat flow reports the field the user
    /// sees first.
    ///
    /// # Errors
    ///
    /// Returns `ParticipantError` on a missing required name or an invalid age.
    pub fn validate(self, requirements: StartRequirements) -> Result<Participant, ParticipantError> {
        let name = self
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        if requirements.require_name && name.is_none() {
            return Err(ParticipantError::MissingName);
        }
        let age = Age::parse(&self.age)?;
        Ok(Participant { name, age })
    }
}

/// The user taking the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    name: Option<String>,
    age: Age,
}

impl Participant {
    #[must_use]
    pub fn new(name: Option<String>, age: Age) -> Self {
        Self { name, age }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn age(&self) -> Age {
        self.age
    }
}
