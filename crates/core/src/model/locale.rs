use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two supported display languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct LocaleError(pub String);

impl Locale {
    /// Wire code (`"en"` / `"id"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }

    /// The other locale; used by the language toggle.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Locale::En => Locale::Id,
            Locale::Id => Locale::En,
        }
    }

    /// Human-readable name of the language itself.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Id => "Bahasa Indonesia",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "id" => Ok(Locale::Id),
            other => Err(LocaleError(other.to_string())),
        }
    }
}

/// A piece of text available in both locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedText {
    en: String,
    id: String,
}

impl LocalizedText {
    #[must_use]
    pub fn new(en: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            id: id.into(),
        }
    }

    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Id => &self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" id ".parse::<Locale>().unwrap(), Locale::Id);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn toggle_flips_between_locales() {
        assert_eq!(Locale::En.toggle(), Locale::Id);
        assert_eq!(Locale::En.toggle().toggle(), Locale::En);
    }

    #[test]
    fn localized_text_picks_variant() {
        let text = LocalizedText::new("Hello", "Halo");
        assert_eq!(text.get(Locale::En), "Hello");
        assert_eq!(text.get(Locale::Id), "Halo");
    }
}
