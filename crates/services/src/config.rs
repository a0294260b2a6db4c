use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use quiz_core::model::Locale;

use crate::error::ConfigError;
use crate::presentation::{PresentationStyle, TimingConfig};

/// Process-level settings, read once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub db_url: String,
    pub submit_url: Option<String>,
    pub presentation: PresentationStyle,
    pub timing: TimingConfig,
    pub locale: Locale,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            db_url: "sqlite://quiz.sqlite3".into(),
            submit_url: None,
            presentation: PresentationStyle::Card,
            timing: TimingConfig::default(),
            locale: Locale::En,
        }
    }
}

impl QuizConfig {
    /// Read `QUIZ_*` variables from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first malformed variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`QuizConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first malformed variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = non_blank(lookup("QUIZ_DB_URL")) {
            config.db_url = normalize_sqlite_url(url);
        }
        config.submit_url = non_blank(lookup("QUIZ_SUBMIT_URL"));
        if let Some(raw) = non_blank(lookup("QUIZ_PRESENTATION")) {
            config.presentation = parse("QUIZ_PRESENTATION", raw)?;
        }
        if let Some(raw) = non_blank(lookup("QUIZ_LOCALE")) {
            config.locale = parse("QUIZ_LOCALE", raw)?;
        }
        if let Some(raw) = non_blank(lookup("QUIZ_SETTLE_DELAY_MS")) {
            config.timing.settle = millis("QUIZ_SETTLE_DELAY_MS", raw)?;
        }
        if let Some(raw) = non_blank(lookup("QUIZ_SHORT_DELAY_MS")) {
            config.timing.short = millis("QUIZ_SHORT_DELAY_MS", raw)?;
        }
        if let Some(raw) = non_blank(lookup("QUIZ_LONG_DELAY_MS")) {
            config.timing.long = millis("QUIZ_LONG_DELAY_MS", raw)?;
        }

        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

fn parse<T: FromStr>(var: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::InvalidValue { var, value: raw })
}

fn millis(var: &'static str, raw: String) -> Result<Duration, ConfigError> {
    parse::<u64>(var, raw).map(Duration::from_millis)
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") || raw.starts_with("sqlite:file:")
    {
        return raw;
    }

    let path_str = raw.strip_prefix("sqlite:").unwrap_or(raw.as_str()).to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = QuizConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, QuizConfig::default());
        assert_eq!(config.timing.settle, Duration::from_millis(300));
        assert!(config.submit_url.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let config = QuizConfig::from_lookup(lookup(&[
            ("QUIZ_DB_URL", "sqlite::memory:"),
            ("QUIZ_SUBMIT_URL", "https://example.test/submit"),
            ("QUIZ_PRESENTATION", "chat"),
            ("QUIZ_LOCALE", "id"),
            ("QUIZ_SETTLE_DELAY_MS", "0"),
            ("QUIZ_SHORT_DELAY_MS", "250"),
            ("QUIZ_LONG_DELAY_MS", "750"),
        ]))
        .unwrap();

        assert_eq!(config.db_url, "sqlite::memory:");
        assert_eq!(config.submit_url.as_deref(), Some("https://example.test/submit"));
        assert_eq!(config.presentation, PresentationStyle::Chat);
        assert_eq!(config.locale, Locale::Id);
        assert_eq!(config.timing.settle, Duration::ZERO);
        assert_eq!(config.timing.short, Duration::from_millis(250));
        assert_eq!(config.timing.long, Duration::from_millis(750));
    }

    #[test]
    fn blank_submit_url_disables_mirror() {
        let config = QuizConfig::from_lookup(lookup(&[("QUIZ_SUBMIT_URL", "  ")])).unwrap();
        assert!(config.submit_url.is_none());
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = QuizConfig::from_lookup(lookup(&[("QUIZ_LONG_DELAY_MS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: "QUIZ_LONG_DELAY_MS",
                value: "soon".into()
            }
        );
        assert!(QuizConfig::from_lookup(lookup(&[("QUIZ_PRESENTATION", "slides")])).is_err());
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:quiz.db".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("quiz.db"));
    }
}
