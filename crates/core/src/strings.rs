//! Fixed two-locale strings used outside the question bank.

use crate::model::Locale;

#[must_use]
pub fn invalid_age(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Please enter a valid age",
        Locale::Id => "Masukkan usia yang valid",
    }
}

#[must_use]
pub fn missing_name(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Please enter your name",
        Locale::Id => "Masukkan nama kamu",
    }
}

/// Opening chat bubble, addressed to the participant when a name is known.
#[must_use]
pub fn greeting(name: Option<&str>, locale: Locale) -> String {
    match (locale, name) {
        (Locale::En, Some(name)) => {
            format!("Hi {name}! 👋 Let's find out what kind of gift fits them best. 🎁")
        }
        (Locale::En, None) => {
            "Hi! 👋 Let's find out what kind of gift fits them best. 🎁".to_string()
        }
        (Locale::Id, Some(name)) => {
            format!("Halo {name}! 👋 Yuk cari tahu hadiah yang paling cocok buat doi. 🎁")
        }
        (Locale::Id, None) => {
            "Halo! 👋 Yuk cari tahu hadiah yang paling cocok buat doi. 🎁".to_string()
        }
    }
}

#[must_use]
pub fn share_title() -> &'static str {
    "Box of You Quiz"
}

#[must_use]
pub fn share_text(personality_name: &str, locale: Locale) -> String {
    match locale {
        Locale::En => format!("I got {personality_name} in the Box of You Personality Quiz!"),
        Locale::Id => format!("Aku dapat {personality_name} di Quiz Kepribadian Box of You!"),
    }
}

#[must_use]
pub fn copied_to_clipboard(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Result copied to clipboard!",
        Locale::Id => "Hasil disalin ke clipboard!",
    }
}

#[must_use]
pub fn share_failed(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Could not share the result",
        Locale::Id => "Hasil tidak bisa dibagikan",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_mentions_name_when_present() {
        assert!(greeting(Some("Ayu"), Locale::En).starts_with("Hi Ayu!"));
        assert!(greeting(None, Locale::Id).starts_with("Halo!"));
    }

    #[test]
    fn share_text_is_localized() {
        assert_eq!(
            share_text("Jolly", Locale::En),
            "I got Jolly in the Box of You Personality Quiz!"
        );
        assert_eq!(
            share_text("Buck", Locale::Id),
            "Aku dapat Buck di Quiz Kepribadian Box of You!"
        );
    }
}
