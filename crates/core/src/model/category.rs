use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Locale;

/// The four personality outcomes a session can resolve to.
///
/// Closed set; the declaration order is the canonical order used for
/// tallies, percentages, and tie sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Jolly,
    Slick,
    Buck,
    Snip,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Jolly,
        Category::Slick,
        Category::Buck,
        Category::Snip,
    ];

    /// Lowercase identifier, as stored and submitted.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Category::Jolly => "jolly",
            Category::Slick => "slick",
            Category::Buck => "buck",
            Category::Snip => "snip",
        }
    }

    /// Display name. Both locales use the same proper noun.
    #[must_use]
    pub fn name(self, _locale: Locale) -> &'static str {
        match self {
            Category::Jolly => "Jolly",
            Category::Slick => "Slick",
            Category::Buck => "Buck",
            Category::Snip => "Snip",
        }
    }

    #[must_use]
    pub fn description(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Category::Jolly, Locale::En) => {
                "Fun-loving, cheerful, and loves being around people. They appreciate gifts that bring joy and laughter!"
            }
            (Category::Jolly, Locale::Id) => {
                "Ceria, suka bersenang-senang, dan menyukai keramaian. Mereka menghargai hadiah yang membawa kebahagiaan!"
            }
            (Category::Slick, Locale::En) => {
                "Calm, peaceful, and thoughtful. They value comfort and gifts that show care and attention."
            }
            (Category::Slick, Locale::Id) => {
                "Tenang, damai, dan bijaksana. Mereka menghargai kenyamanan dan hadiah yang menunjukkan perhatian."
            }
            (Category::Buck, Locale::En) => {
                "Deep, artistic, and emotional. They treasure gifts with meaning and sentimental value."
            }
            (Category::Buck, Locale::Id) => {
                "Mendalam, artistik, dan emosional. Mereka menghargai hadiah yang bermakna dan berkesan."
            }
            (Category::Snip, Locale::En) => {
                "Practical, productive, and goal-oriented. They prefer functional gifts that serve a purpose."
            }
            (Category::Snip, Locale::Id) => {
                "Praktis, produktif, dan terarah. Mereka lebih suka hadiah yang fungsional dan berguna."
            }
        }
    }

    /// Badge shown next to the result title.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Category::Jolly => "😄",
            Category::Slick => "😌",
            Category::Buck => "🎨",
            Category::Snip => "🎯",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
