use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Age, Answer, Category};

/// Whole-number share of the total weight per category.
///
/// Each entry is rounded on its own, so the four values can sum to 99 or 101.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Percentages {
    pub jolly: u32,
    pub slick: u32,
    pub buck: u32,
    pub snip: u32,
}

impl Percentages {
    #[must_use]
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Jolly => self.jolly,
            Category::Slick => self.slick,
            Category::Buck => self.buck,
            Category::Snip => self.snip,
        }
    }

    pub(crate) fn set(&mut self, category: Category, value: u32) {
        match category {
            Category::Jolly => self.jolly = value,
            Category::Slick => self.slick = value,
            Category::Buck => self.buck = value,
            Category::Snip => self.snip = value,
        }
    }

    #[must_use]
    pub fn sum(&self) -> u32 {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// `(category, percent)` pairs in canonical order, for breakdown bars.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// The scored outcome of one completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub personality: Category,
    pub percentages: Percentages,
    pub age: Age,
    pub answers: Vec<Answer>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
