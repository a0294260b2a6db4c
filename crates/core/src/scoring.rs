//! Weighted scoring of a completed answer list.
//!
//! Every answer contributes its question's weight to the chosen category.
//! Percentages are rounded half away from zero, per category, and are not
//! renormalized: the four values may sum to anything in `97..=103`.

use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

use crate::bank::QuestionBank;
use crate::model::{Answer, Category, Percentages, QuestionOrdinal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("cannot score an empty answer list")]
    NoAnswers,

    #[error("answer refers to unknown question {ordinal}")]
    UnknownQuestion { ordinal: QuestionOrdinal },
}

/// Weighted sum of matching answers per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tallies([u32; 4]);

impl Tallies {
    #[must_use]
    pub fn get(&self, category: Category) -> u32 {
        self.0[slot(category)]
    }

    fn add(&mut self, category: Category, weight: u32) {
        let entry = &mut self.0[slot(category)];
        *entry = entry.saturating_add(weight);
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().fold(0_u32, |acc, v| acc.saturating_add(*v))
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Categories sharing the maximum tally, in canonical order.
    #[must_use]
    pub fn leaders(&self) -> Vec<Category> {
        let max = self.max();
        Category::ALL
            .into_iter()
            .filter(|c| self.get(*c) == max)
            .collect()
    }
}

fn slot(category: Category) -> usize {
    match category {
        Category::Jolly => 0,
        Category::Slick => 1,
        Category::Buck => 2,
        Category::Snip => 3,
    }
}

/// Output of [`score`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    pub winner: Category,
    pub percentages: Percentages,
    pub tallies: Tallies,
    /// Categories that shared the maximum; one element when there was no tie.
    pub leaders: Vec<Category>,
}

impl Score {
    #[must_use]
    pub fn was_tie(&self) -> bool {
        self.leaders.len() > 1
    }
}

/// Sum question weights per chosen category.
///
/// # Errors
///
/// Returns `ScoringError::UnknownQuestion` if an answer points outside the bank.
pub fn tally(answers: &[Answer], bank: &QuestionBank) -> Result<Tallies, ScoringError> {
    let mut tallies = Tallies::default();
    for answer in answers {
        let weight = bank
            .weight(answer.question)
            .ok_or(ScoringError::UnknownQuestion {
                ordinal: answer.question,
            })?;
        tallies.add(answer.category, weight);
    }
    Ok(tallies)
}

/// Score a full answer list and pick the winning category.
///
/// Ties on the maximum tally are broken uniformly at random with `rng`; the
/// draw happens on every call.
///
/// # Errors
///
/// Returns `ScoringError::NoAnswers` for an empty list and
/// `ScoringError::UnknownQuestion` for an answer outside the bank.
pub fn score<R: Rng + ?Sized>(
    answers: &[Answer],
    bank: &QuestionBank,
    rng: &mut R,
) -> Result<Score, ScoringError> {
    if answers.is_empty() {
        return Err(ScoringError::NoAnswers);
    }

    let tallies = tally(answers, bank)?;
    let total = tallies.total();
    if total == 0 {
        return Err(ScoringError::NoAnswers);
    }

    let mut percentages = Percentages::default();
    for category in Category::ALL {
        percentages.set(category, percent(tallies.get(category), total));
    }

    let leaders = tallies.leaders();
    let winner = match leaders.as_slice() {
        [only] => *only,
        tied => *tied.choose(rng).ok_or(ScoringError::NoAnswers)?,
    };

    Ok(Score {
        winner,
        percentages,
        tallies,
        leaders,
    })
}

fn percent(tally: u32, total: u32) -> u32 {
    let share = f64::from(tally) / f64::from(total) * 100.0;
    // f64::round rounds half away from zero.
    share.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LocalizedText, OptionLabel, Question, QuestionOption};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn uniform_bank(weights: &[u32]) -> QuestionBank {
        let questions = weights
            .iter()
            .enumerate()
            .map(|(index, weight)| {
                let options = Category::ALL
                    .iter()
                    .zip(['A', 'B', 'C', 'D'])
                    .map(|(category, letter)| {
                        QuestionOption::new(
                            OptionLabel::new(letter).unwrap(),
                            *category,
                            LocalizedText::new(letter.to_string(), letter.to_string()),
                        )
                    })
                    .collect();
                Question::new(
                    QuestionOrdinal::from_index(index).unwrap(),
                    LocalizedText::new("Q", "Q"),
                    options,
                    *weight,
                )
                .unwrap()
            })
            .collect();
        QuestionBank::new(questions).unwrap()
    }

    fn answers(categories: &[Category]) -> Vec<Answer> {
        categories
            .iter()
            .enumerate()
            .map(|(index, c)| Answer::new(QuestionOrdinal::from_index(index).unwrap(), *c))
            .collect()
    }

    #[test]
    fn weighted_scenario_picks_unique_leader() {
        use Category::{Buck, Jolly, Slick, Snip};
        let bank = uniform_bank(&[1, 1, 1, 1, 1, 3, 3]);
        let answers = answers(&[Jolly, Snip, Slick, Buck, Jolly, Jolly, Jolly]);
        let mut rng = StdRng::seed_from_u64(7);

        let score = score(&answers, &bank, &mut rng).unwrap();

        assert_eq!(score.tallies.get(Jolly), 8);
        assert_eq!(score.tallies.get(Snip), 1);
        assert_eq!(score.tallies.total(), 11);
        assert_eq!(
            score.percentages,
            Percentages {
                jolly: 73,
                slick: 9,
                buck: 9,
                snip: 9
            }
        );
        assert_eq!(score.winner, Jolly);
        assert!(!score.was_tie());
    }

    #[test]
    fn unique_leader_wins_on_every_call() {
        use Category::{Buck, Jolly, Slick};
        let bank = uniform_bank(&[1, 2, 1]);
        let answers = answers(&[Slick, Buck, Jolly]);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let score = score(&answers, &bank, &mut rng).unwrap();
            assert_eq!(score.winner, Buck);
            assert!(!score.was_tie());
            assert_eq!(score.leaders, vec![Buck]);
        }
    }

    #[test]
    fn four_way_tie_gives_even_split_and_any_winner() {
        let bank = uniform_bank(&[1, 1, 1, 1]);
        let answers = answers(&Category::ALL);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            let score = score(&answers, &bank, &mut rng).unwrap();
            assert_eq!(score.percentages.iter().map(|(_, p)| p).collect::<Vec<_>>(), vec![25; 4]);
            assert_eq!(score.leaders, Category::ALL.to_vec());
            seen.insert(score.winner);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn two_way_tie_is_roughly_fair_and_never_picks_outsiders() {
        use Category::{Buck, Jolly, Snip};
        let bank = uniform_bank(&[1, 1, 1, 1, 1]);
        // jolly 2, snip 2, buck 1
        let answers = answers(&[Jolly, Snip, Buck, Jolly, Snip]);
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 4_000;
        let mut jolly = 0;

        for _ in 0..trials {
            let winner = score(&answers, &bank, &mut rng).unwrap().winner;
            assert!(matches!(winner, Jolly | Snip), "outsider won: {winner}");
            if winner == Jolly {
                jolly += 1;
            }
        }
        let share = f64::from(jolly) / f64::from(trials);
        assert!((0.45..=0.55).contains(&share), "jolly share {share}");
    }

    #[test]
    fn rounding_is_half_away_from_zero_and_not_renormalized() {
        use Category::{Buck, Jolly, Slick, Snip};
        let bank = uniform_bank(&[1; 8]);
        // 1/8 = 12.5%, 3/8 = 37.5%
        let answers = answers(&[Jolly, Slick, Buck, Buck, Buck, Snip, Snip, Snip]);
        let mut rng = StdRng::seed_from_u64(1);

        let score = score(&answers, &bank, &mut rng).unwrap();

        assert_eq!(score.percentages.jolly, 13);
        assert_eq!(score.percentages.slick, 13);
        assert_eq!(score.percentages.buck, 38);
        assert_eq!(score.percentages.snip, 38);
        assert_eq!(score.percentages.sum(), 102);
    }

    #[test]
    fn percentages_stay_within_rounding_slack() {
        let weights = [1, 1, 1, 1, 1, 3, 3];
        let bank = uniform_bank(&weights);
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..500 {
            let picks: Vec<Category> = (0..weights.len())
                .map(|_| Category::ALL[rng.random_range(0..4)])
                .collect();
            let score = score(&answers(&picks), &bank, &mut rng).unwrap();
            for (_, pct) in score.percentages.iter() {
                assert!(pct <= 100);
            }
            let sum = i64::from(score.percentages.sum());
            assert!((sum - 100).abs() <= 3, "sum {sum}");
            assert!(score.leaders.contains(&score.winner));
        }
    }

    #[test]
    fn empty_answers_are_rejected() {
        let bank = uniform_bank(&[1]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(score(&[], &bank, &mut rng), Err(ScoringError::NoAnswers));
    }

    #[test]
    fn unknown_question_is_rejected() {
        let bank = uniform_bank(&[1, 1]);
        let stray = [Answer::new(QuestionOrdinal::new(5).unwrap(), Category::Buck)];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            score(&stray, &bank, &mut rng),
            Err(ScoringError::UnknownQuestion { .. })
        ));
    }
}
