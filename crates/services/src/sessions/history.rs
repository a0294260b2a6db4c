use std::collections::BTreeMap;

use storage::{ResultLog, StorageError};

use quiz_core::model::{Category, QuizResult};

/// Read-only view over archived results.
#[derive(Clone)]
pub struct ResultHistoryService {
    log: ResultLog,
}

impl ResultHistoryService {
    #[must_use]
    pub fn new(log: ResultLog) -> Self {
        Self { log }
    }

    /// Up to `limit` results, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read. A corrupt log reads
    /// as empty.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<QuizResult>, StorageError> {
        let mut results = self.log.load().await?;
        results.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        results.truncate(limit);
        Ok(results)
    }

    /// How often each category has won, with zero counts included.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn winner_counts(&self) -> Result<BTreeMap<Category, usize>, StorageError> {
        let mut counts: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|c| (c, 0)).collect();
        for result in self.log.load().await? {
            *counts.entry(result.personality).or_default() += 1;
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{Age, Percentages};
    use quiz_core::time::fixed_now;
    use storage::Storage;

    fn result(personality: Category, minutes: i64) -> QuizResult {
        QuizResult {
            personality,
            percentages: Percentages::default(),
            age: Age::new(50).unwrap(),
            answers: Vec::new(),
            timestamp: fixed_now() + Duration::minutes(minutes),
            name: None,
        }
    }

    #[tokio::test]
    async fn lists_newest_first_and_counts_winners() {
        let storage = Storage::in_memory();
        let log = storage.results();
        log.append(&result(Category::Jolly, 0)).await.unwrap();
        log.append(&result(Category::Snip, 5)).await.unwrap();
        log.append(&result(Category::Jolly, 2)).await.unwrap();

        let history = ResultHistoryService::new(log);
        let recent = history.list_recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].personality, Category::Snip);
        assert_eq!(recent[1].timestamp, fixed_now() + Duration::minutes(2));

        let counts = history.winner_counts().await.unwrap();
        assert_eq!(counts[&Category::Jolly], 2);
        assert_eq!(counts[&Category::Snip], 1);
        assert_eq!(counts[&Category::Buck], 0);
    }
}
