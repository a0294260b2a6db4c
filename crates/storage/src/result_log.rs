use std::sync::Arc;

use quiz_core::model::QuizResult;

use crate::repository::{KeyValueStore, StorageError, keys};

/// Append-only list of finished results kept under `"quizResults"`.
///
/// The read-modify-write in [`ResultLog::append`] is not atomic against a
/// second writer on the same store; a concurrent append can be lost.
#[derive(Clone)]
pub struct ResultLog {
    store: Arc<dyn KeyValueStore>,
}

impl ResultLog {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load all archived results, oldest first.
    ///
    /// A missing or undecodable entry is treated as an empty log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the store itself cannot be read.
    pub async fn load(&self) -> Result<Vec<QuizResult>, StorageError> {
        let Some(raw) = self.store.get(keys::QUIZ_RESULTS).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<QuizResult>>(&raw) {
            Ok(results) => Ok(results),
            Err(err) => {
                tracing::warn!(%err, "discarding undecodable result log");
                Ok(Vec::new())
            }
        }
    }

    /// Append one result and write the whole list back.
    ///
    /// Returns the new number of archived results.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or written, or the
    /// list cannot be encoded.
    pub async fn append(&self, result: &QuizResult) -> Result<usize, StorageError> {
        let mut results = self.load().await?;
        results.push(result.clone());
        let encoded = serde_json::to_string(&results)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(keys::QUIZ_RESULTS, &encoded).await?;
        Ok(results.len())
    }
}
