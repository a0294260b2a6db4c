use std::sync::Arc;

use crate::repository::{KeyValueStore, StorageError, keys};

/// The persisted sound mute flag.
#[derive(Clone)]
pub struct SoundPreference {
    store: Arc<dyn KeyValueStore>,
}

impl SoundPreference {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Only the exact string `"true"` means muted; anything else, including
    /// a missing key, means sound is on.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    pub async fn is_muted(&self) -> Result<bool, StorageError> {
        let raw = self.store.get(keys::SOUND_MUTED).await?;
        Ok(raw.as_deref() == Some("true"))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    pub async fn set_muted(&self, muted: bool) -> Result<(), StorageError> {
        let value = if muted { "true" } else { "false" };
        self.store.set(keys::SOUND_MUTED, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;

    #[tokio::test]
    async fn missing_or_unexpected_values_mean_unmuted() {
        let store = Arc::new(InMemoryStore::new());
        let pref = SoundPreference::new(store.clone());
        assert!(!pref.is_muted().await.unwrap());

        store.set(keys::SOUND_MUTED, "yes").await.unwrap();
        assert!(!pref.is_muted().await.unwrap());

        pref.set_muted(true).await.unwrap();
        assert!(pref.is_muted().await.unwrap());
        pref.set_muted(false).await.unwrap();
        assert_eq!(
            store.get(keys::SOUND_MUTED).await.unwrap().as_deref(),
            Some("false")
        );
    }
}
