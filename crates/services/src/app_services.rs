use std::sync::Arc;

use storage::repository::Storage;

use quiz_core::{Clock, QuestionBank};

use crate::archive::ResultArchive;
use crate::config::QuizConfig;
use crate::error::AppServicesError;
use crate::mirror::RemoteMirror;
use crate::presentation::presenter_for;
use crate::rng::SharedRng;
use crate::sessions::{QuizLoop, ResultHistoryService};
use crate::share::{Clipboard, ShareService, ShareTarget, SystemClipboard};
use crate::sound::{AudioOutput, SoundBoard};

/// Process-wide services, built once and shared.
#[derive(Clone)]
pub struct AppServices {
    config: QuizConfig,
    clock: Clock,
    rng: SharedRng,
    storage: Storage,
    bank: Arc<QuestionBank>,
    sounds: Arc<SoundBoard>,
    archive: Arc<ResultArchive>,
    share: Arc<ShareService>,
    history: Arc<ResultHistoryService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage at `config.db_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        config: &QuizConfig,
        clock: Clock,
        audio: Arc<dyn AudioOutput>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.db_url).await?;
        Self::from_storage(storage, config, clock, audio).await
    }

    /// Build services over a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the question bank cannot be built.
    pub async fn in_memory(
        config: &QuizConfig,
        clock: Clock,
        audio: Arc<dyn AudioOutput>,
    ) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), config, clock, audio).await
    }

    async fn from_storage(
        storage: Storage,
        config: &QuizConfig,
        clock: Clock,
        audio: Arc<dyn AudioOutput>,
    ) -> Result<Self, AppServicesError> {
        let bank = Arc::new(QuestionBank::reference()?);
        let sounds = Arc::new(SoundBoard::load(audio, storage.sound_preference()).await);
        let archive = Arc::new(ResultArchive::new(
            storage.results(),
            RemoteMirror::new(config.submit_url.clone()),
        ));
        let share = Arc::new(ShareService::new(
            None,
            Arc::new(SystemClipboard),
            Arc::clone(&sounds),
        ));
        let history = Arc::new(ResultHistoryService::new(storage.results()));

        Ok(Self {
            config: config.clone(),
            clock,
            rng: SharedRng::from_os(),
            storage,
            bank,
            sounds,
            archive,
            share,
            history,
        })
    }

    /// Use a seeded random source, mainly for tests.
    #[must_use]
    pub fn with_rng(mut self, rng: SharedRng) -> Self {
        self.rng = rng;
        self
    }

    /// Replace the native share target and clipboard.
    #[must_use]
    pub fn with_share_backends(
        mut self,
        native: Option<Arc<dyn ShareTarget>>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        self.share = Arc::new(ShareService::new(
            native,
            clipboard,
            Arc::clone(&self.sounds),
        ));
        self
    }

    /// A new session driver with its own presenter state.
    #[must_use]
    pub fn new_loop(&self) -> QuizLoop {
        QuizLoop::new(
            Arc::clone(&self.bank),
            presenter_for(self.config.presentation, self.config.timing),
            Arc::clone(&self.sounds),
            Arc::clone(&self.archive),
            self.rng.clone(),
            self.clock,
        )
        .with_locale(self.config.locale)
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn sounds(&self) -> Arc<SoundBoard> {
        Arc::clone(&self.sounds)
    }

    #[must_use]
    pub fn archive(&self) -> Arc<ResultArchive> {
        Arc::clone(&self.archive)
    }

    #[must_use]
    pub fn share(&self) -> Arc<ShareService> {
        Arc::clone(&self.share)
    }

    #[must_use]
    pub fn history(&self) -> Arc<ResultHistoryService> {
        Arc::clone(&self.history)
    }
}
