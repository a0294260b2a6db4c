//! Sharing a result, with a clipboard fallback.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use quiz_core::model::{Locale, QuizResult};
use quiz_core::strings;

use crate::error::ShareError;
use crate::sound::{SoundBoard, SoundEffect};

/// Native "share this text" capability offered by the host.
#[async_trait]
pub trait ShareTarget: Send + Sync {
    /// # Errors
    ///
    /// Returns `ShareError::Cancelled` if the user dismissed the sheet and
    /// `ShareError::Backend` for any other failure.
    async fn share(&self, title: &str, text: &str) -> Result<(), ShareError>;
}

pub trait Clipboard: Send + Sync {
    /// # Errors
    ///
    /// Returns `ShareError::Clipboard` when the text cannot be copied.
    fn copy(&self, text: &str) -> Result<(), ShareError>;
}

/// The desktop clipboard via `arboard`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ShareError> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text))
            .map_err(|err| ShareError::Clipboard(err.to_string()))
    }
}

/// What the user should be told after sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Cancelled,
    Copied { notice: &'static str },
    Failed { notice: &'static str },
}

impl ShareOutcome {
    /// Transient notice to show, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            ShareOutcome::Copied { notice } | ShareOutcome::Failed { notice } => Some(*notice),
            ShareOutcome::Shared | ShareOutcome::Cancelled => None,
        }
    }
}

pub struct ShareService {
    native: Option<Arc<dyn ShareTarget>>,
    clipboard: Arc<dyn Clipboard>,
    sounds: Arc<SoundBoard>,
}

impl ShareService {
    #[must_use]
    pub fn new(
        native: Option<Arc<dyn ShareTarget>>,
        clipboard: Arc<dyn Clipboard>,
        sounds: Arc<SoundBoard>,
    ) -> Self {
        Self {
            native,
            clipboard,
            sounds,
        }
    }

    /// Share `result` natively, falling back to the clipboard when no native
    /// target exists or it fails. Never returns an error.
    pub async fn share_result(&self, result: &QuizResult, locale: Locale) -> ShareOutcome {
        self.sounds.play(SoundEffect::Click);
        let text = strings::share_text(result.personality.name(locale), locale);

        if let Some(native) = &self.native {
            match native.share(strings::share_title(), &text).await {
                Ok(()) => return ShareOutcome::Shared,
                Err(ShareError::Cancelled) => {
                    debug!("share sheet dismissed");
                    return ShareOutcome::Cancelled;
                }
                Err(err) => warn!(error = %err, "native share failed; copying instead"),
            }
        }

        match self.clipboard.copy(&text) {
            Ok(()) => ShareOutcome::Copied {
                notice: strings::copied_to_clipboard(locale),
            },
            Err(err) => {
                warn!(error = %err, "failed to copy share text");
                ShareOutcome::Failed {
                    notice: strings::share_failed(locale),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::SilentOutput;
    use quiz_core::model::{Age, Category, Percentages};
    use quiz_core::time::fixed_now;
    use std::sync::Mutex;
    use storage::Storage;

    #[derive(Default)]
    struct MemoryClipboard {
        copied: Mutex<Vec<String>>,
        broken: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn copy(&self, text: &str) -> Result<(), ShareError> {
            if self.broken {
                return Err(ShareError::Clipboard("no display".into()));
            }
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    enum Native {
        Accept,
        Dismiss,
        Unsupported,
    }

    #[async_trait]
    impl ShareTarget for Native {
        async fn share(&self, title: &str, _text: &str) -> Result<(), ShareError> {
            assert_eq!(title, "Box of You Quiz");
            match self {
                Native::Accept => Ok(()),
                Native::Dismiss => Err(ShareError::Cancelled),
                Native::Unsupported => Err(ShareError::Backend("unsupported".into())),
            }
        }
    }

    fn result() -> QuizResult {
        QuizResult {
            personality: Category::Buck,
            percentages: Percentages::default(),
            age: Age::new(19).unwrap(),
            answers: Vec::new(),
            timestamp: fixed_now(),
            name: None,
        }
    }

    async fn sounds() -> Arc<SoundBoard> {
        Arc::new(SoundBoard::load(Arc::new(SilentOutput), Storage::in_memory().sound_preference()).await)
    }

    #[tokio::test]
    async fn without_native_target_text_is_copied() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let service = ShareService::new(None, clipboard.clone(), sounds().await);

        let outcome = service.share_result(&result(), Locale::Id).await;

        assert_eq!(outcome.notice(), Some("Hasil disalin ke clipboard!"));
        let copied = clipboard.copied.lock().unwrap().clone();
        assert_eq!(copied, vec![format!(
            "Aku dapat {} di Quiz Kepribadian Box of You!",
            Category::Buck.name(Locale::Id)
        )]);
    }

    #[tokio::test]
    async fn native_share_wins_and_cancel_is_quiet() {
        let clipboard = Arc::new(MemoryClipboard::default());
        let shared = ShareService::new(Some(Arc::new(Native::Accept)), clipboard.clone(), sounds().await);
        assert_eq!(shared.share_result(&result(), Locale::En).await, ShareOutcome::Shared);

        let cancelled = ShareService::new(
            Some(Arc::new(Native::Dismiss)),
            clipboard.clone(),
            sounds().await,
        );
        assert_eq!(cancelled.share_result(&result(), Locale::En).await, ShareOutcome::Cancelled);
        assert!(clipboard.copied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn native_failure_falls_back_then_reports_failure() {
        let broken = Arc::new(MemoryClipboard {
            broken: true,
            ..MemoryClipboard::default()
        });
        let service = ShareService::new(
            Some(Arc::new(Native::Unsupported)),
            broken,
            sounds().await,
        );

        let outcome = service.share_result(&result(), Locale::En).await;
        assert_eq!(
            outcome,
            ShareOutcome::Failed {
                notice: "Could not share the result"
            }
        );
    }
}
