//! Best-effort archiving of finished results.

use storage::ResultLog;
use tracing::{info, warn};

use quiz_core::model::{Locale, QuizResult};

use crate::mirror::RemoteMirror;

/// What happened to one archived result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Appended to the local log.
    pub stored: bool,
    /// Length of the local log after the append.
    pub archived_count: Option<usize>,
    /// A remote submission was dispatched; its outcome is not tracked.
    pub mirrored: bool,
}

/// Local log plus remote mirror; the two sinks fail independently.
#[derive(Clone)]
pub struct ResultArchive {
    log: ResultLog,
    mirror: RemoteMirror,
}

impl ResultArchive {
    #[must_use]
    pub fn new(log: ResultLog, mirror: RemoteMirror) -> Self {
        Self { log, mirror }
    }

    #[must_use]
    pub fn log(&self) -> &ResultLog {
        &self.log
    }

    /// Append `result` locally and dispatch the remote copy.
    ///
    /// Never fails: sink errors are logged and reflected in the report.
    pub async fn record(&self, result: &QuizResult, locale: Locale) -> ArchiveReport {
        let archived_count = match self.log.append(result).await {
            Ok(count) => Some(count),
            Err(err) => {
                warn!(error = %err, "failed to append quiz result to local log");
                None
            }
        };
        let mirrored = self.mirror.forward(result, locale);

        info!(
            personality = %result.personality,
            stored = archived_count.is_some(),
            mirrored,
            "quiz result archived"
        );
        ArchiveReport {
            stored: archived_count.is_some(),
            archived_count,
            mirrored,
        }
    }
}
