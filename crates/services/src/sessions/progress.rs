use quiz_core::model::QuestionOrdinal;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
    /// Question currently on screen, if any.
    pub position: Option<QuestionOrdinal>,
}

impl SessionProgress {
    /// Progress-bar fill: the on-screen ordinal over the question count.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.is_complete {
            return 100;
        }
        let Some(position) = self.position else {
            return 0;
        };
        if self.total == 0 {
            return 0;
        }
        let total = u32::try_from(self.total).unwrap_or(u32::MAX);
        (position.value().saturating_mul(100) / total).min(100)
    }
}
