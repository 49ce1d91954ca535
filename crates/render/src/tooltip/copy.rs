//! Transient "Copied!" feedback for the tooltip copy button.

use std::time::Duration;
use tokio::time::Instant;

/// How long "Copied!" stays visible.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_millis(1500);

/// Transient acknowledgement after a clipboard copy.
#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    copied_at: Option<Instant>,
}

impl CopyFeedback {
    /// Feedback that has never been triggered.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_at = Some(now);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPY_FEEDBACK_DURATION)
    }

    /// Button label at `now`.
    pub fn label(&self, now: Instant) -> &'static str {
        if self.is_active(now) { "Copied!" } else { "Copy" }
    }

    pub fn reset(&mut self) {
        self.copied_at = None;
    }
}
