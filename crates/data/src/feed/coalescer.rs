//! Frame-rate coalescing of pending updates.

use std::time::Duration;
use tokio::time::Instant;

/// Allows at most one flush per frame interval while updates are pending.
#[derive(Debug, Clone)]
pub struct FrameCoalescer {
    interval: Duration,
    last_flush: Option<Instant>,
    pending: bool,
}

impl FrameCoalescer {
    /// Coalescer flushing at most once per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_flush: None,
            pending: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records that an update is waiting.
    pub fn mark_pending(&mut self) {
        self.pending = true;
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Earliest instant a flush may happen, if anything is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.pending {
            return None;
        }
        Some(match self.last_flush {
            Some(last) => last + self.interval,
            None => Instant::now(),
        })
    }

    pub fn should_flush(&self, now: Instant) -> bool {
        self.pending
            && self
                .last_flush
                .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Clears the pending flag and starts a new frame.
    pub fn record_flush(&mut self, now: Instant) {
        self.pending = false;
        self.last_flush = Some(now);
    }

    pub fn clear(&mut self) {
        self.pending = false;
    }
}
