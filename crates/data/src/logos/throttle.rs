//! Outbound rate limiting and retry policy.

use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Spaces calls at least `interval` apart.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    next_allowed: Option<Instant>,
}

impl Throttle {
    /// Throttle whose first `acquire` returns immediately.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_allowed: None,
        }
    }

    /// Waits for the next slot and reserves it.
    pub async fn acquire(&mut self) {
        if let Some(at) = self.next_allowed {
            sleep_until(at).await;
        }
        self.next_allowed = Some(Instant::now() + self.interval);
    }
}

/// Bounded retry with exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Upper bound on any single delay.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): doubles each time.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}
