//! Block arrival telemetry.

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Bounds for block duration estimation.
#[derive(Debug, Clone)]
pub struct BlockClockConfig {
    /// Estimate used until two blocks have been observed.
    pub default_block_duration: Duration,
    /// Shortest inter-block duration accepted as a sample.
    pub min_block_duration: Duration,
    /// Longest inter-block duration accepted as a sample.
    pub max_block_duration: Duration,
}

impl Default for BlockClockConfig {
    fn default() -> Self {
        Self {
            default_block_duration: Duration::from_secs(12),
            min_block_duration: Duration::from_secs(1),
            max_block_duration: Duration::from_secs(60),
        }
    }
}

/// Tracks the chain head and estimates when the next block lands.
#[derive(Debug, Clone)]
pub struct BlockClock {
    config: BlockClockConfig,
    head: u64,
    last_block_at: Option<Instant>,
    estimated: Duration,
}

impl BlockClock {
    /// Clock with no head, estimating the configured default duration.
    pub fn new(config: BlockClockConfig) -> Self {
        let estimated = config.default_block_duration;
        Self {
            config,
            head: 0,
            last_block_at: None,
            estimated,
        }
    }

    pub fn head(&self) -> u64 {
        self.head
    }

    pub fn estimated_block_duration(&self) -> Duration {
        self.estimated
    }

    /// Records a block observation. Returns true when it advances the head.
    ///
    /// A lower block (rewind or reorg) becomes the new head and restarts
    /// timing without producing a duration sample.
    pub fn observe(&mut self, block: u64, at: Instant) -> bool {
        if block == 0 || block == self.head {
            return false;
        }
        if block < self.head {
            debug!(block, previous = self.head, "Head rewound");
            self.head = block;
            self.last_block_at = Some(at);
            return false;
        }
        if let Some(prev) = self.last_block_at {
            let gap = u32::try_from(block - self.head).unwrap_or(u32::MAX).max(1);
            let sample = at.saturating_duration_since(prev) / gap;
            if sample >= self.config.min_block_duration && sample <= self.config.max_block_duration {
                self.estimated = sample;
                debug!(block, estimate_ms = sample.as_millis() as u64, "Updated block duration");
            }
        }
        self.head = block;
        self.last_block_at = Some(at);
        true
    }

    /// Fraction of the estimated block duration elapsed, in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        let Some(last) = self.last_block_at else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(last).as_secs_f64();
        (elapsed / self.estimated.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn time_to_next_block(&self, now: Instant) -> Duration {
        match self.last_block_at {
            Some(last) => (last + self.estimated).saturating_duration_since(now),
            None => self.estimated,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }
}

impl Default for BlockClock {
    fn default() -> Self {
        Self::new(BlockClockConfig::default())
    }
}
