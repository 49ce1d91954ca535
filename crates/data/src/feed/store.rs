//! Pool store publishing versioned snapshots.

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::feed::{BlockClock, FeedMessage, FrameCoalescer};
use chrono::{DateTime, Utc};
use dexscan_domain::pool::{Pool, PoolId};
use dexscan_domain::snapshot::PoolSnapshot;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, trace};

/// A buffered message with its arrival time.
#[derive(Debug, Clone)]
struct PendingMessage {
    message: FeedMessage,
    received_at: DateTime<Utc>,
    received_instant: Instant,
}

/// Counters for the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Messages accepted.
    pub messages: u64,
    /// Snapshots published.
    pub flushes: u64,
    /// Spot prices naming an unknown pool.
    pub orphan_prices: u64,
}

/// Owns the pool mapping. Updates accumulate in a pending buffer and are
/// applied, in arrival order, at most once per frame.
#[derive(Debug)]
pub struct PoolStore {
    pools: Arc<BTreeMap<PoolId, Arc<Pool>>>,
    version: u64,
    block_number: u64,
    pending: Vec<PendingMessage>,
    coalescer: FrameCoalescer,
    clock: BlockClock,
    stats: StoreStats,
}

impl PoolStore {
    /// Empty store at version 0 and block 0.
    pub fn new(config: FeedConfig) -> Self {
        Self {
            pools: Arc::new(BTreeMap::new()),
            version: 0,
            block_number: 0,
            pending: Vec::new(),
            coalescer: FrameCoalescer::new(config.frame_interval),
            clock: BlockClock::new(config.block_clock),
            stats: StoreStats::default(),
        }
    }

    /// Buffers a message received now.
    pub fn ingest(&mut self, message: FeedMessage) {
        self.ingest_at(message, Utc::now(), Instant::now());
    }

    /// Buffers a message with explicit arrival times.
    pub fn ingest_at(&mut self, message: FeedMessage, received_at: DateTime<Utc>, at: Instant) {
        if message.is_empty() {
            trace!("Ignoring empty feed message");
            return;
        }
        self.stats.messages += 1;
        self.pending.push(PendingMessage {
            message,
            received_at,
            received_instant: at,
        });
        self.coalescer.mark_pending();
    }

    /// Decodes and buffers a raw JSON payload.
    pub fn ingest_json(&mut self, payload: &str) -> Result<(), FeedError> {
        let message = FeedMessage::from_json(payload)?;
        self.ingest(message);
        Ok(())
    }

    /// Publishes a snapshot if updates are pending and a frame has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<PoolSnapshot> {
        if !self.coalescer.should_flush(now) {
            return None;
        }
        self.coalescer.record_flush(now);
        Some(self.apply_pending())
    }

    /// Applies pending updates immediately.
    pub fn flush(&mut self) -> PoolSnapshot {
        self.coalescer.record_flush(Instant::now());
        self.apply_pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.coalescer.next_deadline()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Current published state.
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            version: self.version,
            block_number: self.block_number,
            pools: Arc::clone(&self.pools),
        }
    }

    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    pub fn clock(&self) -> &BlockClock {
        &self.clock
    }

    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Drops every pool and pending update, as after a disconnect.
    pub fn reset(&mut self) -> PoolSnapshot {
        info!(pools = self.pools.len(), "Resetting pool store");
        self.pools = Arc::new(BTreeMap::new());
        self.block_number = 0;
        self.pending.clear();
        self.coalescer.clear();
        self.clock.reset();
        self.version += 1;
        self.snapshot()
    }

    fn apply_pending(&mut self) -> PoolSnapshot {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return self.snapshot();
        }

        let mut pools = (*self.pools).clone();
        for entry in &pending {
            self.apply_message(&mut pools, entry);
        }
        self.pools = Arc::new(pools);
        self.version += 1;
        self.stats.flushes += 1;

        debug!(
            version = self.version,
            block = self.block_number,
            messages = pending.len(),
            pools = self.pools.len(),
            "Published pool snapshot"
        );
        self.snapshot()
    }

    fn apply_message(&mut self, pools: &mut BTreeMap<PoolId, Arc<Pool>>, entry: &PendingMessage) {
        let message = &entry.message;
        let message_block = message.block();
        if let Some(block) = message_block {
            self.clock.observe(block, entry.received_instant);
            self.block_number = block;
        }

        for (id, wire) in &message.new_pairs {
            let price = message.spot_prices.get(id).copied().unwrap_or(0.0);
            let block = message_block.unwrap_or(self.block_number);
            let pool = Pool::from_wire(wire.clone(), price, entry.received_at, block);
            pools.insert(id.clone(), Arc::new(pool));
        }

        for (id, price) in &message.spot_prices {
            if message.new_pairs.contains_key(id) {
                continue;
            }
            match pools.get(id) {
                Some(existing) => {
                    let updated = existing.with_spot_price(*price, entry.received_at, message_block);
                    pools.insert(id.clone(), Arc::new(updated));
                }
                None => {
                    self.stats.orphan_prices += 1;
                    trace!(pool_id = %id, "Spot price for unknown pool");
                }
            }
        }
    }
}

impl Default for PoolStore {
    fn default() -> Self {
        Self::new(FeedConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexscan_domain::pool::WireformatPool;
    use dexscan_domain::token::Token;
    use std::time::Duration;

    fn wire(id: &str) -> WireformatPool {
        WireformatPool {
            id: id.to_string(),
            tokens: vec![
                Token::new("0x0000000000000000000000000000000000000000", "0x00", 18),
                Token::new("0xusdc", "USDC", 6),
            ],
            protocol_system: "uniswap_v3".to_string(),
            static_attributes: BTreeMap::new(),
            created_at: None,
        }
    }

    fn new_pair(id: &str, price: Option<f64>, block: Option<u64>) -> FeedMessage {
        let mut msg = FeedMessage::default();
        msg.new_pairs.insert(id.to_string(), wire(id));
        if let Some(price) = price {
            msg.spot_prices.insert(id.to_string(), price);
        }
        msg.block_number = block;
        msg
    }

    fn prices(id: &str, price: f64, block: Option<u64>) -> FeedMessage {
        let mut msg = FeedMessage::default();
        msg.spot_prices.insert(id.to_string(), price);
        msg.block_number = block;
        msg
    }

    #[test]
    fn test_new_pairs_take_message_block_and_price() {
        let mut store = PoolStore::default();
        store.ingest(new_pair("p1", Some(2.5), Some(100)));
        let snap = store.flush();

        let pool = snap.get("p1").unwrap();
        assert_eq!(pool.spot_price, 2.5);
        assert_eq!(pool.last_updated_at_block, 100);
        assert_eq!(pool.tokens[0].symbol, "ETH");
        assert_eq!(snap.block_number, 100);
        assert_eq!(snap.version, 1);
    }

    #[test]
    fn test_new_pair_without_block_uses_head() {
        let mut store = PoolStore::default();
        store.ingest(prices("x", 1.0, Some(50)));
        store.ingest(new_pair("p1", None, None));
        let snap = store.flush();
        let pool = snap.get("p1").unwrap();
        assert_eq!(pool.last_updated_at_block, 50);
        assert_eq!(pool.spot_price, 0.0);
    }

    #[test]
    fn test_spot_price_update_builds_new_value() {
        let mut store = PoolStore::default();
        store.ingest(new_pair("p1", Some(1.0), Some(100)));
        let before = store.flush();

        store.ingest(prices("p1", 2.0, None));
        let after = store.flush();

        assert_eq!(before.get("p1").unwrap().spot_price, 1.0);
        assert_eq!(after.get("p1").unwrap().spot_price, 2.0);
        assert_eq!(after.get("p1").unwrap().last_updated_at_block, 100);
        assert_eq!(after.block_number, 100);

        store.ingest(prices("p1", 3.0, Some(101)));
        let advanced = store.flush();
        assert_eq!(advanced.get("p1").unwrap().last_updated_at_block, 101);
    }

    #[test]
    fn test_missing_block_retains_head() {
        let mut store = PoolStore::default();
        store.ingest(new_pair("p1", None, Some(100)));
        store.ingest(prices("p1", 2.0, Some(0)));
        let snap = store.flush();
        assert_eq!(snap.block_number, 100);
    }

    #[test]
    fn test_delivered_block_is_head_even_when_lower() {
        let mut store = PoolStore::default();
        store.ingest(prices("x", 1.0, Some(100)));
        assert_eq!(store.flush().block_number, 100);

        store.ingest(new_pair("p1", None, Some(99)));
        let snap = store.flush();
        assert_eq!(snap.block_number, 99);
        assert_eq!(store.block_number(), 99);
        assert_eq!(snap.get("p1").unwrap().last_updated_at_block, 99);
        assert_eq!(store.clock().head(), 99);
    }

    #[test]
    fn test_orphan_prices_are_counted() {
        let mut store = PoolStore::default();
        store.ingest(prices("ghost", 1.0, None));
        store.flush();
        assert_eq!(store.stats().orphan_prices, 1);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_poll_coalesces_within_frame() {
        let mut store = PoolStore::new(FeedConfig {
            frame_interval: Duration::from_millis(16),
            ..FeedConfig::default()
        });
        let t0 = Instant::now();

        store.ingest(new_pair("p1", None, Some(1)));
        let first = store.poll(t0).unwrap();
        assert_eq!(first.version, 1);

        store.ingest(new_pair("p2", None, None));
        store.ingest(new_pair("p3", None, None));
        assert!(store.poll(t0 + Duration::from_millis(5)).is_none());

        let second = store.poll(t0 + Duration::from_millis(16)).unwrap();
        assert_eq!(second.version, 2);
        assert_eq!(second.len(), 3);
        assert!(store.poll(t0 + Duration::from_millis(40)).is_none());
    }

    #[test]
    fn test_published_snapshots_are_immutable() {
        let mut store = PoolStore::default();
        store.ingest(new_pair("p1", Some(1.0), Some(1)));
        let held = store.flush();
        store.ingest(prices("p1", 9.0, None));
        store.flush();
        assert_eq!(held.get("p1").unwrap().spot_price, 1.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = PoolStore::default();
        store.ingest(new_pair("p1", None, Some(5)));
        store.flush();
        store.ingest(new_pair("p2", None, None));
        let snap = store.reset();
        assert!(snap.is_empty());
        assert_eq!(snap.block_number, 0);
        assert!(!store.has_pending());
    }

    #[test]
    fn test_ingest_json_rejects_garbage() {
        let mut store = PoolStore::default();
        assert!(store.ingest_json("[1, 2").is_err());
        assert!(store.ingest_json(r#"{"block_number": 7}"#).is_ok());
        assert_eq!(store.flush().block_number, 7);
    }
}
