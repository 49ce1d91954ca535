//! Versioned, copy-on-write view of the pool collection.

use crate::pool::{Pool, PoolId};
use std::collections::BTreeMap;
use std::sync::Arc;

/// An immutable pool collection at a point in time.
///
/// Cloning is cheap: the map and every pool are shared. A reader holding a
/// snapshot never observes a later update.
#[derive(Debug, Clone, Default)]
pub struct PoolSnapshot {
    /// Monotonic version, bumped on every published change.
    pub version: u64,
    /// Chain head at publication time; 0 when unknown.
    pub block_number: u64,
    /// Pools keyed by id.
    pub pools: Arc<BTreeMap<PoolId, Arc<Pool>>>,
}

impl PoolSnapshot {
    /// Snapshot owning `pools` behind a shared pointer.
    pub fn new(version: u64, block_number: u64, pools: BTreeMap<PoolId, Arc<Pool>>) -> Self {
        Self {
            version,
            block_number,
            pools: Arc::new(pools),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Pool>> {
        self.pools.get(id)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Pool>> {
        self.pools.values()
    }

    /// Number of pools listing `address` among their tokens.
    pub fn pools_containing(&self, address: &str) -> usize {
        self.iter().filter(|p| p.contains_token(address)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use chrono::Utc;

    fn pool(id: &str, tokens: &[&str]) -> Arc<Pool> {
        Arc::new(Pool {
            id: id.to_string(),
            tokens: tokens.iter().map(|a| Token::new(*a, *a, 18)).collect(),
            protocol_system: "uniswap_v2".to_string(),
            static_attributes: BTreeMap::new(),
            created_at: None,
            spot_price: 0.0,
            updated_at: Utc::now(),
            last_updated_at_block: 0,
        })
    }

    #[test]
    fn test_pools_containing_counts_across_snapshot() {
        let mut pools = BTreeMap::new();
        pools.insert("p1".to_string(), pool("p1", &["a", "b"]));
        pools.insert("p2".to_string(), pool("p2", &["a", "c"]));
        pools.insert("p3".to_string(), pool("p3", &["b", "c"]));
        let snapshot = PoolSnapshot::new(1, 10, pools);

        assert_eq!(snapshot.pools_containing("a"), 2);
        assert_eq!(snapshot.pools_containing("d"), 0);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_clone_shares_pool_map() {
        let mut pools = BTreeMap::new();
        pools.insert("p1".to_string(), pool("p1", &["a", "b"]));
        let snapshot = PoolSnapshot::new(1, 0, pools);
        let copy = snapshot.clone();
        assert!(Arc::ptr_eq(&snapshot.pools, &copy.pools));
    }
}
