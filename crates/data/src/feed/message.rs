//! Inbound feed message schema.

use crate::error::FeedError;
use dexscan_domain::pool::{PoolId, WireformatPool};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One message from the pool feed. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedMessage {
    /// Newly announced or replaced pools.
    #[serde(default)]
    pub new_pairs: BTreeMap<PoolId, WireformatPool>,
    /// Latest spot prices.
    #[serde(default)]
    pub spot_prices: BTreeMap<PoolId, f64>,
    /// Chain head; absent or zero keeps the previous head.
    #[serde(default)]
    pub block_number: Option<u64>,
}

impl FeedMessage {
    /// Decodes one feed payload.
    pub fn from_json(payload: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// The message block when it names a real block.
    pub fn block(&self) -> Option<u64> {
        self.block_number.filter(|b| *b > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.new_pairs.is_empty() && self.spot_prices.is_empty() && self.block().is_none()
    }
}
