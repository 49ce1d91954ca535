//! Pool records, both as sent on the wire and as held in the store.

use crate::token::Token;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque pool identifier, usually the pool contract address.
pub type PoolId = String;

/// Attribute holding the LP fee of Uniswap V4 pools.
pub const V4_LP_FEE_ATTRIBUTE: &str = "key_lp_fee";
/// Attribute holding the fee of every other pool.
pub const FEE_ATTRIBUTE: &str = "fee";

/// A pool as delivered on the feed, before price and block bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireformatPool {
    pub id: PoolId,
    #[serde(default)]
    pub tokens: Vec<Token>,
    pub protocol_system: String,
    #[serde(default)]
    pub static_attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl WireformatPool {
    /// Applies the native-asset symbol convention to every token.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.tokens = self.tokens.into_iter().map(Token::normalized).collect();
        self
    }
}

/// A normalized pool. Values are never mutated in place; updates build a new
/// `Pool`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: PoolId,
    pub tokens: Vec<Token>,
    #[serde(rename = "protocol_system")]
    pub protocol_system: String,
    #[serde(rename = "static_attributes")]
    pub static_attributes: BTreeMap<String, String>,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    pub spot_price: f64,
    pub updated_at: DateTime<Utc>,
    pub last_updated_at_block: u64,
}

impl Pool {
    /// Builds a pool from its wire form, normalizing token symbols.
    pub fn from_wire(
        wire: WireformatPool,
        spot_price: f64,
        updated_at: DateTime<Utc>,
        last_updated_at_block: u64,
    ) -> Self {
        let wire = wire.normalized();
        Self {
            id: wire.id,
            tokens: wire.tokens,
            protocol_system: wire.protocol_system,
            static_attributes: wire.static_attributes,
            created_at: wire.created_at,
            spot_price,
            updated_at,
            last_updated_at_block,
        }
    }

    /// Returns a copy carrying a new spot price. The block is only advanced
    /// when one is supplied.
    #[must_use]
    pub fn with_spot_price(
        &self,
        spot_price: f64,
        updated_at: DateTime<Utc>,
        block: Option<u64>,
    ) -> Self {
        Self {
            spot_price,
            updated_at,
            last_updated_at_block: block.unwrap_or(self.last_updated_at_block),
            ..self.clone()
        }
    }

    /// Token addresses in pool order.
    pub fn token_addresses(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.address.as_str())
    }

    pub fn contains_token(&self, address: &str) -> bool {
        self.token_addresses().any(|a| a == address)
    }

    /// Raw hex fee attribute, preferring `key_lp_fee` for Uniswap V4 pools.
    pub fn fee_attribute(&self) -> Option<&str> {
        if self.protocol_system == "uniswap_v4" {
            if let Some(fee) = self.static_attributes.get(V4_LP_FEE_ATTRIBUTE) {
                if !fee.is_empty() {
                    return Some(fee);
                }
            }
        }
        self.static_attributes
            .get(FEE_ATTRIBUTE)
            .map(String::as_str)
            .filter(|f| !f.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(protocol: &str, attrs: &[(&str, &str)]) -> WireformatPool {
        WireformatPool {
            id: "0xpool".to_string(),
            tokens: vec![
                Token::new("0x0000000000000000000000000000000000000000", "0x0000", 18),
                Token::new("0xa0b8", "USDC", 6),
            ],
            protocol_system: protocol.to_string(),
            static_attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            created_at: None,
        }
    }

    #[test]
    fn test_from_wire_normalizes_tokens() {
        let pool = Pool::from_wire(wire("uniswap_v3", &[]), 1.5, Utc::now(), 7);
        assert_eq!(pool.tokens[0].symbol, "ETH");
        assert_eq!(pool.tokens[1].symbol, "USDC");
        assert_eq!(pool.last_updated_at_block, 7);
    }

    #[test]
    fn test_with_spot_price_keeps_block_without_update() {
        let pool = Pool::from_wire(wire("uniswap_v3", &[]), 1.0, Utc::now(), 7);
        let repriced = pool.with_spot_price(2.0, Utc::now(), None);
        assert_eq!(repriced.spot_price, 2.0);
        assert_eq!(repriced.last_updated_at_block, 7);
        assert_eq!(pool.spot_price, 1.0);

        let advanced = pool.with_spot_price(3.0, Utc::now(), Some(9));
        assert_eq!(advanced.last_updated_at_block, 9);
    }

    #[test]
    fn test_v4_prefers_lp_fee_attribute() {
        let pool = Pool::from_wire(
            wire("uniswap_v4", &[("fee", "0x800000"), ("key_lp_fee", "0x0bb8")]),
            0.0,
            Utc::now(),
            0,
        );
        assert_eq!(pool.fee_attribute(), Some("0x0bb8"));

        let v3 = Pool::from_wire(
            wire("uniswap_v3", &[("fee", "0x01f4"), ("key_lp_fee", "0x0bb8")]),
            0.0,
            Utc::now(),
            0,
        );
        assert_eq!(v3.fee_attribute(), Some("0x01f4"));
    }

    #[test]
    fn test_contains_token() {
        let pool = Pool::from_wire(wire("uniswap_v2", &[]), 0.0, Utc::now(), 0);
        assert!(pool.contains_token("0xa0b8"));
        assert!(!pool.contains_token("0xdead"));
    }
}
