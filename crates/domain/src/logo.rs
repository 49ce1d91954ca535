//! Token logo sources that resolve synchronously.

use crate::token::{Token, TokenAddress};
use std::collections::HashMap;
use std::sync::Arc;

/// Gray circle placeholder shown when no logo is known or the image fails.
pub const DEFAULT_TOKEN_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMzIiIGhlaWdodD0iMzIiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+PGNpcmNsZSBjeD0iMTYiIGN5PSIxNiIgcj0iMTYiIGZpbGw9IiNEM0QzRDMiLz48L3N2Zz4=";

/// Default CDN base for bundled logos.
pub const DEFAULT_CDN_BASE: &str = "/logos";

const WRAPPED_ETHER: &str = "WETH";

/// Symbol to coin-id pairs for logos shipped on the CDN.
const BUNDLED_COIN_IDS: &[(&str, &str)] = &[
    ("ETH", "ethereum"),
    ("USDC", "usd-coin"),
    ("USDT", "tether"),
    ("DAI", "dai"),
    ("WBTC", "wrapped-bitcoin"),
    ("CBBTC", "coinbase-wrapped-btc"),
    ("UNI", "uniswap"),
    ("LINK", "chainlink"),
    ("AAVE", "aave"),
    ("MKR", "maker"),
    ("LDO", "lido-dao"),
    ("WSTETH", "wrapped-steth"),
    ("STETH", "staked-ether"),
    ("RETH", "rocket-pool-eth"),
    ("CRV", "curve-dao-token"),
    ("PEPE", "pepe"),
    ("SHIB", "shiba-inu"),
    ("USDE", "ethena-usde"),
    ("FRAX", "frax"),
    ("ARB", "arbitrum"),
];

/// Deterministic symbol to CDN URL mapping.
#[derive(Debug, Clone)]
pub struct CdnLogoMap {
    cdn_base: String,
    coin_ids: HashMap<String, String>,
}

impl Default for CdnLogoMap {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_BASE)
    }
}

impl CdnLogoMap {
    /// Creates a map over the bundled coin ids.
    pub fn new(cdn_base: impl Into<String>) -> Self {
        let coin_ids = BUNDLED_COIN_IDS
            .iter()
            .map(|(symbol, id)| (symbol.to_string(), id.to_string()))
            .collect();
        Self {
            cdn_base: cdn_base.into().trim_end_matches('/').to_string(),
            coin_ids,
        }
    }

    /// Adds or replaces a symbol mapping.
    #[must_use]
    pub fn with_coin_id(mut self, symbol: &str, coin_id: impl Into<String>) -> Self {
        self.coin_ids.insert(symbol.to_ascii_uppercase(), coin_id.into());
        self
    }

    pub fn coin_id(&self, symbol: &str) -> Option<&str> {
        self.coin_ids
            .get(&symbol.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// CDN URL for a symbol. WETH has its own asset.
    pub fn url_for(&self, symbol: &str) -> Option<String> {
        if symbol == WRAPPED_ETHER {
            return Some(format!("{}/weth.png", self.cdn_base));
        }
        self.coin_id(symbol)
            .map(|id| format!("{}/{}.png", self.cdn_base, id))
    }

    /// Logo available without any network lookup: the token's own URI, then
    /// the CDN.
    pub fn static_logo(&self, token: &Token) -> Option<String> {
        token
            .logo_uri
            .clone()
            .filter(|uri| !uri.is_empty())
            .or_else(|| self.url_for(&token.symbol))
    }
}

/// Read-only view of asynchronously resolved logos, keyed by token address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogoSnapshot {
    /// Bumped whenever a resolution adds a URL.
    pub version: u64,
    pub urls: Arc<HashMap<TokenAddress, String>>,
}

impl LogoSnapshot {
    pub fn get(&self, address: &str) -> Option<&str> {
        self.urls.get(address).map(String::as_str)
    }

    /// Final image for a token: static sources, then resolved lookups, then
    /// the placeholder.
    pub fn resolve(&self, cdn: &CdnLogoMap, token: &Token) -> String {
        cdn.static_logo(token)
            .or_else(|| self.get(&token.address).map(str::to_string))
            .unwrap_or_else(|| DEFAULT_TOKEN_IMAGE.to_string())
    }
}
