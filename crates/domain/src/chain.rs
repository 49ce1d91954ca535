//! Supported chains and their explorer URLs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chains the explorer can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Ethereum mainnet.
    #[default]
    Ethereum,
    /// Base.
    Base,
    /// Unichain.
    Unichain,
}

impl Chain {
    /// Lowercase slug used in external URLs.
    pub fn slug(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Base => "base",
            Chain::Unichain => "unichain",
        }
    }

    fn explorer_base(&self) -> &'static str {
        match self {
            Chain::Ethereum => "https://etherscan.io",
            Chain::Base => "https://basescan.org",
            Chain::Unichain => "https://unichain.blockscout.com",
        }
    }

    pub fn token_explorer_url(&self, address: &str) -> String {
        format!("{}/token/{}", self.explorer_base(), address)
    }

    pub fn address_explorer_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_base(), address)
    }

    /// Link to a pool on its protocol's own site, or the explorer otherwise.
    pub fn pool_url(&self, protocol: &str, pool_id: &str) -> String {
        let pancake_chain = match self {
            Chain::Ethereum => "eth",
            other => other.slug(),
        };
        match protocol {
            "uniswap_v2" | "uniswap_v3" | "uniswap_v4" => {
                format!("https://app.uniswap.org/explore/pools/{}/{}", self.slug(), pool_id)
            }
            "vm:balancer_v2" => format!("https://balancer.fi/pools/{}/v2/{}", self.slug(), pool_id),
            "pancakeswap_v3" => format!(
                "https://pancakeswap.finance/info/v3/{}/pairs/{}",
                pancake_chain, pool_id
            ),
            "pancakeswap_v2" => format!(
                "https://pancakeswap.finance/info/{}/pairs/{}",
                pancake_chain, pool_id
            ),
            _ => self.address_explorer_url(pool_id),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Chain::Ethereum => "Ethereum",
            Chain::Base => "Base",
            Chain::Unichain => "Unichain",
        };
        f.write_str(name)
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ethereum" => Ok(Chain::Ethereum),
            "base" => Ok(Chain::Base),
            "unichain" => Ok(Chain::Unichain),
            other => Err(format!("unknown chain: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_urls() {
        assert_eq!(
            Chain::Base.pool_url("uniswap_v3", "0xp"),
            "https://app.uniswap.org/explore/pools/base/0xp"
        );
        assert_eq!(
            Chain::Ethereum.pool_url("pancakeswap_v3", "0xp"),
            "https://pancakeswap.finance/info/v3/eth/pairs/0xp"
        );
        assert_eq!(
            Chain::Base.pool_url("pancakeswap_v2", "0xp"),
            "https://pancakeswap.finance/info/base/pairs/0xp"
        );
        assert_eq!(
            Chain::Unichain.pool_url("vm:curve", "0xp"),
            "https://unichain.blockscout.com/address/0xp"
        );
    }

    #[test]
    fn test_token_explorer_url() {
        assert_eq!(
            Chain::Ethereum.token_explorer_url("0xt"),
            "https://etherscan.io/token/0xt"
        );
    }

    #[test]
    fn test_parse_chain() {
        assert_eq!("BASE".parse::<Chain>().unwrap(), Chain::Base);
        assert!("solana".parse::<Chain>().is_err());
        assert_eq!(Chain::Unichain.to_string(), "Unichain");
    }
}
