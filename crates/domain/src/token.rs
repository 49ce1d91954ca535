//! Token identity and native-asset symbol normalization.

use serde::{Deserialize, Serialize};

/// Symbol substituted for the all-zero native-asset placeholder.
pub const NATIVE_SYMBOL: &str = "ETH";

/// Token contract address; the unique key of a token.
pub type TokenAddress = String;

/// A token as delivered by the pool feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: TokenAddress,
    pub symbol: String,
    #[serde(default)]
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "logoURI", skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

impl Token {
    /// Token without name or logo.
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            decimals,
            name: None,
            logo_uri: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the feed-provided logo URI.
    #[must_use]
    pub fn with_logo_uri(mut self, uri: impl Into<String>) -> Self {
        self.logo_uri = Some(uri.into());
        self
    }

    /// Rewrites the all-zero hex placeholder symbol to [`NATIVE_SYMBOL`].
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if is_zero_hex(&self.symbol) {
            self.symbol = NATIVE_SYMBOL.to_string();
        }
        self
    }
}

/// Returns true for strings of the form `0x0...0` with at least one zero.
pub fn is_zero_hex(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b == b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_hex_symbol_normalizes_to_eth() {
        let token = Token::new(
            "0x0000000000000000000000000000000000000000",
            "0x0000000000000000000000000000000000000000",
            18,
        )
        .normalized();
        assert_eq!(token.symbol, "ETH");
    }

    #[test]
    fn test_regular_symbol_is_untouched() {
        let token = Token::new("0xa0b8", "USDC", 6).normalized();
        assert_eq!(token.symbol, "USDC");
    }

    #[test]
    fn test_is_zero_hex_edge_cases() {
        assert!(is_zero_hex("0x0"));
        assert!(!is_zero_hex("0x"));
        assert!(!is_zero_hex("0x01"));
        assert!(!is_zero_hex("0X00"));
        assert!(!is_zero_hex("000"));
    }

    #[test]
    fn test_logo_uri_wire_name() {
        let json = r#"{"address":"0xabc","symbol":"UNI","decimals":18,"logoURI":"https://x/uni.png"}"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.logo_uri.as_deref(), Some("https://x/uni.png"));
        assert!(token.name.is_none());
    }
}
