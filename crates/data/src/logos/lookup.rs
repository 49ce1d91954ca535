//! Network logo lookups.

use crate::config::LogoConfig;
use crate::error::LogoError;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

/// Header carrying the CoinGecko API key.
pub const API_KEY_HEADER: &str = "x-cg-api-key";

/// Resolves a token symbol to an image URL.
#[async_trait]
pub trait LogoLookup: Send + Sync {
    /// Returns `Ok(None)` when the service has no logo for the symbol.
    async fn lookup(&self, symbol: &str) -> Result<Option<String>, LogoError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

#[derive(Debug, Deserialize)]
struct SearchCoin {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    large: Option<String>,
    #[serde(default)]
    thumb: Option<String>,
}

/// CoinGecko `/search` client.
#[derive(Debug, Clone)]
pub struct CoinGeckoLookup {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl CoinGeckoLookup {
    /// Builds the HTTP client with the configured timeout.
    pub fn new(config: &LogoConfig) -> Result<Self, LogoError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl LogoLookup for CoinGeckoLookup {
    async fn lookup(&self, symbol: &str) -> Result<Option<String>, LogoError> {
        let url = format!("{}/search", self.api_url);
        let mut request = self.client.get(&url).query(&[("query", symbol)]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::TOO_MANY_REQUESTS => return Err(LogoError::RateLimited),
            status if !status.is_success() => return Err(LogoError::Status(status.as_u16())),
            _ => {}
        }

        let body = response.text().await?;
        let image = pick_image(&body, symbol)?;
        debug!(symbol, found = image.is_some(), "CoinGecko search completed");
        Ok(image)
    }
}

/// Extracts the image of the first coin whose symbol matches exactly,
/// ignoring case.
pub fn pick_image(body: &str, symbol: &str) -> Result<Option<String>, LogoError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| LogoError::Decode(e.to_string()))?;
    Ok(response
        .coins
        .into_iter()
        .find(|coin| coin.symbol.eq_ignore_ascii_case(symbol))
        .and_then(|coin| coin.large.or(coin.thumb))
        .filter(|url| !url.is_empty()))
}
