//! Runtime configuration.
//!
//! Every setting has a default; `DEXSCAN_*` environment variables override
//! them.

use crate::error::ConfigError;
use crate::feed::BlockClockConfig;
use crate::logos::RetryPolicy;
use dexscan_domain::logo::DEFAULT_CDN_BASE;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const ENV_LOGO_CDN_BASE: &str = "DEXSCAN_LOGO_CDN_BASE";
pub const ENV_COINGECKO_API_URL: &str = "DEXSCAN_COINGECKO_API_URL";
pub const ENV_COINGECKO_API_KEY: &str = "DEXSCAN_COINGECKO_API_KEY";
pub const ENV_LOGO_REQUEST_DELAY_MS: &str = "DEXSCAN_LOGO_REQUEST_DELAY_MS";
pub const ENV_LOGO_MAX_RETRIES: &str = "DEXSCAN_LOGO_MAX_RETRIES";
pub const ENV_FRAME_INTERVAL_MS: &str = "DEXSCAN_FRAME_INTERVAL_MS";

/// Configuration for logo resolution.
#[derive(Debug, Clone)]
pub struct LogoConfig {
    /// Base URL of bundled logo images.
    pub cdn_base: String,
    /// CoinGecko API root.
    pub api_url: String,
    /// Optional CoinGecko API key, sent as `x-cg-api-key`.
    pub api_key: Option<String>,
    /// Fixed delay between outbound lookups.
    pub request_delay: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Retry behavior for failed lookups.
    pub retry: RetryPolicy,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            api_url: "https://api.coingecko.com/api/v3".to_string(),
            api_key: None,
            request_delay: Duration::from_millis(2400),
            request_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

/// Configuration for feed ingestion.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Minimum spacing between published snapshots.
    pub frame_interval: Duration,
    /// Block timing bounds.
    pub block_clock: BlockClockConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            block_clock: BlockClockConfig::default(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default)]
pub struct DexscanConfig {
    pub logo: LogoConfig,
    pub feed: FeedConfig,
}

impl DexscanConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(ENV_LOGO_CDN_BASE) {
            config.logo.cdn_base = base;
        }
        if let Some(url) = lookup(ENV_COINGECKO_API_URL) {
            config.logo.api_url = url.trim_end_matches('/').to_string();
        }
        config.logo.api_key = lookup(ENV_COINGECKO_API_KEY).filter(|k| !k.is_empty());
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_LOGO_REQUEST_DELAY_MS)? {
            config.logo.request_delay = Duration::from_millis(ms);
        }
        if let Some(retries) = parse_var::<u32, _>(&lookup, ENV_LOGO_MAX_RETRIES)? {
            config.logo.retry.max_retries = retries;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_FRAME_INTERVAL_MS)? {
            if ms == 0 {
                return Err(ConfigError::Invalid {
                    key: ENV_FRAME_INTERVAL_MS.to_string(),
                    value: ms.to_string(),
                    reason: "must be positive".to_string(),
                });
            }
            config.feed.frame_interval = Duration::from_millis(ms);
        }

        debug!(
            cdn_base = %config.logo.cdn_base,
            api_url = %config.logo.api_url,
            has_api_key = config.logo.api_key.is_some(),
            "Loaded configuration"
        );
        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}
