//! Error types for ingestion, logo lookups and configuration.

use thiserror::Error;

/// Errors raised while decoding feed messages.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The payload is not a valid feed message.
    #[error("malformed feed message: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised by a logo lookup.
#[derive(Debug, Error)]
pub enum LogoError {
    /// The service asked us to slow down.
    #[error("rate limited by logo service")]
    RateLimited,
    /// The service answered with an unexpected status.
    #[error("logo service returned status {0}")]
    Status(u16),
    /// The request could not be completed.
    #[error("logo request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response body could not be understood.
    #[error("invalid logo response: {0}")]
    Decode(String),
}

impl LogoError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LogoError::RateLimited | LogoError::Transport(_) => true,
            LogoError::Status(code) => *code >= 500,
            LogoError::Decode(_) => false,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}
