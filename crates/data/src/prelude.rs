//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use dexscan_data::prelude::*;
//! ```

// Configuration
pub use crate::config::{DexscanConfig, FeedConfig, LogoConfig};

// Errors
pub use crate::error::{ConfigError, FeedError, LogoError};

// Feed
pub use crate::feed::{
    BlockClock, BlockClockConfig, FeedEvent, FeedMessage, FeedPump, FrameCoalescer, PoolStore,
};

// Logos
pub use crate::logos::{
    CoinGeckoLookup, LogoCache, LogoLookup, LogoRequest, LogoResolution, LogoStatus, LogoWorker,
    RetryPolicy, Throttle,
};
