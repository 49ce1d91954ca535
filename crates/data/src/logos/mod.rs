//! Token logo resolution.
//!
//! Provides:
//! - The async lookup trait and its CoinGecko implementation
//! - Request throttling and retry with exponential backoff
//! - A synchronous cache fed by a single background worker

mod cache;
mod lookup;
mod throttle;

pub use cache::*;
pub use lookup::*;
pub use throttle::*;
