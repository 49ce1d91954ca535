//! Pool feed ingestion.
//!
//! Provides:
//! - Feed message decoding
//! - Frame-based coalescing of pending updates
//! - The pool store that publishes snapshots
//! - Block timing telemetry
//! - An async pump wiring the store to channels

mod block_clock;
mod coalescer;
mod message;
mod pump;
mod store;

pub use block_clock::*;
pub use coalescer::*;
pub use message::*;
pub use pump::*;
pub use store::*;
