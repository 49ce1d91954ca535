//! Incremental synchronization of graph frames into a live engine.
//!
//! Provides:
//! - Keyed dataset diffs
//! - The engine lifecycle state machine

mod diff;
mod synchronizer;

pub use diff::*;
pub use synchronizer::*;
