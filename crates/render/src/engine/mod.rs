//! Boundary to the force-directed layout engine.
//!
//! Provides:
//! - The engine and factory traits
//! - Engine-facing node, edge and viewport payloads
//! - Physics and interaction options
//! - An in-memory headless engine

mod headless;
mod options;
mod payload;
mod traits;

pub use headless::*;
pub use options::*;
pub use payload::*;
pub use traits::*;
