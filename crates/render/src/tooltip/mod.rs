//! Node and edge detail panels.
//!
//! Provides:
//! - Tooltip content derived from live pool data
//! - Viewport-clamped placement
//! - Copy-to-clipboard acknowledgement

mod content;
mod copy;
mod placement;
mod presenter;

pub use content::*;
pub use copy::*;
pub use placement::*;
pub use presenter::*;
