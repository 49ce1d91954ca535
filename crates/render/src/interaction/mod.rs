//! Pointer normalization and selection tracking.

mod pointer;
mod tracker;

pub use pointer::*;
pub use tracker::*;
