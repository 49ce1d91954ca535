//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use dexscan_graph::prelude::*;
//! ```

// Filtering
pub use crate::filter::{FilterSelection, MIN_GRAPH_TOKENS, filter_pools};

// Model
pub use crate::model::{
    EdgeColor, EnrichedEdge, EnrichedGraph, EnrichedNode, Graph, GraphEdge, GraphNode, NodeFont,
    Smooth, SmoothType,
};

// Pipeline
pub use crate::pipeline::{FrameKey, GraphFrame, GraphPipeline};

// Smoothing
pub use crate::smoothing::{pair_key, roundness_for_level, smooth_parallel_edges};

// Styling
pub use crate::style::{StyleConfig, StyleEnricher};

// Transform
pub use crate::transform::{is_current_block, transform};
