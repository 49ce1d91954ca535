//! Pure graph pipeline stages.
//!
//! This crate turns a pool snapshot into an engine-ready graph:
//! - Pool filtering by token and protocol selection
//! - Token-node / pool-edge graph construction
//! - Curvature assignment for parallel edges
//! - Protocol coloring, recency emphasis and logo attachment
//! - A memoizing pipeline entry point
//!
//! Every stage is a function of its explicit inputs; nothing reads shared
//! state.

/// Prelude module for convenient imports.
pub mod prelude;

/// Pool filtering.
pub mod filter;
/// Graph node and edge types.
pub mod model;
/// Memoizing pipeline entry point.
pub mod pipeline;
/// Parallel-edge curvature.
pub mod smoothing;
/// Style enrichment.
pub mod style;
/// Pool to graph transformation.
pub mod transform;
