//! Live graph rendering boundary.
//!
//! This crate keeps a force-directed layout engine in step with the graph
//! pipeline:
//! - Engine traits, payloads and options
//! - Incremental dataset synchronization with viewport preservation
//! - Click, tap, zoom and drag selection tracking
//! - Node and edge tooltips built from live pool data
//! - The `GraphView` component tying it together

/// Prelude module for convenient imports.
pub mod prelude;

/// Layout engine boundary.
pub mod engine;
/// Engine errors.
pub mod error;
/// Pointer normalization and selection.
pub mod interaction;
/// Dataset synchronization.
pub mod sync;
/// Tooltips.
pub mod tooltip;
/// Graph view component.
pub mod view;
