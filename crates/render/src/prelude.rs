//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use dexscan_render::prelude::*;
//! ```

// Engine
pub use crate::engine::{
    BarnesHut, ContainerHandle, EngineCall, EngineFactory, EngineNode, EngineOptions, GraphEngine,
    HeadlessEngine, HeadlessFactory, NodeUpdate, Viewport, seed_position,
};

// Errors
pub use crate::error::EngineError;

// Interaction
pub use crate::interaction::{
    ClickPayload, InteractionEvent, InteractionTracker, PointerPayload, PointerTarget,
    ScreenPoint, Selection, SelectionEffect, SelectionKind, TouchPoint, normalize_pointer,
};

// Sync
pub use crate::sync::{
    DatasetDiff, DatasetSynchronizer, DeferReason, PatchStats, SyncOutcome, SyncState,
    diff_edges, diff_nodes, retain_changed,
};

// Tooltip
pub use crate::tooltip::{
    CopyFeedback, EdgeTooltip, NodeTooltip, Placement, ProtocolCount, Tooltip, TooltipContent,
    TooltipContext, TooltipSize, ViewportBounds, place_tooltip, present,
};

// View
pub use crate::view::{GraphPrompt, GraphView, GraphViewConfig, ViewUpdate};
