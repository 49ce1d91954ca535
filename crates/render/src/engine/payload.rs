//! Payload shapes exchanged with the engine.

use dexscan_graph::model::EnrichedNode;
use serde::{Deserialize, Serialize};

/// Half-width of the square initial positions are seeded in.
pub const SEED_SPREAD: f64 = 400.0;

/// DOM element the engine renders into.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerHandle {
    /// Element id.
    pub id: String,
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl ContainerHandle {
    /// Handle for a container element of the given size.
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

/// Camera state: pan position and zoom scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

/// A node as first added to the engine, with a seeded position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineNode {
    #[serde(flatten)]
    pub node: EnrichedNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl EngineNode {
    /// Wraps a node with a position derived from its id.
    pub fn seeded(node: EnrichedNode) -> Self {
        let (x, y) = seed_position(&node.id);
        Self {
            node,
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn id(&self) -> &str {
        &self.node.id
    }
}

/// Update payload for an existing node. It has no position fields, so the
/// physics engine never re-places a settled node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NodeUpdate(pub EnrichedNode);

impl NodeUpdate {
    pub fn id(&self) -> &str {
        &self.0.id
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a. Fixed algorithm, so seeds survive toolchain upgrades.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

/// Deterministic starting position in `[-SEED_SPREAD, SEED_SPREAD]`.
pub fn seed_position(id: &str) -> (f64, f64) {
    let hash = fnv1a(id.as_bytes());
    let x = (hash & 0xffff_ffff) as f64 / u32::MAX as f64;
    let y = ((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64;
    ((x * 2.0 - 1.0) * SEED_SPREAD, (y * 2.0 - 1.0) * SEED_SPREAD)
}
