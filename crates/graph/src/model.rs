//! Graph values produced by the pipeline.
//!
//! Raw graphs come out of the transform stage; enriched graphs carry the
//! visual fields the layout engine consumes and serialize to its JSON shape.

use dexscan_domain::pool::PoolId;
use dexscan_domain::token::{Token, TokenAddress};
use serde::{Deserialize, Serialize};

/// A token node before styling.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Token address; unique within a graph.
    pub id: TokenAddress,
    /// Display label, the token symbol.
    pub label: String,
    /// Source token, kept for logo resolution.
    pub token: Token,
    /// Number of filtered pools containing this token.
    pub pool_count: usize,
}

/// Curve direction understood by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmoothType {
    /// Nearly straight.
    #[serde(rename = "continuous")]
    Continuous,
    /// Bends clockwise.
    #[serde(rename = "curvedCW")]
    CurvedCw,
    /// Bends counter-clockwise.
    #[serde(rename = "curvedCCW")]
    CurvedCcw,
}

/// Edge curvature descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Smooth {
    /// Whether the engine should curve the edge at all.
    pub enabled: bool,
    /// Curve direction.
    #[serde(rename = "type")]
    pub kind: SmoothType,
    /// Curve magnitude in `[0, 1]`.
    pub roundness: f64,
}

impl Smooth {
    /// Enabled smoothing of the given kind and roundness.
    pub fn new(kind: SmoothType, roundness: f64) -> Self {
        Self {
            enabled: true,
            kind,
            roundness,
        }
    }
}

impl Default for Smooth {
    fn default() -> Self {
        Self::new(SmoothType::Continuous, crate::smoothing::BASE_ROUNDNESS)
    }
}

/// A pool edge before styling.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    /// Pool id, or `{pool}-{i}-{j}` for pools with more than two tokens.
    pub id: String,
    /// Source token address.
    pub from: TokenAddress,
    /// Target token address.
    pub to: TokenAddress,
    /// Protocol system of the pool.
    pub protocol: String,
    /// Back-reference used by tooltips.
    pub pool_id: PoolId,
    /// Block of the pool's last update.
    pub last_updated_at_block: u64,
    /// Whether the pool changed in the current block.
    pub is_current_block: bool,
    /// Curvature, assigned by the smoother.
    pub smooth: Smooth,
}

/// Raw graph output of the transform stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Label font of a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeFont {
    pub size: u32,
    pub color: String,
}

/// Engine-facing node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedNode {
    pub id: TokenAddress,
    pub label: String,
    pub shape: String,
    pub image: String,
    pub broken_image: String,
    pub size: u32,
    pub font: NodeFont,
}

/// Edge color pair: resting color and the color shown when highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeColor {
    pub color: String,
    pub highlight: String,
}

/// Engine-facing edge. Pool metadata is kept for lookups but not sent to the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedEdge {
    pub id: String,
    pub from: TokenAddress,
    pub to: TokenAddress,
    pub color: EdgeColor,
    pub width: f64,
    pub smooth: Smooth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip)]
    pub pool_id: PoolId,
    #[serde(skip)]
    pub protocol: String,
    #[serde(skip)]
    pub is_current_block: bool,
}

/// Styled graph ready for synchronization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichedGraph {
    pub nodes: Vec<EnrichedNode>,
    pub edges: Vec<EnrichedEdge>,
}

impl EnrichedGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&EnrichedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&EnrichedEdge> {
        self.edges.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_serializes_engine_names() {
        let json = serde_json::to_value(Smooth::new(SmoothType::CurvedCcw, 0.2)).unwrap();
        assert_eq!(json["type"], "curvedCCW");
        assert_eq!(json["enabled"], true);
    }

    #[test]
    fn test_edge_metadata_is_not_serialized() {
        let edge = EnrichedEdge {
            id: "p1".to_string(),
            from: "a".to_string(),
            to: "b".to_string(),
            color: EdgeColor {
                color: "#2DD4BF".to_string(),
                highlight: "#FF3366".to_string(),
            },
            width: 10.0,
            smooth: Smooth::default(),
            label: None,
            pool_id: "p1".to_string(),
            protocol: "uniswap_v3".to_string(),
            is_current_block: true,
        };
        let json = serde_json::to_value(&edge).unwrap();
        assert!(json.get("pool_id").is_none());
        assert!(json.get("label").is_none());
        assert_eq!(json["smooth"]["type"], "continuous");
        assert_eq!(json["color"]["color"], "#2DD4BF");
    }
}
