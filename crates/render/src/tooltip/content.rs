//! Renderable tooltip content.

use rust_decimal::Decimal;
use serde::Serialize;

/// Connections of one protocol touching a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolCount {
    pub protocol: String,
    pub name: String,
    pub count: usize,
}

/// Detail panel for a token node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTooltip {
    pub address: String,
    pub short_address: String,
    pub explorer_url: String,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pools in the whole snapshot containing the token.
    pub pool_count: usize,
    /// Edges touching the node in the current graph.
    pub connections: usize,
    /// Connections grouped by protocol, most frequent first.
    pub by_protocol: Vec<ProtocolCount>,
}

/// Detail panel for a pool edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeTooltip {
    pub pool_id: String,
    pub short_id: String,
    pub pool_url: String,
    pub protocol: String,
    pub protocol_name: String,
    pub tokens: Vec<String>,
    pub fee: Option<Decimal>,
    pub fee_display: String,
    pub spot_price: String,
    pub updated_ago: String,
    pub last_updated_at_block: u64,
    pub is_current_block: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TooltipContent {
    Node(NodeTooltip),
    Edge(EdgeTooltip),
}

impl TooltipContent {
    /// Value placed on the clipboard by the copy button.
    pub fn copy_value(&self) -> &str {
        match self {
            TooltipContent::Node(node) => &node.address,
            TooltipContent::Edge(edge) => &edge.pool_id,
        }
    }
}
