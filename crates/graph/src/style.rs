//! Visual enrichment of a raw graph.

use crate::filter::FilterSelection;
use crate::model::{EdgeColor, EnrichedEdge, EnrichedGraph, EnrichedNode, Graph, NodeFont};
use dexscan_domain::logo::{CdnLogoMap, DEFAULT_TOKEN_IMAGE, LogoSnapshot};
use dexscan_domain::protocol::protocol_color;

/// Styling constants.
#[derive(Debug, Clone)]
pub struct StyleConfig {
    /// Node diameter in pixels.
    pub node_size: u32,
    /// Node label font size.
    pub font_size: u32,
    /// Node label color.
    pub font_color: String,
    /// Width of a resting edge.
    pub edge_width: f64,
    /// Width of an edge whose pool changed in the current block.
    pub current_block_edge_width: f64,
    /// Color of edges whose protocol is not selected.
    pub unselected_edge_color: String,
    /// Color of selected protocols missing from the color table.
    pub fallback_edge_color: String,
    /// Highlight color of edges changed in the current block.
    pub changed_edge_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            node_size: 32,
            font_size: 16,
            font_color: "#FFFFFF".to_string(),
            edge_width: 1.0,
            current_block_edge_width: 10.0,
            unselected_edge_color: "#848484".to_string(),
            fallback_edge_color: "#CCCCCC".to_string(),
            changed_edge_color: "#FF3366".to_string(),
        }
    }
}

/// Applies logos, colors and recency emphasis.
#[derive(Debug, Clone, Default)]
pub struct StyleEnricher {
    config: StyleConfig,
    cdn: CdnLogoMap,
}

impl StyleEnricher {
    /// Enricher over a style config and the CDN logo table.
    pub fn new(config: StyleConfig, cdn: CdnLogoMap) -> Self {
        Self { config, cdn }
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    pub fn cdn(&self) -> &CdnLogoMap {
        &self.cdn
    }

    /// Styles every node and edge of `graph`.
    pub fn enrich(
        &self,
        graph: &Graph,
        selection: &FilterSelection,
        logos: &LogoSnapshot,
    ) -> EnrichedGraph {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| EnrichedNode {
                id: node.id.clone(),
                label: node.label.clone(),
                shape: "circularImage".to_string(),
                image: logos.resolve(&self.cdn, &node.token),
                broken_image: DEFAULT_TOKEN_IMAGE.to_string(),
                size: self.config.node_size,
                font: NodeFont {
                    size: self.config.font_size,
                    color: self.config.font_color.clone(),
                },
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| {
                let color = self.edge_color(&edge.protocol, selection);
                let (width, highlight) = if edge.is_current_block {
                    (
                        self.config.current_block_edge_width,
                        self.config.changed_edge_color.clone(),
                    )
                } else {
                    (self.config.edge_width, color.clone())
                };
                EnrichedEdge {
                    id: edge.id.clone(),
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    color: EdgeColor { color, highlight },
                    width,
                    smooth: edge.smooth,
                    label: None,
                    pool_id: edge.pool_id.clone(),
                    protocol: edge.protocol.clone(),
                    is_current_block: edge.is_current_block,
                }
            })
            .collect();

        EnrichedGraph { nodes, edges }
    }

    /// Protocol color when selected, neutral gray otherwise.
    pub fn edge_color(&self, protocol: &str, selection: &FilterSelection) -> String {
        if !selection.is_protocol_selected(protocol) {
            return self.config.unselected_edge_color.clone();
        }
        protocol_color(protocol)
            .map(str::to_string)
            .unwrap_or_else(|| self.config.fallback_edge_color.clone())
    }
}
