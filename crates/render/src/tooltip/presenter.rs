//! Builds tooltips from the current selection and live pool data.

use crate::interaction::{Selection, SelectionKind};
use crate::tooltip::{
    EdgeTooltip, NodeTooltip, Placement, ProtocolCount, TooltipContent, TooltipSize,
    ViewportBounds, place_tooltip,
};
use chrono::{DateTime, Utc};
use dexscan_domain::chain::Chain;
use dexscan_domain::fees::{format_fee, pool_fee_percent};
use dexscan_domain::format::{format_spot_price, format_time_ago, shorten_hex};
use dexscan_domain::protocol::readable_protocol_name;
use dexscan_domain::snapshot::PoolSnapshot;
use dexscan_domain::token::Token;
use dexscan_graph::model::EnrichedGraph;
use std::collections::HashMap;

/// Live data a tooltip is derived from.
#[derive(Debug, Clone, Copy)]
pub struct TooltipContext<'a> {
    pub snapshot: &'a PoolSnapshot,
    pub graph: &'a EnrichedGraph,
    pub chain: Chain,
    pub now: DateTime<Utc>,
}

/// A positioned tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub content: TooltipContent,
    pub placement: Placement,
}

/// Renders the tooltip for `selection`, or `None` when nothing is selected
/// or the selected element is gone from the graph.
pub fn present(
    selection: Option<&Selection>,
    ctx: &TooltipContext<'_>,
    size: TooltipSize,
    bounds: ViewportBounds,
) -> Option<Tooltip> {
    let selection = selection?;
    let content = match selection.kind {
        SelectionKind::Node => TooltipContent::Node(node_content(&selection.id, ctx)?),
        SelectionKind::Edge => TooltipContent::Edge(edge_content(&selection.id, ctx)?),
    };
    Some(Tooltip {
        content,
        placement: place_tooltip(selection.position, size, bounds),
    })
}

fn node_content(id: &str, ctx: &TooltipContext<'_>) -> Option<NodeTooltip> {
    let node = ctx.graph.node(id)?;
    let token = find_token(ctx.snapshot, id);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut connections = 0;
    for edge in ctx.graph.edges.iter().filter(|e| e.from == id || e.to == id) {
        *counts.entry(edge.protocol.as_str()).or_default() += 1;
        connections += 1;
    }
    let mut by_protocol: Vec<ProtocolCount> = counts
        .into_iter()
        .map(|(protocol, count)| ProtocolCount {
            protocol: protocol.to_string(),
            name: readable_protocol_name(protocol).to_string(),
            count,
        })
        .collect();
    by_protocol.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    Some(NodeTooltip {
        address: id.to_string(),
        short_address: shorten_hex(id),
        explorer_url: ctx.chain.token_explorer_url(id),
        symbol: token
            .map(|t| t.symbol.clone())
            .unwrap_or_else(|| node.label.clone()),
        name: token.and_then(|t| t.name.clone()),
        pool_count: ctx.snapshot.pools_containing(id),
        connections,
        by_protocol,
    })
}

fn edge_content(id: &str, ctx: &TooltipContext<'_>) -> Option<EdgeTooltip> {
    let edge = ctx.graph.edge(id)?;
    let pool = ctx.snapshot.get(&edge.pool_id)?;
    let fee = pool_fee_percent(pool);

    Some(EdgeTooltip {
        pool_id: pool.id.clone(),
        short_id: shorten_hex(&pool.id),
        pool_url: ctx.chain.pool_url(&pool.protocol_system, &pool.id),
        protocol: pool.protocol_system.clone(),
        protocol_name: readable_protocol_name(&pool.protocol_system).to_string(),
        tokens: pool.tokens.iter().map(|t| t.symbol.clone()).collect(),
        fee,
        fee_display: format_fee(fee),
        spot_price: format_spot_price(pool.spot_price),
        updated_ago: format_time_ago(Some(pool.updated_at), ctx.now),
        last_updated_at_block: pool.last_updated_at_block,
        is_current_block: edge.is_current_block,
    })
}

fn find_token<'a>(snapshot: &'a PoolSnapshot, address: &str) -> Option<&'a Token> {
    snapshot
        .iter()
        .flat_map(|pool| pool.tokens.iter())
        .find(|token| token.address == address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::ScreenPoint;
    use chrono::TimeZone;
    use dexscan_domain::pool::{Pool, WireformatPool};
    use dexscan_domain::token::Token;
    use dexscan_graph::model::{EdgeColor, EnrichedEdge, EnrichedNode, NodeFont, Smooth};
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    const ETH: &str = "0x0000000000000000000000000000000000000000";
    const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn pool(id: &str, protocol: &str, fee: &str) -> Pool {
        let wire = WireformatPool {
            id: id.to_string(),
            tokens: vec![
                Token::new(ETH, "ETH", 18),
                Token::new(USDC, "USDC", 6).with_name("USD Coin"),
            ],
            protocol_system: protocol.to_string(),
            static_attributes: BTreeMap::from([("fee".to_string(), fee.to_string())]),
            created_at: None,
        };
        Pool::from_wire(wire, 3500.0, now() - chrono::Duration::minutes(5), 100)
    }

    fn snapshot(pools: Vec<Pool>) -> PoolSnapshot {
        let map = pools
            .into_iter()
            .map(|p| (p.id.clone(), Arc::new(p)))
            .collect();
        PoolSnapshot::new(1, 100, map)
    }

    fn enriched_node(id: &str, label: &str) -> EnrichedNode {
        EnrichedNode {
            id: id.to_string(),
            label: label.to_string(),
            shape: "circularImage".to_string(),
            image: String::new(),
            broken_image: String::new(),
            size: 32,
            font: NodeFont {
                size: 16,
                color: "#FFFFFF".to_string(),
            },
        }
    }

    fn enriched_edge(id: &str, protocol: &str) -> EnrichedEdge {
        EnrichedEdge {
            id: id.to_string(),
            from: ETH.to_string(),
            to: USDC.to_string(),
            color: EdgeColor {
                color: "#3B82F6".to_string(),
                highlight: "#3B82F6".to_string(),
            },
            width: 10.0,
            smooth: Smooth::default(),
            label: None,
            pool_id: id.to_string(),
            protocol: protocol.to_string(),
            is_current_block: true,
        }
    }

    fn graph() -> EnrichedGraph {
        EnrichedGraph {
            nodes: vec![enriched_node(ETH, "ETH"), enriched_node(USDC, "USDC")],
            edges: vec![
                enriched_edge("0xp1", "uniswap_v2"),
                enriched_edge("0xp2", "uniswap_v3"),
                enriched_edge("0xp3", "uniswap_v3"),
            ],
        }
    }

    fn pools() -> PoolSnapshot {
        snapshot(vec![
            pool("0xp1", "uniswap_v2", "0x1e"),
            pool("0xp2", "uniswap_v3", "0xbb8"),
            pool("0xp3", "uniswap_v3", "0x1f4"),
            pool("0xp4", "vm:curve", "0x64"),
        ])
    }

    fn selection(kind: SelectionKind, id: &str) -> Selection {
        Selection {
            kind,
            id: id.to_string(),
            position: ScreenPoint::new(100.0, 100.0),
        }
    }

    const BOUNDS: ViewportBounds = ViewportBounds {
        width: 1200.0,
        height: 800.0,
    };

    #[test]
    fn test_no_selection_renders_nothing() {
        let (snapshot, graph) = (pools(), graph());
        let ctx = TooltipContext {
            snapshot: &snapshot,
            graph: &graph,
            chain: Chain::Ethereum,
            now: now(),
        };
        assert!(present(None, &ctx, TooltipSize::default(), BOUNDS).is_none());
    }

    #[test]
    fn test_node_tooltip_counts() {
        let (snapshot, graph) = (pools(), graph());
        let ctx = TooltipContext {
            snapshot: &snapshot,
            graph: &graph,
            chain: Chain::Ethereum,
            now: now(),
        };
        let tooltip = present(
            Some(&selection(SelectionKind::Node, USDC)),
            &ctx,
            TooltipSize::default(),
            BOUNDS,
        )
        .unwrap();
        let TooltipContent::Node(node) = tooltip.content else {
            panic!("expected node tooltip");
        };
        assert_eq!(node.pool_count, 4);
        assert_eq!(node.connections, 3);
        assert_eq!(node.short_address, "0xa0b8...eb48");
        assert_eq!(node.name.as_deref(), Some("USD Coin"));
        assert_eq!(node.by_protocol[0].name, "Uniswap V3");
        assert_eq!(node.by_protocol[0].count, 2);
        assert_eq!(node.by_protocol[1].name, "Uniswap V2");
        assert_eq!(tooltip.placement.left, 100.0);
    }

    #[test]
    fn test_node_pool_count_is_live() {
        let graph = graph();
        let sel = selection(SelectionKind::Node, ETH);
        let count_in = |snapshot: &PoolSnapshot| {
            let ctx = TooltipContext {
                snapshot,
                graph: &graph,
                chain: Chain::Ethereum,
                now: now(),
            };
            match present(Some(&sel), &ctx, TooltipSize::default(), BOUNDS).map(|t| t.content) {
                Some(TooltipContent::Node(node)) => node.pool_count,
                other => panic!("expected node tooltip, got {other:?}"),
            }
        };

        let before = count_in(&pools());
        let after = count_in(&snapshot(vec![
            pool("0xp1", "uniswap_v2", "0x1e"),
            pool("0xp2", "uniswap_v3", "0xbb8"),
            pool("0xp3", "uniswap_v3", "0x1f4"),
            pool("0xp4", "vm:curve", "0x64"),
            pool("0xp5", "uniswap_v4", "0x0"),
        ]));
        assert_eq!(after, before + 1);
    }

    #[test]
    fn test_edge_tooltip_fields() {
        let (snapshot, graph) = (pools(), graph());
        let ctx = TooltipContext {
            snapshot: &snapshot,
            graph: &graph,
            chain: Chain::Ethereum,
            now: now(),
        };
        let tooltip = present(
            Some(&selection(SelectionKind::Edge, "0xp2")),
            &ctx,
            TooltipSize::default(),
            BOUNDS,
        )
        .unwrap();
        let TooltipContent::Edge(edge) = tooltip.content else {
            panic!("expected edge tooltip");
        };
        assert_eq!(edge.protocol_name, "Uniswap V3");
        assert_eq!(edge.fee, Some(dec!(0.3)));
        assert_eq!(edge.fee_display, "0.3000%");
        assert_eq!(edge.updated_ago, "5 minutes ago");
        assert_eq!(edge.tokens, vec!["ETH", "USDC"]);
        assert!(edge.is_current_block);
    }

    #[test]
    fn test_edge_without_pool_renders_nothing() {
        let snapshot = snapshot(vec![pool("0xp1", "uniswap_v2", "0x1e")]);
        let graph = graph();
        let ctx = TooltipContext {
            snapshot: &snapshot,
            graph: &graph,
            chain: Chain::Ethereum,
            now: now(),
        };
        let sel = selection(SelectionKind::Edge, "0xp3");
        assert!(present(Some(&sel), &ctx, TooltipSize::default(), BOUNDS).is_none());
        let sel = selection(SelectionKind::Edge, "0xmissing");
        assert!(present(Some(&sel), &ctx, TooltipSize::default(), BOUNDS).is_none());
    }
}
