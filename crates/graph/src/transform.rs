//! Filtered pools to raw token/pool graph.

use crate::model::{Graph, GraphEdge, GraphNode, Smooth};
use dexscan_domain::pool::Pool;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// True when a pool updated in the current block. Block 0 means the head is
/// unknown and never matches.
pub fn is_current_block(last_updated_at_block: u64, current_block: u64) -> bool {
    current_block > 0 && last_updated_at_block == current_block
}

/// Builds one node per distinct token address and one edge per token pair
/// of each pool.
///
/// Two-token pools produce a single edge whose id is the pool id. Larger
/// pools produce `{pool}-{i}-{j}` edges. Pools with fewer than two tokens
/// contribute nodes only. Edge ids are unique: an edge whose id is already
/// taken is dropped with a warning, so the first pool in input order wins.
pub fn transform(pools: &[Arc<Pool>], current_block: u64) -> Graph {
    let mut graph = Graph::default();
    let mut node_index: HashMap<&str, usize> = HashMap::new();
    let mut edge_ids: HashSet<String> = HashSet::new();

    for pool in pools {
        let mut seen_in_pool = HashSet::new();
        for token in &pool.tokens {
            if !seen_in_pool.insert(token.address.as_str()) {
                continue;
            }
            match node_index.get(token.address.as_str()) {
                Some(&idx) => graph.nodes[idx].pool_count += 1,
                None => {
                    node_index.insert(token.address.as_str(), graph.nodes.len());
                    graph.nodes.push(GraphNode {
                        id: token.address.clone(),
                        label: token.symbol.clone(),
                        token: token.clone(),
                        pool_count: 1,
                    });
                }
            }
        }

        let recent = is_current_block(pool.last_updated_at_block, current_block);
        match pool.tokens.len() {
            0 | 1 => {
                debug!(pool_id = %pool.id, tokens = pool.tokens.len(), "Pool has no token pair");
            }
            2 => push_edge(&mut graph, &mut edge_ids, pool, pool.id.clone(), 0, 1, recent),
            n => {
                for i in 0..n {
                    for j in (i + 1)..n {
                        let id = format!("{}-{}-{}", pool.id, i, j);
                        push_edge(&mut graph, &mut edge_ids, pool, id, i, j, recent);
                    }
                }
            }
        }
    }

    graph
}

fn push_edge(
    graph: &mut Graph,
    edge_ids: &mut HashSet<String>,
    pool: &Pool,
    id: String,
    i: usize,
    j: usize,
    recent: bool,
) {
    let (from, to) = (&pool.tokens[i].address, &pool.tokens[j].address);
    if from == to {
        debug!(pool_id = %pool.id, edge_id = %id, "Skipping self-loop edge");
        return;
    }
    if !edge_ids.insert(id.clone()) {
        warn!(pool_id = %pool.id, edge_id = %id, "Edge id already taken, dropping edge");
        return;
    }
    graph.edges.push(GraphEdge {
        id,
        from: from.clone(),
        to: to.clone(),
        protocol: pool.protocol_system.clone(),
        pool_id: pool.id.clone(),
        last_updated_at_block: pool.last_updated_at_block,
        is_current_block: recent,
        smooth: Smooth::default(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dexscan_domain::token::Token;
    use std::collections::BTreeMap;

    fn pool(id: &str, tokens: &[&str], block: u64) -> Arc<Pool> {
        Arc::new(Pool {
            id: id.to_string(),
            tokens: tokens.iter().map(|a| Token::new(*a, a.to_uppercase(), 18)).collect(),
            protocol_system: "uniswap_v3".to_string(),
            static_attributes: BTreeMap::new(),
            created_at: None,
            spot_price: 0.0,
            updated_at: Utc::now(),
            last_updated_at_block: block,
        })
    }

    #[test]
    fn test_two_token_pool_uses_pool_id() {
        let graph = transform(&[pool("p1", &["eth", "usdc"], 100)], 100);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].id, "p1");
        assert_eq!(graph.edges[0].from, "eth");
        assert_eq!(graph.edges[0].to, "usdc");
        assert!(graph.edges[0].is_current_block);
    }

    #[test]
    fn test_multi_token_pool_uses_pair_ids() {
        let graph = transform(&[pool("p3", &["a", "b", "c"], 0)], 0);
        let ids: Vec<_> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["p3-0-1", "p3-0-2", "p3-1-2"]);
        assert!(graph.edges.iter().all(|e| e.pool_id == "p3"));
    }

    #[test]
    fn test_single_token_pool_contributes_node_only() {
        let graph = transform(&[pool("p1", &["a"], 0)], 0);
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_pool_count_accumulates_without_duplicates() {
        let graph = transform(
            &[
                pool("p1", &["eth", "usdc"], 0),
                pool("p2", &["eth", "dai"], 0),
                pool("p3", &["eth", "eth"], 0),
            ],
            0,
        );
        assert_eq!(graph.nodes.len(), 3);
        let eth = graph.nodes.iter().find(|n| n.id == "eth").unwrap();
        assert_eq!(eth.pool_count, 3);
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn test_colliding_edge_ids_keep_first() {
        let graph = transform(
            &[pool("p3", &["a", "b", "c"], 0), pool("p3-0-1", &["x", "y"], 0)],
            0,
        );
        let ids: HashSet<_> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), graph.edges.len());
        assert_eq!(graph.edges.len(), 3);
        let taken = graph.edges.iter().find(|e| e.id == "p3-0-1").unwrap();
        assert_eq!(taken.pool_id, "p3");
        assert_eq!(taken.to, "b");
        // Nodes of the dropped pool are still present.
        assert_eq!(graph.nodes.len(), 5);
    }

    #[test]
    fn test_block_zero_never_flags() {
        assert!(!is_current_block(0, 0));
        assert!(is_current_block(5, 5));
        assert!(!is_current_block(4, 5));
        let graph = transform(&[pool("p1", &["a", "b"], 0)], 0);
        assert!(!graph.edges[0].is_current_block);
    }
}
