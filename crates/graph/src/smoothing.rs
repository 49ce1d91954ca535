//! Curvature for edges sharing the same pair of nodes.
//!
//! Parallel edges alternate clockwise and counter-clockwise and bend further
//! every two members, so a fan of pools between two tokens stays readable.

use crate::model::{GraphEdge, Smooth, SmoothType};
use std::collections::BTreeMap;

/// Roundness of a lone edge and of the innermost parallel pair.
pub const BASE_ROUNDNESS: f64 = 0.05;
/// Upper bound approached by outer parallel pairs.
pub const MAX_ROUNDNESS: f64 = 0.8;
/// Level at which roundness is halfway between base and max.
pub const ROUNDNESS_HALF_LEVEL: f64 = 4.0;

/// Unordered node-pair key.
pub fn pair_key(from: &str, to: &str) -> String {
    if from <= to {
        format!("{from}-{to}")
    } else {
        format!("{to}-{from}")
    }
}

/// Roundness of the `level`-th pair in a group.
///
/// Follows `BASE + (MAX - BASE) * level / (level + ROUNDNESS_HALF_LEVEL)`:
/// strictly increasing and strictly below [`MAX_ROUNDNESS`]. Consecutive
/// levels stay distinct in `f64` up to about 10^8 pairs per node pair.
pub fn roundness_for_level(level: usize) -> f64 {
    let level = level as f64;
    let spread = level / (level + ROUNDNESS_HALF_LEVEL);
    BASE_ROUNDNESS + (MAX_ROUNDNESS - BASE_ROUNDNESS) * spread
}

/// Assigns curvature to every edge.
///
/// Output is grouped by pair key and sorted by id within each group, so the
/// result depends only on the edge contents.
pub fn smooth_parallel_edges(edges: Vec<GraphEdge>) -> Vec<GraphEdge> {
    let mut groups: BTreeMap<String, Vec<GraphEdge>> = BTreeMap::new();
    for edge in edges {
        groups
            .entry(pair_key(&edge.from, &edge.to))
            .or_default()
            .push(edge);
    }

    let mut out = Vec::new();
    for (_, mut group) in groups {
        if group.len() == 1 {
            group[0].smooth = Smooth::new(SmoothType::Continuous, BASE_ROUNDNESS);
            out.append(&mut group);
            continue;
        }
        group.sort_by(|a, b| a.id.cmp(&b.id));
        for (i, edge) in group.iter_mut().enumerate() {
            let kind = if i % 2 == 0 {
                SmoothType::CurvedCw
            } else {
                SmoothType::CurvedCcw
            };
            edge.smooth = Smooth::new(kind, roundness_for_level(i / 2));
        }
        out.append(&mut group);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(id: &str, from: &str, to: &str) -> GraphEdge {
        GraphEdge {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            protocol: "uniswap_v3".to_string(),
            pool_id: id.to_string(),
            last_updated_at_block: 0,
            is_current_block: false,
            smooth: Smooth::default(),
        }
    }

    #[test]
    fn test_single_edge_is_continuous() {
        let out = smooth_parallel_edges(vec![edge("p1", "a", "b")]);
        assert_eq!(out[0].smooth.kind, SmoothType::Continuous);
        assert_eq!(out[0].smooth.roundness, BASE_ROUNDNESS);
    }

    #[test]
    fn test_pair_gets_opposite_directions() {
        let out = smooth_parallel_edges(vec![edge("p2", "b", "a"), edge("p1", "a", "b")]);
        assert_eq!(out[0].id, "p1");
        assert_eq!(out[0].smooth.kind, SmoothType::CurvedCw);
        assert_eq!(out[1].smooth.kind, SmoothType::CurvedCcw);
    }

    #[test]
    fn test_roundness_grows_every_two_members() {
        let edges = (0..6).map(|i| edge(&format!("p{i}"), "a", "b")).collect();
        let out = smooth_parallel_edges(edges);
        assert_eq!(out[0].smooth.roundness, out[1].smooth.roundness);
        assert!(out[2].smooth.roundness > out[1].smooth.roundness);
        assert!(out[4].smooth.roundness > out[3].smooth.roundness);
        assert!(out.iter().all(|e| e.smooth.roundness < MAX_ROUNDNESS));
    }

    #[test]
    fn test_pair_key_is_unordered() {
        assert_eq!(pair_key("a", "b"), pair_key("b", "a"));
    }

    #[test]
    fn test_roundness_is_bounded() {
        assert_eq!(roundness_for_level(0), BASE_ROUNDNESS);
        assert!(roundness_for_level(1_000_000) < MAX_ROUNDNESS);
    }

    #[test]
    fn test_large_groups_keep_distinct_roundness() {
        let mut previous = roundness_for_level(0);
        for level in 1..5_000 {
            let current = roundness_for_level(level);
            assert!(current > previous, "level {level} repeats roundness");
            previous = current;
        }

        let edges = (0..400).map(|i| edge(&format!("p{i:03}"), "a", "b")).collect();
        let out = smooth_parallel_edges(edges);
        let signatures: std::collections::HashSet<_> = out
            .iter()
            .map(|e| (e.smooth.kind, e.smooth.roundness.to_bits()))
            .collect();
        assert_eq!(signatures.len(), 400);
    }
}
