//! Pool filtering by token and protocol selection.

use dexscan_domain::pool::Pool;
use dexscan_domain::snapshot::PoolSnapshot;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::trace;

/// Fewest selected tokens for which a graph is drawn.
pub const MIN_GRAPH_TOKENS: usize = 2;

/// Externally owned token and protocol selection.
///
/// An empty protocol set selects nothing. Protocol ids are compared without
/// regard to ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    tokens: BTreeSet<String>,
    protocols: BTreeSet<String>,
}

impl FilterSelection {
    /// Selection from token addresses and protocol systems.
    pub fn new<T, P>(tokens: T, protocols: P) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            protocols: protocols
                .into_iter()
                .map(|p| p.into().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn tokens(&self) -> &BTreeSet<String> {
        &self.tokens
    }

    pub fn protocols(&self) -> &BTreeSet<String> {
        &self.protocols
    }

    pub fn is_token_selected(&self, address: &str) -> bool {
        self.tokens.contains(address)
    }

    pub fn is_protocol_selected(&self, protocol: &str) -> bool {
        self.protocols.contains(&protocol.to_ascii_lowercase())
    }

    /// Whether enough tokens are selected to draw a graph.
    pub fn has_minimum_tokens(&self) -> bool {
        self.tokens.len() >= MIN_GRAPH_TOKENS
    }

    fn admits(&self, pool: &Pool) -> bool {
        !pool.tokens.is_empty()
            && pool.token_addresses().all(|a| self.is_token_selected(a))
            && self.is_protocol_selected(&pool.protocol_system)
    }
}

/// Returns the pools whose tokens all lie in the selection and whose
/// protocol is selected, ordered by pool id.
pub fn filter_pools(snapshot: &PoolSnapshot, selection: &FilterSelection) -> Vec<Arc<Pool>> {
    if selection.tokens.is_empty() {
        return Vec::new();
    }
    let kept: Vec<Arc<Pool>> = snapshot
        .iter()
        .filter(|pool| selection.admits(pool))
        .cloned()
        .collect();
    trace!(
        total = snapshot.len(),
        kept = kept.len(),
        "Filtered pools"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dexscan_domain::token::Token;
    use std::collections::BTreeMap;

    fn pool(id: &str, tokens: &[&str], protocol: &str) -> Arc<Pool> {
        Arc::new(Pool {
            id: id.to_string(),
            tokens: tokens.iter().map(|a| Token::new(*a, a.to_uppercase(), 18)).collect(),
            protocol_system: protocol.to_string(),
            static_attributes: BTreeMap::new(),
            created_at: None,
            spot_price: 0.0,
            updated_at: Utc::now(),
            last_updated_at_block: 0,
        })
    }

    fn snapshot(pools: Vec<Arc<Pool>>) -> PoolSnapshot {
        PoolSnapshot::new(
            1,
            0,
            pools.into_iter().map(|p| (p.id.clone(), p)).collect(),
        )
    }

    #[test]
    fn test_empty_token_selection_yields_nothing() {
        let snap = snapshot(vec![pool("p1", &["eth", "usdc"], "uniswap_v3")]);
        let selection = FilterSelection::new(Vec::<String>::new(), ["uniswap_v3"]);
        assert!(filter_pools(&snap, &selection).is_empty());
    }

    #[test]
    fn test_pools_with_unselected_tokens_are_excluded() {
        let snap = snapshot(vec![
            pool("p1", &["eth", "usdc"], "uniswap_v3"),
            pool("p2", &["eth", "dai"], "uniswap_v3"),
            pool("p3", &["eth", "usdc", "dai"], "vm:curve"),
        ]);
        let selection = FilterSelection::new(["eth", "usdc"], ["uniswap_v3", "vm:curve"]);
        let ids: Vec<_> = filter_pools(&snap, &selection)
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids, vec!["p1"]);
    }

    #[test]
    fn test_empty_protocol_selection_excludes_everything() {
        let snap = snapshot(vec![pool("p1", &["eth", "usdc"], "uniswap_v3")]);
        let selection = FilterSelection::new(["eth", "usdc"], Vec::<String>::new());
        assert!(filter_pools(&snap, &selection).is_empty());
    }

    #[test]
    fn test_protocol_match_ignores_case() {
        let snap = snapshot(vec![pool("p1", &["eth", "usdc"], "Uniswap_V3")]);
        let selection = FilterSelection::new(["eth", "usdc"], ["uniswap_v3"]);
        assert_eq!(filter_pools(&snap, &selection).len(), 1);
    }

    #[test]
    fn test_output_is_ordered_by_pool_id() {
        let snap = snapshot(vec![
            pool("p2", &["eth", "usdc"], "uniswap_v3"),
            pool("p1", &["eth", "usdc"], "uniswap_v3"),
        ]);
        let selection = FilterSelection::new(["eth", "usdc"], ["uniswap_v3"]);
        let ids: Vec<_> = filter_pools(&snap, &selection)
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_minimum_tokens() {
        assert!(!FilterSelection::new(["eth"], ["uniswap_v3"]).has_minimum_tokens());
        assert!(FilterSelection::new(["eth", "usdc"], ["uniswap_v3"]).has_minimum_tokens());
    }
}
