//! Engine lifecycle and dataset reconciliation.

use crate::engine::{
    ContainerHandle, EngineFactory, EngineNode, EngineOptions, GraphEngine, NodeUpdate,
};
use crate::error::EngineError;
use crate::interaction::SelectionEffect;
use crate::sync::{diff_edges, diff_nodes, retain_changed};
use dexscan_graph::model::{EnrichedEdge, EnrichedGraph, EnrichedNode};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Lifecycle state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No engine exists.
    Uninitialized,
    /// An engine is mounted and holds the last synced dataset.
    Initialized,
}

/// Why a sync did not mount an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferReason {
    /// The graph has no nodes.
    EmptyGraph,
    /// No container is attached yet.
    NoContainer,
}

/// Mutation counts of one incremental patch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchStats {
    pub nodes_added: usize,
    pub nodes_updated: usize,
    pub nodes_removed: usize,
    pub edges_added: usize,
    pub edges_updated: usize,
    pub edges_removed: usize,
}

impl PatchStats {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of one [`DatasetSynchronizer::sync`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Nothing was mounted.
    Deferred(DeferReason),
    /// A new engine was constructed.
    Mounted { nodes: usize, edges: usize },
    /// The live dataset was patched in place.
    Patched(PatchStats),
    /// The engine was destroyed because the graph became empty.
    Unmounted,
    /// The engine failed; the synchronizer is back to uninitialized.
    Failed(EngineError),
}

/// Owns the engine and the dataset it was last synced to.
///
/// The only component allowed to mutate the engine. Upstream stages hand it
/// desired-state graphs; it applies keyed diffs and restores the camera
/// afterwards.
pub struct DatasetSynchronizer<F: EngineFactory> {
    session_id: Uuid,
    factory: F,
    options: EngineOptions,
    engine: Option<F::Engine>,
    nodes: Vec<EnrichedNode>,
    edges: Vec<EnrichedEdge>,
}

impl<F: EngineFactory> DatasetSynchronizer<F> {
    /// Idle synchronizer with a fresh session id.
    pub fn new(factory: F, options: EngineOptions) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            factory,
            options,
            engine: None,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> SyncState {
        if self.engine.is_some() {
            SyncState::Initialized
        } else {
            SyncState::Uninitialized
        }
    }

    pub fn engine(&self) -> Option<&F::Engine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut F::Engine> {
        self.engine.as_mut()
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Node ids of the live dataset.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.iter().any(|e| e.id == id)
    }

    /// Reconciles the engine with `graph`.
    pub fn sync(
        &mut self,
        graph: &EnrichedGraph,
        container: Option<&ContainerHandle>,
    ) -> SyncOutcome {
        if graph.nodes.is_empty() {
            return match self.state() {
                SyncState::Initialized => {
                    self.teardown();
                    SyncOutcome::Unmounted
                }
                SyncState::Uninitialized => SyncOutcome::Deferred(DeferReason::EmptyGraph),
            };
        }

        if self.engine.is_none() {
            let Some(container) = container else {
                debug!(session = %self.session_id, "No container attached; deferring mount");
                return SyncOutcome::Deferred(DeferReason::NoContainer);
            };
            return self.mount(graph, container);
        }

        match self.patch(graph) {
            Ok(stats) => SyncOutcome::Patched(stats),
            Err(e) => {
                error!(session = %self.session_id, error = %e, "Dataset patch failed");
                self.teardown();
                SyncOutcome::Failed(e)
            }
        }
    }

    fn mount(&mut self, graph: &EnrichedGraph, container: &ContainerHandle) -> SyncOutcome {
        let nodes: Vec<EngineNode> = graph.nodes.iter().cloned().map(EngineNode::seeded).collect();
        match self
            .factory
            .create(container, nodes, graph.edges.clone(), &self.options)
        {
            Ok(engine) => {
                self.engine = Some(engine);
                self.nodes = graph.nodes.clone();
                self.edges = graph.edges.clone();
                info!(
                    session = %self.session_id,
                    container = %container.id,
                    nodes = graph.nodes.len(),
                    edges = graph.edges.len(),
                    "Engine mounted"
                );
                SyncOutcome::Mounted {
                    nodes: graph.nodes.len(),
                    edges: graph.edges.len(),
                }
            }
            Err(e) => {
                error!(
                    session = %self.session_id,
                    container = %container.id,
                    error = %e,
                    "Engine construction failed"
                );
                SyncOutcome::Failed(e)
            }
        }
    }

    fn patch(&mut self, graph: &EnrichedGraph) -> Result<PatchStats, EngineError> {
        let Some(engine) = self.engine.as_mut() else {
            return Err(EngineError::Destroyed);
        };

        let mut node_diff = diff_nodes(&self.nodes, &graph.nodes);
        let mut edge_diff = diff_edges(&self.edges, &graph.edges);
        node_diff.to_update = retain_changed(&self.nodes, node_diff.to_update);
        edge_diff.to_update = retain_changed(&self.edges, edge_diff.to_update);
        let stats = PatchStats {
            nodes_added: node_diff.to_add.len(),
            nodes_updated: node_diff.to_update.len(),
            nodes_removed: node_diff.to_remove.len(),
            edges_added: edge_diff.to_add.len(),
            edges_updated: edge_diff.to_update.len(),
            edges_removed: edge_diff.to_remove.len(),
        };
        if stats.is_empty() {
            self.nodes = graph.nodes.clone();
            self.edges = graph.edges.clone();
            return Ok(stats);
        }

        let viewport = engine.viewport();

        // Edges go before their endpoints on removal and after them on add.
        if !edge_diff.to_remove.is_empty() {
            engine.remove_edges(&edge_diff.to_remove)?;
        }
        if !node_diff.to_remove.is_empty() {
            engine.remove_nodes(&node_diff.to_remove)?;
        }
        if !node_diff.to_add.is_empty() {
            engine.add_nodes(node_diff.to_add.into_iter().map(EngineNode::seeded).collect())?;
        }
        if !node_diff.to_update.is_empty() {
            engine.update_nodes(node_diff.to_update.into_iter().map(NodeUpdate).collect())?;
        }
        if !edge_diff.to_add.is_empty() {
            engine.add_edges(edge_diff.to_add)?;
        }
        if !edge_diff.to_update.is_empty() {
            engine.update_edges(edge_diff.to_update)?;
        }

        engine.set_viewport(viewport);

        self.nodes = graph.nodes.clone();
        self.edges = graph.edges.clone();
        debug!(session = %self.session_id, ?stats, "Dataset patched");
        Ok(stats)
    }

    /// Applies selection effects to the engine in order.
    pub fn apply_selection(&mut self, effects: &[SelectionEffect]) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        for effect in effects {
            match effect {
                SelectionEffect::Clear => engine.unselect_all(),
                SelectionEffect::Apply(selection) => engine.select(selection.kind, &selection.id),
            }
        }
    }

    /// Destroys the engine and drops the dataset. Safe in any state.
    pub fn teardown(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.destroy();
            info!(session = %self.session_id, "Engine destroyed");
        }
        self.nodes.clear();
        self.edges.clear();
    }
}

impl<F: EngineFactory> Drop for DatasetSynchronizer<F> {
    fn drop(&mut self) {
        if self.engine.is_some() {
            warn!(session = %self.session_id, "Synchronizer dropped with a live engine");
            self.teardown();
        }
    }
}
