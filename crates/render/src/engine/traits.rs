//! Engine traits.

use crate::engine::{ContainerHandle, EngineNode, EngineOptions, NodeUpdate, Viewport};
use crate::error::EngineError;
use crate::interaction::SelectionKind;
use dexscan_graph::model::EnrichedEdge;

/// Live dataset and camera of a layout engine.
pub trait GraphEngine {
    /// Adds nodes. Fails if an id already exists.
    fn add_nodes(&mut self, nodes: Vec<EngineNode>) -> Result<(), EngineError>;

    /// Updates existing nodes without touching their positions.
    fn update_nodes(&mut self, nodes: Vec<NodeUpdate>) -> Result<(), EngineError>;

    /// Removes nodes by id. Unknown ids are ignored.
    fn remove_nodes(&mut self, ids: &[String]) -> Result<(), EngineError>;

    fn add_edges(&mut self, edges: Vec<EnrichedEdge>) -> Result<(), EngineError>;

    fn update_edges(&mut self, edges: Vec<EnrichedEdge>) -> Result<(), EngineError>;

    fn remove_edges(&mut self, ids: &[String]) -> Result<(), EngineError>;

    /// Current camera.
    fn viewport(&self) -> Viewport;

    /// Moves the camera without animation.
    fn set_viewport(&mut self, viewport: Viewport);

    /// Highlights one node or edge.
    fn select(&mut self, kind: SelectionKind, id: &str);

    fn unselect_all(&mut self);

    /// Releases the engine and its datasets.
    fn destroy(&mut self);
}

/// Builds engines bound to a container.
pub trait EngineFactory {
    type Engine: GraphEngine;

    fn create(
        &mut self,
        container: &ContainerHandle,
        nodes: Vec<EngineNode>,
        edges: Vec<EnrichedEdge>,
        options: &EngineOptions,
    ) -> Result<Self::Engine, EngineError>;
}
