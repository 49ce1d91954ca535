//! In-memory engine without a renderer.
//!
//! Keeps the dataset and camera the way a real engine would, rejects
//! duplicate adds and unknown updates, and records every call. Used for
//! server-side previews and tests.

use crate::engine::{
    ContainerHandle, EngineFactory, EngineNode, EngineOptions, GraphEngine, NodeUpdate, Viewport,
};
use crate::error::EngineError;
use crate::interaction::SelectionKind;
use dexscan_graph::model::EnrichedEdge;
use std::collections::BTreeMap;

/// One recorded engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    AddNodes(Vec<String>),
    UpdateNodes(Vec<String>),
    RemoveNodes(Vec<String>),
    AddEdges(Vec<String>),
    UpdateEdges(Vec<String>),
    RemoveEdges(Vec<String>),
    SetViewport(Viewport),
    Select(SelectionKind, String),
    UnselectAll,
    Destroy,
}

/// Headless engine state.
#[derive(Debug, Clone, Default)]
pub struct HeadlessEngine {
    container: String,
    nodes: BTreeMap<String, EngineNode>,
    edges: BTreeMap<String, EnrichedEdge>,
    viewport: Viewport,
    selected: Option<(SelectionKind, String)>,
    calls: Vec<EngineCall>,
    destroyed: bool,
    /// Simulates engines that refit the camera after dataset changes.
    refit_on_change: bool,
}

impl HeadlessEngine {
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn node(&self, id: &str) -> Option<&EngineNode> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&EnrichedEdge> {
        self.edges.get(id)
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    pub fn edge_ids(&self) -> Vec<String> {
        self.edges.keys().cloned().collect()
    }

    pub fn selected(&self) -> Option<&(SelectionKind, String)> {
        self.selected.as_ref()
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Moves a node as if physics had settled it elsewhere.
    pub fn move_node(&mut self, id: &str, x: f64, y: f64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.x = Some(x);
            node.y = Some(y);
        }
    }

    fn ensure_live(&self) -> Result<(), EngineError> {
        if self.destroyed {
            return Err(EngineError::Destroyed);
        }
        Ok(())
    }

    fn dataset_changed(&mut self) {
        if self.refit_on_change {
            self.viewport = Viewport::default();
        }
    }
}

impl GraphEngine for HeadlessEngine {
    fn add_nodes(&mut self, nodes: Vec<EngineNode>) -> Result<(), EngineError> {
        self.ensure_live()?;
        if let Some(dup) = nodes.iter().find(|n| self.nodes.contains_key(n.id())) {
            return Err(EngineError::DuplicateId(dup.id().to_string()));
        }
        self.calls.push(EngineCall::AddNodes(
            nodes.iter().map(|n| n.id().to_string()).collect(),
        ));
        for node in nodes {
            self.nodes.insert(node.id().to_string(), node);
        }
        self.dataset_changed();
        Ok(())
    }

    fn update_nodes(&mut self, nodes: Vec<NodeUpdate>) -> Result<(), EngineError> {
        self.ensure_live()?;
        if let Some(missing) = nodes.iter().find(|n| !self.nodes.contains_key(n.id())) {
            return Err(EngineError::UnknownId(missing.id().to_string()));
        }
        self.calls.push(EngineCall::UpdateNodes(
            nodes.iter().map(|n| n.id().to_string()).collect(),
        ));
        for NodeUpdate(update) in nodes {
            if let Some(existing) = self.nodes.get_mut(&update.id) {
                existing.node = update;
            }
        }
        self.dataset_changed();
        Ok(())
    }

    fn remove_nodes(&mut self, ids: &[String]) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.calls.push(EngineCall::RemoveNodes(ids.to_vec()));
        for id in ids {
            self.nodes.remove(id);
        }
        self.dataset_changed();
        Ok(())
    }

    fn add_edges(&mut self, edges: Vec<EnrichedEdge>) -> Result<(), EngineError> {
        self.ensure_live()?;
        if let Some(dup) = edges.iter().find(|e| self.edges.contains_key(&e.id)) {
            return Err(EngineError::DuplicateId(dup.id.clone()));
        }
        self.calls.push(EngineCall::AddEdges(
            edges.iter().map(|e| e.id.clone()).collect(),
        ));
        for edge in edges {
            self.edges.insert(edge.id.clone(), edge);
        }
        self.dataset_changed();
        Ok(())
    }

    fn update_edges(&mut self, edges: Vec<EnrichedEdge>) -> Result<(), EngineError> {
        self.ensure_live()?;
        if let Some(missing) = edges.iter().find(|e| !self.edges.contains_key(&e.id)) {
            return Err(EngineError::UnknownId(missing.id.clone()));
        }
        self.calls.push(EngineCall::UpdateEdges(
            edges.iter().map(|e| e.id.clone()).collect(),
        ));
        for edge in edges {
            self.edges.insert(edge.id.clone(), edge);
        }
        self.dataset_changed();
        Ok(())
    }

    fn remove_edges(&mut self, ids: &[String]) -> Result<(), EngineError> {
        self.ensure_live()?;
        self.calls.push(EngineCall::RemoveEdges(ids.to_vec()));
        for id in ids {
            self.edges.remove(id);
        }
        self.dataset_changed();
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.calls.push(EngineCall::SetViewport(viewport));
        self.viewport = viewport;
    }

    fn select(&mut self, kind: SelectionKind, id: &str) {
        self.calls.push(EngineCall::Select(kind, id.to_string()));
        self.selected = Some((kind, id.to_string()));
    }

    fn unselect_all(&mut self) {
        self.calls.push(EngineCall::UnselectAll);
        self.selected = None;
    }

    fn destroy(&mut self) {
        self.calls.push(EngineCall::Destroy);
        self.nodes.clear();
        self.edges.clear();
        self.selected = None;
        self.destroyed = true;
    }
}

/// Factory for [`HeadlessEngine`]s.
#[derive(Debug, Clone, Default)]
pub struct HeadlessFactory {
    created: usize,
    fail_next: Option<String>,
    refit_on_change: bool,
}

impl HeadlessFactory {
    /// Factory whose engines keep the camera on change.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engines built by this factory reset their camera on every change.
    #[must_use]
    pub fn with_refit_on_change(mut self, refit: bool) -> Self {
        self.refit_on_change = refit;
        self
    }

    /// Makes the next `create` fail with the given reason.
    pub fn fail_next(&mut self, reason: impl Into<String>) {
        self.fail_next = Some(reason.into());
    }

    /// Number of engines built so far.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl EngineFactory for HeadlessFactory {
    type Engine = HeadlessEngine;

    fn create(
        &mut self,
        container: &ContainerHandle,
        nodes: Vec<EngineNode>,
        edges: Vec<EnrichedEdge>,
        _options: &EngineOptions,
    ) -> Result<HeadlessEngine, EngineError> {
        if let Some(reason) = self.fail_next.take() {
            return Err(EngineError::Construction(reason));
        }
        if container.width <= 0.0 || container.height <= 0.0 {
            return Err(EngineError::ContainerUnavailable(container.id.clone()));
        }
        let mut engine = HeadlessEngine {
            container: container.id.clone(),
            refit_on_change: self.refit_on_change,
            ..HeadlessEngine::default()
        };
        for node in nodes {
            engine.nodes.insert(node.id().to_string(), node);
        }
        for edge in edges {
            engine.edges.insert(edge.id.clone(), edge);
        }
        self.created += 1;
        Ok(engine)
    }
}
