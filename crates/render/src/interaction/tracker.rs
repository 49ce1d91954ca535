//! Selection state machine.

use crate::interaction::{ClickPayload, PointerPayload, ScreenPoint, normalize_pointer};
use tracing::debug;

/// What a selection points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    Node,
    Edge,
}

/// The single selected graph element and where it was picked.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub kind: SelectionKind,
    pub id: String,
    pub position: ScreenPoint,
}

/// Where a document-level pointer-down landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Inside the graph container.
    GraphContainer,
    /// Inside the open tooltip.
    Tooltip,
    /// Anywhere else on the page.
    Outside,
}

/// Input events understood by the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// Click or tap on the canvas, with whatever it hit.
    Click {
        nodes: Vec<String>,
        edges: Vec<String>,
        pointer: PointerPayload,
    },
    ZoomStart,
    DragStart,
    DocumentPointerDown(PointerTarget),
}

impl From<ClickPayload> for InteractionEvent {
    fn from(click: ClickPayload) -> Self {
        let pointer = click.pointer();
        InteractionEvent::Click {
            nodes: click.nodes,
            edges: click.edges,
            pointer,
        }
    }
}

/// Engine-side effect of a transition, applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEffect {
    /// Unhighlight everything.
    Clear,
    /// Highlight the given element.
    Apply(Selection),
}

/// Holds at most one selection.
#[derive(Debug, Clone, Default)]
pub struct InteractionTracker {
    selection: Option<Selection>,
}

impl InteractionTracker {
    /// Tracker with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Applies one event and returns the engine effects.
    ///
    /// A click that hits a node selects the node even if edges were hit too.
    /// Any previous selection is cleared before a new one is applied.
    pub fn handle(&mut self, event: &InteractionEvent) -> Vec<SelectionEffect> {
        match event {
            InteractionEvent::Click {
                nodes,
                edges,
                pointer,
            } => {
                let position = normalize_pointer(pointer).unwrap_or_else(|| {
                    debug!("Click without pointer coordinates");
                    ScreenPoint::default()
                });
                if let Some(id) = nodes.first() {
                    let reclick = self
                        .selection
                        .as_ref()
                        .is_some_and(|s| s.kind == SelectionKind::Node && &s.id == id);
                    if reclick {
                        return self.clear();
                    }
                    self.select(SelectionKind::Node, id, position)
                } else if let Some(id) = edges.first() {
                    self.select(SelectionKind::Edge, id, position)
                } else {
                    self.clear()
                }
            }
            InteractionEvent::ZoomStart | InteractionEvent::DragStart => self.clear(),
            InteractionEvent::DocumentPointerDown(PointerTarget::Outside) => self.clear(),
            InteractionEvent::DocumentPointerDown(_) => Vec::new(),
        }
    }

    /// Drops the selection.
    pub fn clear(&mut self) -> Vec<SelectionEffect> {
        match self.selection.take() {
            Some(_) => vec![SelectionEffect::Clear],
            None => Vec::new(),
        }
    }

    /// Drops the selection if it no longer satisfies `exists`.
    pub fn retain(&mut self, exists: impl Fn(&Selection) -> bool) -> Vec<SelectionEffect> {
        match &self.selection {
            Some(selection) if !exists(selection) => {
                debug!(id = %selection.id, "Selected element left the graph");
                self.clear()
            }
            _ => Vec::new(),
        }
    }

    fn select(&mut self, kind: SelectionKind, id: &str, position: ScreenPoint) -> Vec<SelectionEffect> {
        let mut effects = self.clear();
        let selection = Selection {
            kind,
            id: id.to_string(),
            position,
        };
        self.selection = Some(selection.clone());
        effects.push(SelectionEffect::Apply(selection));
        effects
    }
}
