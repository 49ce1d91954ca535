//! Physics, layout and interaction options handed to the engine.
//!
//! Serializes to the option object a vis-network style engine expects.

use serde::Serialize;

/// Barnes-Hut solver parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarnesHut {
    pub gravitational_constant: f64,
    pub central_gravity: f64,
    pub spring_length: f64,
    pub spring_constant: f64,
    pub damping: f64,
    pub avoid_overlap: f64,
}

impl Default for BarnesHut {
    fn default() -> Self {
        Self {
            gravitational_constant: -25_000.0,
            central_gravity: 0.15,
            spring_length: 250.0,
            spring_constant: 0.04,
            damping: 0.09,
            avoid_overlap: 0.7,
        }
    }
}

/// Stabilization run performed before the first paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stabilization {
    pub enabled: bool,
    pub iterations: u32,
    pub update_interval: u32,
    /// Refit the camera once stable. Off so that refits never override the
    /// user's viewport.
    pub fit: bool,
}

impl Default for Stabilization {
    fn default() -> Self {
        Self {
            enabled: true,
            iterations: 2000,
            update_interval: 25,
            fit: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsOptions {
    pub enabled: bool,
    pub solver: String,
    pub barnes_hut: BarnesHut,
    pub stabilization: Stabilization,
    pub timestep: f64,
}

impl Default for PhysicsOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            solver: "barnesHut".to_string(),
            barnes_hut: BarnesHut::default(),
            stabilization: Stabilization::default(),
            timestep: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Fixed seed so the same graph settles into the same layout.
    pub random_seed: u64,
    pub improved_layout: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            random_seed: 42,
            improved_layout: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionOptions {
    pub hover: bool,
    pub tooltip_delay: u32,
    pub drag_nodes: bool,
    pub drag_view: bool,
    pub zoom_view: bool,
    pub select_connected_edges: bool,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            hover: true,
            tooltip_delay: 0,
            drag_nodes: true,
            drag_view: true,
            zoom_view: true,
            select_connected_edges: false,
        }
    }
}

/// Node border colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeColorOptions {
    pub border: String,
    pub highlight: NodeHighlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeHighlight {
    pub border: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOptions {
    pub border_width: u32,
    pub border_width_selected: u32,
    pub color: NodeColorOptions,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            border_width: 2,
            border_width_selected: 4,
            color: NodeColorOptions {
                border: "#232323".to_string(),
                highlight: NodeHighlight {
                    border: "#FF3366".to_string(),
                },
            },
        }
    }
}

/// Full option set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineOptions {
    pub physics: PhysicsOptions,
    pub layout: LayoutOptions,
    pub interaction: InteractionOptions,
    pub nodes: NodeOptions,
}

impl EngineOptions {
    /// Sets the Barnes-Hut solver parameters.
    #[must_use]
    pub fn with_barnes_hut(mut self, barnes_hut: BarnesHut) -> Self {
        self.physics.barnes_hut = barnes_hut;
        self
    }

    /// Sets the layout seed.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.layout.random_seed = seed;
        self
    }

    /// Enables or disables physics.
    #[must_use]
    pub fn with_physics(mut self, enabled: bool) -> Self {
        self.physics.enabled = enabled;
        self
    }

    /// Serializes to the engine's option object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
