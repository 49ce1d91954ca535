//! Normalizes mouse, touch and engine pointer payloads to one screen point.

use serde::{Deserialize, Serialize};

/// A point in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    /// Point in container-relative pixels.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub client_x: f64,
    pub client_y: f64,
}

/// Raw pointer payload as delivered by the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerPayload {
    /// Engine-provided DOM coordinates.
    Dom(ScreenPoint),
    /// Desktop mouse event.
    Mouse { client_x: f64, client_y: f64 },
    /// Touch event. `touches` is empty on touchend, where only
    /// `changed_touches` carries the lifted contact.
    Touch {
        touches: Vec<TouchPoint>,
        changed_touches: Vec<TouchPoint>,
    },
}

/// Extracts a single screen point, or `None` if the payload has none.
pub fn normalize_pointer(payload: &PointerPayload) -> Option<ScreenPoint> {
    match payload {
        PointerPayload::Dom(point) => Some(*point),
        PointerPayload::Mouse { client_x, client_y } => Some(ScreenPoint::new(*client_x, *client_y)),
        PointerPayload::Touch {
            touches,
            changed_touches,
        } => touches
            .first()
            .or_else(|| changed_touches.first())
            .map(|t| ScreenPoint::new(t.client_x, t.client_y)),
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ClickPointer {
    #[serde(rename = "DOM")]
    dom: ScreenPoint,
}

/// Click payload emitted by the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ClickPayload {
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<String>,
    pointer: ClickPointer,
}

impl ClickPayload {
    /// Parses a click event as emitted by the engine.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn pointer(&self) -> PointerPayload {
        PointerPayload::Dom(self.pointer.dom)
    }
}
