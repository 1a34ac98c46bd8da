//! Draw channel payload.

use serde::{Deserialize, Serialize};

/// Canvas coordinate in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One committed freehand stroke, or a clear marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawEvent {
    /// Polyline vertices in drawing order. Missing on the wire means empty.
    #[serde(default)]
    pub points: Vec<Point>,
    /// Hex color (`#rgb` or `#rrggbb`).
    pub color: String,
    /// When set, every earlier draw event is discarded by replay.
    #[serde(default, skip_serializing_if = "is_false")]
    pub clear: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl DrawEvent {
    /// A stroke through `points`.
    pub fn stroke(points: Vec<Point>, color: impl Into<String>) -> Self {
        Self {
            points,
            color: color.into(),
            clear: false,
        }
    }

    /// A clear marker (no points).
    pub fn clear(color: impl Into<String>) -> Self {
        Self {
            points: Vec::new(),
            color: color.into(),
            clear: true,
        }
    }

    /// Strokes with fewer than two points cannot be drawn as a path.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }
}
