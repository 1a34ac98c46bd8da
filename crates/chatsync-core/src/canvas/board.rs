use std::borrow::Borrow;

use crate::protocol::{DrawEvent, Point};

use super::raster::{Raster, Rgba};
use super::replay::{replay, CanvasState, Surface};

/// Local drawing surface: replayed strokes, the selected color, and the
/// pointer stroke in progress.
///
/// The raster always shows `replay(log)` with the in-progress stroke on top.
/// A released stroke leaves the raster until it comes back through the log.
#[derive(Debug, Clone)]
pub struct DrawingBoard {
    color: String,
    pending: Vec<Point>,
    drawing: bool,
    canvas: CanvasState,
    raster: Raster,
}

impl DrawingBoard {
    pub fn new(raster: Raster, color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            pending: Vec::new(),
            drawing: false,
            canvas: CanvasState::default(),
            raster,
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Select the brush color. Anything but `#rgb`/`#rrggbb` is refused and
    /// the current color kept.
    pub fn set_color(&mut self, color: &str) -> bool {
        let color = color.trim();
        if Rgba::parse_hex(color).is_none() {
            tracing::debug!(color, "brush color refused");
            return false;
        }
        self.color = color.to_string();
        true
    }

    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Points of the stroke being dragged, if any.
    pub fn pending(&self) -> &[Point] {
        &self.pending
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Full replay of the draw log, then the local stroke on top.
    pub fn refresh<E: Borrow<DrawEvent>>(&mut self, events: &[E]) {
        self.canvas = replay(events);
        self.redraw();
    }

    /// Pointer down.
    pub fn begin_stroke(&mut self, at: Point) {
        self.drawing = true;
        self.pending.clear();
        self.pending.push(at);
    }

    /// Pointer move. Only the new segment is painted.
    pub fn extend_stroke(&mut self, to: Point) {
        if !self.drawing {
            return;
        }
        if let Some(prev) = self.pending.last().copied() {
            self.raster.stroke_path(&self.color, &[prev, to]);
        }
        self.pending.push(to);
    }

    /// Pointer up or out. Yields the stroke to commit when it has any points.
    pub fn finish_stroke(&mut self) -> Option<DrawEvent> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        let points = std::mem::take(&mut self.pending);
        self.redraw();
        if points.is_empty() {
            return None;
        }
        Some(DrawEvent::stroke(points, self.color.clone()))
    }

    /// Clear marker in the current color.
    pub fn clear_event(&self) -> DrawEvent {
        DrawEvent::clear(self.color.clone())
    }

    fn redraw(&mut self) {
        self.canvas.render(&mut self.raster);
        if self.pending.len() >= 2 {
            self.raster.stroke_path(&self.color, &self.pending);
        }
    }
}
