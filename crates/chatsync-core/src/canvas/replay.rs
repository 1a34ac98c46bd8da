use std::borrow::Borrow;

use crate::protocol::{DrawEvent, Point};

/// Drawing target for replay output.
pub trait Surface {
    /// Blank the whole surface.
    fn reset(&mut self);
    /// Draw one independent polyline. Never joined with the previous path.
    fn stroke_path(&mut self, color: &str, points: &[Point]);
}

/// One rendered path.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub points: Vec<Point>,
}

/// Ordered rendered paths, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasState {
    strokes: Vec<Stroke>,
}

impl CanvasState {
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_blank(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Reset `surface` and draw every stroke in order.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.reset();
        for s in &self.strokes {
            surface.stroke_path(&s.color, &s.points);
        }
    }
}

/// Index of the log-order-last clear marker.
pub fn last_clear_index<E: Borrow<DrawEvent>>(events: &[E]) -> Option<usize> {
    events.iter().rposition(|e| e.borrow().clear)
}

/// Reduce the ordered draw log to canvas state.
///
/// Only events strictly after the last clear count; events with fewer than two
/// points are skipped.
pub fn replay<E: Borrow<DrawEvent>>(events: &[E]) -> CanvasState {
    let start = last_clear_index(events).map_or(0, |k| k + 1);
    let relevant = events.get(start..).unwrap_or(&[]);

    let strokes = relevant
        .iter()
        .map(Borrow::borrow)
        .filter(|e| e.is_renderable())
        .map(|e| Stroke {
            color: e.color.clone(),
            points: e.points.clone(),
        })
        .collect();

    CanvasState { strokes }
}
