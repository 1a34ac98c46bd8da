//! Drawing replay engine.
//!
//! The visible canvas is a pure function of the draw-event log:
//! `state = replay(log)`, recomputed on every append. Only the local
//! in-progress stroke lives outside the log, drawn on top until committed.

mod board;
mod raster;
mod replay;

pub use board::DrawingBoard;
pub use raster::{Raster, Rgba};
pub use replay::{last_clear_index, replay, CanvasState, Stroke, Surface};
