//! Transport layer (WebSocket client).
//!
//! Implements the core `Connector`/`TransportHandle` seam on top of
//! tokio-tungstenite, plus the codec that turns socket messages into text
//! frames for the core.

pub mod codec;
pub mod ws;

pub use ws::{WsConnector, WsHandle};
