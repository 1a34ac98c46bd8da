//! chatsync core: client-side synchronization engine for a realtime chat with a
//! shared drawing canvas.
//!
//! This crate holds the wire protocol, the connection state machine, the
//! roster/message stores, the event router, and the drawing replay engine. It
//! carries no async runtime or socket dependency; transports plug in through
//! the `session::Connector` and `session::TransportHandle` traits.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed or unknown inbound frames surface as `ChatSyncError` and are
//! dropped by the caller without mutating state.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod canvas;
pub mod error;
pub mod identity;
pub mod protocol;
pub mod router;
pub mod session;
pub mod store;

/// Shared result type.
pub use error::{ChatSyncError, ErrorCode, Result};
pub use identity::Identity;
pub use router::{EventRouter, Routed};
pub use session::{AttemptId, ConnectionState, Connector, Session, TransportEvent, TransportEventKind, TransportHandle};
