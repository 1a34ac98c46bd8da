//! chatsync client library entry.
//!
//! This crate wires the WebSocket transport, the YAML config, and the listener
//! registry around the `chatsync-core` engine. It is consumed by the terminal
//! binary (`main.rs`) and by integration tests.

pub mod client;
pub mod config;
pub mod observer;
pub mod terminal;
pub mod transport;

pub use client::ChatClient;
pub use observer::{Listener, Observers, SubscriptionId};
