//! Top-level facade crate for chatsync.
//!
//! Re-exports the protocol core and the client runtime so users can depend on a single crate.

pub mod core {
    pub use chatsync_core::*;
}

pub mod client {
    pub use chatsync_client::*;
}
