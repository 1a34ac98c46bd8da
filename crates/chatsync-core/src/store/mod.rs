//! Client-side state stores fed by the router.

mod log;
mod roster;

pub use log::MessageLog;
pub use roster::Roster;
