//! Event router: decoded envelope -> state store.
//!
//! - `users`          => roster replaced wholesale (not logged)
//! - `chat` / `system`=> appended to the message log
//! - `draw`           => appended to the log's draw subsequence
//!
//! Arrival order is logical order; nothing is reordered.

use crate::error::Result;
use crate::protocol::{decode_frame, Channel, Content, Envelope};
use crate::store::{MessageLog, Roster};

/// Which store an envelope landed in, so the caller can fire the matching
/// presentation side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    Roster,
    Chat,
    Draw,
}

#[derive(Debug, Default)]
pub struct EventRouter {
    log: MessageLog,
    roster: Roster,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Drop the roster (connection opened or closed).
    pub fn reset_roster(&mut self) {
        self.roster.clear();
    }

    pub fn route(&mut self, env: Envelope) -> Routed {
        match env.channel() {
            Channel::Users => {
                if let Content::Users(users) = env.content {
                    self.roster.replace(users);
                }
                Routed::Roster
            }
            Channel::Chat | Channel::System => {
                self.log.push(env);
                Routed::Chat
            }
            Channel::Draw => {
                self.log.push(env);
                Routed::Draw
            }
        }
    }

    /// Decode then route. On error nothing is stored.
    pub fn route_frame(&mut self, frame: &str) -> Result<Routed> {
        let env = decode_frame(frame)?;
        Ok(self.route(env))
    }
}
