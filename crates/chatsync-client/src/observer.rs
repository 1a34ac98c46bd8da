//! Presentation listener registry.
//!
//! Listeners are registered explicitly and removed with their subscription id.
//! Notification snapshots the registry first, so a listener may unsubscribe
//! (itself or others) from inside a callback.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use chatsync_core::canvas::DrawingBoard;
use chatsync_core::session::ConnectionState;
use chatsync_core::store::{MessageLog, Roster};

/// Render callbacks. Every method has an empty default.
pub trait Listener: Send + Sync {
    /// Session state changed; `Open` means connected.
    fn connection_changed(&self, _state: ConnectionState) {}
    /// A chat or system entry was appended; scroll to latest.
    fn chat_appended(&self, _log: &MessageLog) {}
    /// Roster snapshot replaced (or reset on open/close).
    fn roster_changed(&self, _roster: &Roster) {}
    /// Canvas re-rendered from the draw log.
    fn canvas_changed(&self, _board: &DrawingBoard) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub struct Observers {
    listeners: DashMap<SubscriptionId, Arc<dyn Listener>>,
    seq: AtomicU64,
}

impl Default for Observers {
    fn default() -> Self {
        Self::new()
    }
}

impl Observers {
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
            seq: AtomicU64::new(1),
        }
    }

    pub fn subscribe(&self, listener: Arc<dyn Listener>) -> SubscriptionId {
        let id = SubscriptionId(self.seq.fetch_add(1, Ordering::Relaxed));
        self.listeners.insert(id, listener);
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Call `f` on every listener in subscription order.
    pub fn notify<F>(&self, f: F)
    where
        F: Fn(&dyn Listener),
    {
        let mut snapshot: Vec<(SubscriptionId, Arc<dyn Listener>)> = self
            .listeners
            .iter()
            .map(|e| (*e.key(), Arc::clone(e.value())))
            .collect();
        snapshot.sort_by_key(|(id, _)| *id);
        for (_, l) in snapshot {
            f(l.as_ref());
        }
    }
}
