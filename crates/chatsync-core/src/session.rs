//! Transport session state machine.
//!
//! `Idle -> Connecting -> Open -> Closed`, with `Closed` terminal per attempt.
//! Every `join` starts a new attempt; lifecycle events are tagged with the
//! attempt id and anything addressed to an older attempt is ignored, so a
//! late callback from a torn-down transport cannot touch the current one.
//!
//! The session is the sole writer of `ConnectionState` and the sole owner of
//! the transport handle. The handle is closed on `leave`, on a close event,
//! and when the session is dropped.

use url::Url;

use crate::error::{ChatSyncError, Result};
use crate::identity::Identity;
use crate::protocol::{encode_intent, Intent};

/// Monotonic join counter.
pub type AttemptId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Idle => "idle",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
        }
    }
}

/// What a transport reports back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEventKind {
    Opened,
    /// One inbound text frame.
    Frame(String),
    /// Peer close, network failure, or failed connect.
    Closed { reason: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportEvent {
    pub attempt: AttemptId,
    pub kind: TransportEventKind,
}

impl TransportEvent {
    pub fn opened(attempt: AttemptId) -> Self {
        Self { attempt, kind: TransportEventKind::Opened }
    }

    pub fn frame(attempt: AttemptId, frame: impl Into<String>) -> Self {
        Self { attempt, kind: TransportEventKind::Frame(frame.into()) }
    }

    pub fn closed(attempt: AttemptId, reason: Option<String>) -> Self {
        Self { attempt, kind: TransportEventKind::Closed { reason } }
    }
}

/// Owned connection resource. Sending must not block.
pub trait TransportHandle {
    fn send_text(&mut self, frame: String) -> Result<()>;
    /// Release the connection. Must be safe to call more than once.
    fn close(&mut self);
}

/// Starts connections. Open/frame/close are reported later as `TransportEvent`s
/// carrying the given attempt id.
pub trait Connector {
    type Handle: TransportHandle;

    fn connect(&mut self, url: Url, attempt: AttemptId) -> Result<Self::Handle>;
}

pub struct Session<C: Connector> {
    connector: C,
    base_url: Url,
    identity: Option<Identity>,
    state: ConnectionState,
    handle: Option<C::Handle>,
    attempt: AttemptId,
}

impl<C: Connector> Session<C> {
    pub fn new(connector: C, base_url: Url) -> Self {
        Self {
            connector,
            base_url,
            identity: None,
            state: ConnectionState::Idle,
            handle: None,
            attempt: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Id of the most recent join (0 before the first).
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    /// Start a new connection attempt for `raw`.
    ///
    /// Nothing changes when this returns `InvalidIdentity` or `AlreadyActive`.
    /// If the connector refuses to start, the attempt ends `Closed`.
    pub fn join(&mut self, raw: &str) -> Result<AttemptId> {
        if matches!(self.state, ConnectionState::Connecting | ConnectionState::Open) {
            return Err(ChatSyncError::AlreadyActive);
        }
        let identity = Identity::parse(raw)?;
        let url = identity.endpoint(&self.base_url)?;

        self.attempt += 1;
        let attempt = self.attempt;
        self.identity = Some(identity);
        self.state = ConnectionState::Connecting;
        tracing::info!(%url, attempt, "connecting");

        match self.connector.connect(url, attempt) {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(attempt)
            }
            Err(e) => {
                self.state = ConnectionState::Closed;
                tracing::warn!(attempt, error = %e, "connect failed");
                Err(e)
            }
        }
    }

    /// Transport reported open. Returns whether the state changed.
    pub fn on_open(&mut self, attempt: AttemptId) -> bool {
        if attempt != self.attempt || self.state != ConnectionState::Connecting {
            tracing::debug!(attempt, current = self.attempt, state = self.state.as_str(), "stale open ignored");
            return false;
        }
        self.state = ConnectionState::Open;
        tracing::info!(attempt, "connection open");
        true
    }

    /// Transport reported close. Returns whether the state changed.
    pub fn on_close(&mut self, attempt: AttemptId, reason: Option<&str>) -> bool {
        if attempt != self.attempt || self.state == ConnectionState::Closed {
            tracing::debug!(attempt, current = self.attempt, "stale close ignored");
            return false;
        }
        self.release();
        self.state = ConnectionState::Closed;
        tracing::info!(attempt, reason = reason.unwrap_or(""), "connection closed");
        true
    }

    /// Inbound frames are only accepted from the current, open attempt.
    pub fn accepts_frames_from(&self, attempt: AttemptId) -> bool {
        attempt == self.attempt && self.state == ConnectionState::Open
    }

    /// Encode and transmit one envelope.
    ///
    /// Returns `Ok(false)` without transmitting unless the session is open;
    /// there is no outbound queue.
    pub fn send(&mut self, intent: &Intent) -> Result<bool> {
        if self.state != ConnectionState::Open {
            tracing::debug!(state = self.state.as_str(), kind = intent.kind().as_str(), "send dropped: not open");
            return Ok(false);
        }
        let frame = encode_intent(intent)?;
        let handle = self
            .handle
            .as_mut()
            .ok_or_else(|| ChatSyncError::Internal("open session without transport".into()))?;
        handle.send_text(frame)?;
        Ok(true)
    }

    /// Explicit close from any state. Returns whether the state changed.
    pub fn leave(&mut self) -> bool {
        self.release();
        if self.state == ConnectionState::Closed {
            return false;
        }
        tracing::info!(attempt = self.attempt, from = self.state.as_str(), "leaving");
        self.state = ConnectionState::Closed;
        true
    }

    fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.close();
        }
    }
}

impl<C: Connector> Drop for Session<C> {
    fn drop(&mut self) {
        self.release();
    }
}
