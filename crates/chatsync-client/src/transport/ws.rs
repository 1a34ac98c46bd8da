//! tokio-tungstenite connector.
//!
//! Each `connect` spawns one task that owns the socket for that attempt:
//! - reports `Opened`, every inbound text frame, and finally `Closed` into the
//!   shared event channel, tagged with the attempt id
//! - forwards frames queued by `WsHandle::send_text` to the socket
//! - on `close` (or handle drop) sends a close frame and exits, or abandons
//!   the handshake if the socket is still connecting
//!
//! The event channel has exactly one consumer (the client driver), so events
//! are applied strictly one at a time.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use chatsync_core::error::{ChatSyncError, Result};
use chatsync_core::session::{AttemptId, Connector, TransportEvent, TransportHandle};

use crate::transport::codec::{decode, Inbound};

/// Starts WebSocket connections. `connect` fails with `Transport` outside a
/// tokio runtime.
#[derive(Debug, Clone)]
pub struct WsConnector {
    events: mpsc::UnboundedSender<TransportEvent>,
}

impl WsConnector {
    /// Connector plus the receiving end of its lifecycle events.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TransportEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Self { events }, rx)
    }
}

impl Connector for WsConnector {
    type Handle = WsHandle;

    fn connect(&mut self, url: Url, attempt: AttemptId) -> Result<WsHandle> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| ChatSyncError::Transport(format!("no tokio runtime: {e}")))?;
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = runtime.spawn(run_connection(
            url,
            attempt,
            self.events.clone(),
            out_rx,
            shutdown_rx,
        ));
        Ok(WsHandle {
            attempt,
            out_tx,
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

/// Owned handle to one connection task.
#[derive(Debug)]
pub struct WsHandle {
    attempt: AttemptId,
    out_tx: mpsc::UnboundedSender<Message>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl WsHandle {
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl TransportHandle for WsHandle {
    fn send_text(&mut self, frame: String) -> Result<()> {
        self.out_tx
            .send(Message::Text(frame.into()))
            .map_err(|_| ChatSyncError::Transport("connection task has exited".into()))
    }

    fn close(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
            tracing::debug!(attempt = self.attempt, "transport released");
        }
    }
}

impl Drop for WsHandle {
    fn drop(&mut self) {
        self.close();
    }
}

async fn run_connection(
    url: Url,
    attempt: AttemptId,
    events: mpsc::UnboundedSender<TransportEvent>,
    mut out_rx: mpsc::UnboundedReceiver<Message>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let connected = tokio::select! {
        res = tokio_tungstenite::connect_async(url.as_str()) => res,
        _ = &mut shutdown => {
            tracing::debug!(attempt, "connect abandoned");
            return;
        }
    };

    let stream = match connected {
        Ok((stream, _response)) => stream,
        Err(e) => {
            tracing::warn!(attempt, %url, error = %e, "websocket connect failed");
            let _ = events.send(TransportEvent::closed(attempt, Some(e.to_string())));
            return;
        }
    };

    if events.send(TransportEvent::opened(attempt)).is_err() {
        return;
    }

    let (mut ws_tx, mut ws_rx) = stream.split();

    let reason = loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                let Some(m) = maybe_out else {
                    let _ = ws_tx.send(Message::Close(None)).await;
                    return;
                };
                if let Err(e) = ws_tx.send(m).await {
                    break Some(e.to_string());
                }
            }

            // explicit release
            _ = &mut shutdown => {
                let _ = ws_tx.send(Message::Close(None)).await;
                return;
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break None; };
                let msg = match incoming {
                    Ok(msg) => msg,
                    Err(e) => break Some(e.to_string()),
                };
                match decode(msg) {
                    Ok(Inbound::Text(text)) => {
                        if events.send(TransportEvent::frame(attempt, text)).is_err() {
                            return;
                        }
                    }
                    Ok(Inbound::Close(reason)) => break reason,
                    Ok(Inbound::Control) => {}
                    Err(e) => tracing::debug!(attempt, error = %e, "inbound frame dropped"),
                }
            }
        }
    };

    tracing::debug!(attempt, reason = reason.as_deref().unwrap_or(""), "socket closed");
    let _ = events.send(TransportEvent::closed(attempt, reason));
}
