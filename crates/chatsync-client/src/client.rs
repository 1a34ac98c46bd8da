//! Client facade.
//!
//! Ties the session, router, and drawing board together and fans state changes
//! out to listeners. Everything here is synchronous: the driver feeds
//! `TransportEvent`s in one at a time and each is fully applied (stored,
//! re-rendered, listeners notified) before the next.

use std::sync::Arc;

use tokio::sync::mpsc;

use chatsync_core::canvas::{DrawingBoard, Raster, Rgba};
use chatsync_core::error::Result;
use chatsync_core::identity::Identity;
use chatsync_core::protocol::{DrawEvent, Intent, Point};
use chatsync_core::session::{ConnectionState, Connector, Session, TransportEvent, TransportEventKind};
use chatsync_core::store::{MessageLog, Roster};
use chatsync_core::{EventRouter, Routed};

use crate::config::ClientConfig;
use crate::observer::{Listener, Observers, SubscriptionId};

pub struct ChatClient<C: Connector> {
    session: Session<C>,
    router: EventRouter,
    board: DrawingBoard,
    observers: Observers,
}

impl<C: Connector> ChatClient<C> {
    pub fn new(connector: C, cfg: &ClientConfig) -> Result<Self> {
        let base_url = cfg.server.parsed_base_url()?;
        let raster = Raster::new(cfg.canvas.width, cfg.canvas.height, cfg.canvas.line_width);
        let mut board = DrawingBoard::new(raster, cfg.canvas.default_color.clone());
        board.refresh::<DrawEvent>(&[]);
        Ok(Self {
            session: Session::new(connector, base_url),
            router: EventRouter::new(),
            board,
            observers: Observers::new(),
        })
    }

    // ---- listeners

    pub fn subscribe(&self, listener: Arc<dyn Listener>) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ---- read side

    pub fn state(&self) -> ConnectionState {
        self.session.state()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_open()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.session.identity()
    }

    pub fn messages(&self) -> &MessageLog {
        self.router.log()
    }

    pub fn roster(&self) -> &Roster {
        self.router.roster()
    }

    pub fn board(&self) -> &DrawingBoard {
        &self.board
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    // ---- intents

    /// Start a connection. Returns `false` (and changes nothing) for a blank
    /// identity or while already connecting/open.
    pub fn join(&mut self, identity: &str) -> bool {
        let before = self.session.state();
        let joined = match self.session.join(identity) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(code = e.code().as_str(), error = %e, "join ignored");
                false
            }
        };
        if self.session.state() != before {
            self.notify_connection();
        }
        joined
    }

    /// Explicit close.
    pub fn leave(&mut self) {
        if self.session.leave() {
            self.router.reset_roster();
            self.notify_connection();
            self.notify_roster();
        }
    }

    /// Send a text message. Surrounding whitespace is trimmed; blank text is not sent.
    pub fn send_text(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.send(Intent::Text(text.to_string()))
    }

    pub fn send_gif(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.send(Intent::Gif(url.to_string()))
    }

    /// Commit a finished stroke. Empty strokes and non-hex colors are not sent.
    pub fn commit_stroke(&mut self, points: Vec<Point>, color: &str) -> bool {
        if points.is_empty() || Rgba::parse_hex(color).is_none() {
            return false;
        }
        self.send(Intent::Draw(DrawEvent::stroke(points, color)))
    }

    /// Broadcast a clear marker in the board's current color.
    pub fn clear_canvas(&mut self) -> bool {
        let ev = self.board.clear_event();
        self.send(Intent::Draw(ev))
    }

    /// Returns `false` (keeping the current color) unless `color` is hex.
    pub fn set_color(&mut self, color: &str) -> bool {
        self.board.set_color(color)
    }

    /// Pointer down on the canvas.
    pub fn begin_stroke(&mut self, at: Point) {
        self.board.begin_stroke(at);
        self.notify_canvas();
    }

    /// Pointer move while drawing.
    pub fn extend_stroke(&mut self, to: Point) {
        if self.board.is_drawing() {
            self.board.extend_stroke(to);
            self.notify_canvas();
        }
    }

    /// Pointer up/out: commit the in-progress stroke.
    pub fn release_stroke(&mut self) -> bool {
        if !self.board.is_drawing() {
            return false;
        }
        let committed = self.board.finish_stroke();
        self.notify_canvas();
        match committed {
            Some(ev) => self.send(Intent::Draw(ev)),
            None => false,
        }
    }

    fn send(&mut self, intent: Intent) -> bool {
        match self.session.send(&intent) {
            Ok(sent) => sent,
            Err(e) => {
                tracing::warn!(code = e.code().as_str(), error = %e, kind = intent.kind().as_str(), "send failed");
                false
            }
        }
    }

    // ---- inbound

    /// Apply one transport event.
    pub fn handle(&mut self, ev: TransportEvent) {
        match ev.kind {
            TransportEventKind::Opened => {
                if self.session.on_open(ev.attempt) {
                    self.router.reset_roster();
                    self.notify_connection();
                    self.notify_roster();
                }
            }
            TransportEventKind::Frame(frame) => {
                if !self.session.accepts_frames_from(ev.attempt) {
                    tracing::debug!(attempt = ev.attempt, "frame from inactive transport dropped");
                    return;
                }
                self.route(&frame);
            }
            TransportEventKind::Closed { reason } => {
                if self.session.on_close(ev.attempt, reason.as_deref()) {
                    self.router.reset_roster();
                    self.notify_connection();
                    self.notify_roster();
                }
            }
        }
    }

    fn route(&mut self, frame: &str) {
        match self.router.route_frame(frame) {
            Ok(Routed::Roster) => self.notify_roster(),
            Ok(Routed::Chat) => {
                let log = self.router.log();
                self.observers.notify(|l| l.chat_appended(log));
            }
            Ok(Routed::Draw) => {
                self.board.refresh(&self.router.log().draw_events());
                self.notify_canvas();
            }
            Err(e) => {
                tracing::debug!(code = e.code().as_str(), error = %e, "inbound frame dropped");
            }
        }
    }

    /// Apply events until the session closes or the channel ends.
    pub async fn drive(&mut self, events: &mut mpsc::UnboundedReceiver<TransportEvent>) {
        while let Some(ev) = events.recv().await {
            self.handle(ev);
            if self.session.state() == ConnectionState::Closed {
                break;
            }
        }
    }

    fn notify_connection(&self) {
        let state = self.session.state();
        self.observers.notify(|l| l.connection_changed(state));
    }

    fn notify_roster(&self) {
        let roster = self.router.roster();
        self.observers.notify(|l| l.roster_changed(roster));
    }

    fn notify_canvas(&self) {
        let board = &self.board;
        self.observers.notify(|l| l.canvas_changed(board));
    }
}
