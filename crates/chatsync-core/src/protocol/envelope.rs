//! Typed envelope model.
//!
//! Frames are decoded once into these types at the codec boundary; nothing
//! downstream inspects raw JSON shapes again.

use serde::{Deserialize, Serialize};

use super::draw::DrawEvent;

/// Logical sub-protocol multiplexed over the connection (`type` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Chat,
    System,
    Users,
    Draw,
}

impl Channel {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Chat => "chat",
            Channel::System => "system",
            Channel::Users => "users",
            Channel::Draw => "draw",
        }
    }

    /// Parse a wire name. Unknown names return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "chat" => Some(Channel::Chat),
            "system" => Some(Channel::System),
            "users" => Some(Channel::Users),
            "draw" => Some(Channel::Draw),
            _ => None,
        }
    }
}

/// Sender-declared payload kind (`messageType` on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    Text,
    Gif,
    Draw,
}

impl PayloadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PayloadKind::Text => "text",
            PayloadKind::Gif => "gif",
            PayloadKind::Draw => "draw",
        }
    }

    /// Parse a wire name. Unknown names return `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(PayloadKind::Text),
            "gif" => Some(PayloadKind::Gif),
            "draw" => Some(PayloadKind::Draw),
            _ => None,
        }
    }

    /// Channel an outbound payload of this kind travels on.
    pub fn channel(self) -> Channel {
        match self {
            PayloadKind::Draw => Channel::Draw,
            PayloadKind::Text | PayloadKind::Gif => Channel::Chat,
        }
    }
}

/// Chat content after legacy-form normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatPayload {
    Text(String),
    Gif(String),
}

/// Channel payload. The variant fixes the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Chat(ChatPayload),
    System(String),
    /// Full roster snapshot.
    Users(Vec<String>),
    Draw(DrawEvent),
}

/// One decoded inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub content: Content,
    /// Sender identity, stamped by the server on relayed messages.
    pub username: Option<String>,
    /// Server-internal connection id of the sender.
    pub sender_id: Option<String>,
    pub kind: Option<PayloadKind>,
}

impl Envelope {
    /// Envelope carrying `content` with no sender metadata.
    pub fn new(content: Content) -> Self {
        Self {
            content,
            username: None,
            sender_id: None,
            kind: None,
        }
    }

    pub fn channel(&self) -> Channel {
        match &self.content {
            Content::Chat(_) => Channel::Chat,
            Content::System(_) => Channel::System,
            Content::Users(_) => Channel::Users,
            Content::Draw(_) => Channel::Draw,
        }
    }

    /// Draw payload, if this is a draw envelope.
    pub fn draw_event(&self) -> Option<&DrawEvent> {
        match &self.content {
            Content::Draw(ev) => Some(ev),
            _ => None,
        }
    }
}

/// Outbound user intent: one payload plus its implied kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Text(String),
    Gif(String),
    Draw(DrawEvent),
}

impl Intent {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Intent::Text(_) => PayloadKind::Text,
            Intent::Gif(_) => PayloadKind::Gif,
            Intent::Draw(_) => PayloadKind::Draw,
        }
    }

    pub fn channel(&self) -> Channel {
        self.kind().channel()
    }
}
