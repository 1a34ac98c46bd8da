//! JSON wire shapes.
//!
//! Inbound `content` is kept as `RawValue` until the channel is known, so each
//! channel parses only the shape it expects.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use super::draw::DrawEvent;
use super::envelope::PayloadKind;

/// Inbound envelope (Text frame). Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct RawEnvelope {
    /// Channel name (field name is `type` in JSON).
    #[serde(rename = "type")]
    pub channel: String,
    /// Payload, stored as raw JSON (lazy parsing).
    #[serde(default)]
    pub content: Option<Box<RawValue>>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Kept as a string so unknown kinds do not fail the whole frame.
    #[serde(default, rename = "messageType")]
    pub message_type: Option<String>,
}

/// Structured chat content: `{ "text"?: ..., "gifUrl"?: ... }`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRecord {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "gifUrl")]
    pub gif_url: Option<String>,
}

/// Chat content accepts either the legacy plain string or the record form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawChat {
    Legacy(String),
    Record(ChatRecord),
}

/// Outbound envelope.
#[derive(Debug, Serialize)]
pub struct OutboundEnvelope<'a> {
    #[serde(rename = "type")]
    pub channel: &'static str,
    pub content: OutboundContent<'a>,
    #[serde(rename = "messageType")]
    pub message_type: PayloadKind,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OutboundContent<'a> {
    Text {
        text: &'a str,
    },
    Gif {
        #[serde(rename = "gifUrl")]
        gif_url: &'a str,
    },
    Draw(&'a DrawEvent),
}
