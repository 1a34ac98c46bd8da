//! Decode-once codec.
//!
//! - Inbound text frame => `Envelope` (or an error; the caller drops the frame)
//! - `Intent` => outbound text frame (one envelope per frame, no batching)

use serde::de::DeserializeOwned;
use serde_json::value::RawValue;

use crate::error::{ChatSyncError, Result};

use super::draw::DrawEvent;
use super::envelope::{Channel, ChatPayload, Content, Envelope, Intent, PayloadKind};
use super::wire::{ChatRecord, OutboundContent, OutboundEnvelope, RawChat, RawEnvelope};

/// Decode one inbound frame.
///
/// Fails with `MalformedFrame` on bad JSON or a content shape that does not
/// match the channel, and with `UnknownChannel` for unrecognized `type`s.
pub fn decode_frame(frame: &str) -> Result<Envelope> {
    let raw: RawEnvelope = serde_json::from_str(frame)
        .map_err(|e| ChatSyncError::MalformedFrame(format!("invalid envelope json: {e}")))?;

    let channel = Channel::parse(&raw.channel)
        .ok_or_else(|| ChatSyncError::UnknownChannel(raw.channel.clone()))?;

    let kind = raw.message_type.as_deref().and_then(PayloadKind::parse);

    let content_raw = raw
        .content
        .as_deref()
        .ok_or_else(|| ChatSyncError::MalformedFrame(format!("{} envelope without content", channel.as_str())))?;

    let content = match channel {
        Channel::Chat => Content::Chat(decode_chat(content_raw, kind)?),
        Channel::System => Content::System(parse_content(channel, content_raw)?),
        Channel::Users => Content::Users(parse_content(channel, content_raw)?),
        Channel::Draw => Content::Draw(parse_content::<DrawEvent>(channel, content_raw)?),
    };

    Ok(Envelope {
        content,
        username: raw.username,
        sender_id: raw.user_id,
        kind,
    })
}

fn parse_content<T: DeserializeOwned>(channel: Channel, raw: &RawValue) -> Result<T> {
    serde_json::from_str(raw.get()).map_err(|e| {
        ChatSyncError::MalformedFrame(format!("{} content invalid: {e}", channel.as_str()))
    })
}

/// Normalize the chat forms seen on the wire into a tagged payload.
fn decode_chat(raw: &RawValue, kind: Option<PayloadKind>) -> Result<ChatPayload> {
    match parse_content::<RawChat>(Channel::Chat, raw)? {
        RawChat::Legacy(s) => {
            if kind == Some(PayloadKind::Gif) {
                return Ok(ChatPayload::Gif(s));
            }
            // Older senders stringified the record form.
            if let Ok(ChatRecord { gif_url: Some(url), .. }) = serde_json::from_str::<ChatRecord>(&s) {
                if !url.is_empty() {
                    return Ok(ChatPayload::Gif(url));
                }
            }
            Ok(ChatPayload::Text(s))
        }
        RawChat::Record(rec) => match (rec.gif_url, rec.text) {
            (Some(url), _) if !url.is_empty() => Ok(ChatPayload::Gif(url)),
            (_, Some(text)) => Ok(ChatPayload::Text(text)),
            _ => Err(ChatSyncError::MalformedFrame(
                "chat content has neither text nor gifUrl".into(),
            )),
        },
    }
}

/// Encode an outbound intent as a text frame.
pub fn encode_intent(intent: &Intent) -> Result<String> {
    let content = match intent {
        Intent::Text(text) => OutboundContent::Text { text },
        Intent::Gif(url) => OutboundContent::Gif { gif_url: url },
        Intent::Draw(ev) => OutboundContent::Draw(ev),
    };
    let env = OutboundEnvelope {
        channel: intent.channel().as_str(),
        content,
        message_type: intent.kind(),
    };
    serde_json::to_string(&env).map_err(|e| ChatSyncError::Internal(format!("json encode failed: {e}")))
}
